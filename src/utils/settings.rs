use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Upper bound on allocated voxels (`world_size² · chunk_size³`).
const MAX_WORLD_VOXELS: u64 = 1 << 28;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file format: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub world: WorldSettings,
    #[serde(default)]
    pub terrain: TerrainSettings,
    #[serde(default = "ActorSettings::avatar", deserialize_with = "avatar_section")]
    pub avatar: ActorSettings,
    #[serde(default = "ActorSettings::creature", deserialize_with = "creature_section")]
    pub creature: ActorSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            terrain: TerrainSettings::default(),
            avatar: ActorSettings::avatar(),
            creature: ActorSettings::creature(),
            simulation: SimulationSettings::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    pub chunk_size: u32,
    pub world_size: u32,
    pub tile_size: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE as u32,
            world_size: DEFAULT_WORLD_SIZE as u32,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    pub base_height: f64,
    pub noise_scale: f64,
    pub amplitude: f64,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            base_height: TERRAIN_BASE_HEIGHT,
            noise_scale: TERRAIN_NOISE_SCALE,
            amplitude: TERRAIN_AMPLITUDE,
        }
    }
}

/// Capsule and movement parameters of one actor.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ActorSettings {
    pub radius: f32,
    pub height: f32,
    pub gravity: f32,
    pub ground_restitution: f32,
    pub speed: f32,
    pub jump_velocity: f32,
    pub spawn: Vec3,
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self::avatar()
    }
}

impl ActorSettings {
    pub fn avatar() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            height: PLAYER_HEIGHT,
            gravity: PLAYER_GRAVITY,
            ground_restitution: 0.0,
            speed: PLAYER_SPEED,
            jump_velocity: PLAYER_JUMP_VELOCITY,
            spawn: Vec3::from_array(AVATAR_SPAWN),
        }
    }

    pub fn creature() -> Self {
        Self {
            radius: CREATURE_RADIUS,
            height: CREATURE_HEIGHT,
            gravity: CREATURE_GRAVITY,
            ground_restitution: CREATURE_RESTITUTION,
            speed: 0.0,
            jump_velocity: 0.0,
            spawn: Vec3::from_array(CREATURE_SPAWN),
        }
    }

    fn validate(&self, section: &str) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(format!("{section}.{msg}")));
        let values = [
            self.radius,
            self.height,
            self.gravity,
            self.ground_restitution,
            self.speed,
            self.jump_velocity,
        ];
        if values.iter().any(|v| !v.is_finite()) || !self.spawn.is_finite() {
            return invalid("values must be finite");
        }
        if self.radius <= 0.0 {
            return invalid("radius must be positive");
        }
        if self.height <= 0.0 {
            return invalid("height must be positive");
        }
        if self.gravity < 0.0 {
            return invalid("gravity must not be negative");
        }
        if !(0.0..1.0).contains(&self.ground_restitution) {
            return invalid("ground_restitution must be in [0, 1)");
        }
        Ok(())
    }
}

/// Actor section as written in the file; missing keys keep the kind's defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActorSection {
    radius: Option<f32>,
    height: Option<f32>,
    gravity: Option<f32>,
    ground_restitution: Option<f32>,
    speed: Option<f32>,
    jump_velocity: Option<f32>,
    spawn: Option<Vec3>,
}

impl ActorSection {
    fn over(self, base: ActorSettings) -> ActorSettings {
        ActorSettings {
            radius: self.radius.unwrap_or(base.radius),
            height: self.height.unwrap_or(base.height),
            gravity: self.gravity.unwrap_or(base.gravity),
            ground_restitution: self.ground_restitution.unwrap_or(base.ground_restitution),
            speed: self.speed.unwrap_or(base.speed),
            jump_velocity: self.jump_velocity.unwrap_or(base.jump_velocity),
            spawn: self.spawn.unwrap_or(base.spawn),
        }
    }
}

fn avatar_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ActorSettings, D::Error> {
    Ok(ActorSection::deserialize(deserializer)?.over(ActorSettings::avatar()))
}

fn creature_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ActorSettings, D::Error> {
    Ok(ActorSection::deserialize(deserializer)?.over(ActorSettings::creature()))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    /// Longest step a single tick may integrate; longer frames are clamped.
    pub max_tick_seconds: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_tick_seconds: MAX_TICK_SECONDS,
        }
    }
}

impl Settings {
    /// Reads, parses and validates a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let world = &self.world;
        if world.chunk_size == 0 {
            return Err(SettingsError::Invalid("world.chunk_size must be positive".into()));
        }
        if world.world_size == 0 {
            return Err(SettingsError::Invalid("world.world_size must be positive".into()));
        }
        let chunk = u64::from(world.chunk_size);
        let side = u64::from(world.world_size);
        if chunk.saturating_pow(3).saturating_mul(side * side) > MAX_WORLD_VOXELS {
            return Err(SettingsError::Invalid(format!(
                "world of {}x{} chunks of size {} is too large",
                world.world_size, world.world_size, world.chunk_size
            )));
        }
        if !(world.tile_size.is_finite() && world.tile_size > 0.0) {
            return Err(SettingsError::Invalid("world.tile_size must be positive".into()));
        }

        let terrain = &self.terrain;
        if ![terrain.base_height, terrain.noise_scale, terrain.amplitude]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(SettingsError::Invalid("terrain values must be finite".into()));
        }

        self.avatar.validate("avatar")?;
        self.creature.validate("creature")?;

        let max_tick = self.simulation.max_tick_seconds;
        if !(max_tick.is_finite() && max_tick > 0.0) {
            return Err(SettingsError::Invalid(
                "simulation.max_tick_seconds must be positive".into(),
            ));
        }
        Ok(())
    }
}
