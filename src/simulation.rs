use std::fmt;

use glam::Vec3;

use crate::core::block::VoxelCode;
use crate::core::chunk::ChunkCoord;
use crate::physics::overlap::resolve_overlap;
use crate::player::actor::Actor;
use crate::player::controller::{AvatarController, CreatureController};
use crate::player::input::MovementIntent;
use crate::render::mesh::ChunkMesh;
use crate::utils::settings::Settings;
use crate::world::generator::TerrainGenerator;
use crate::world::store::{World, WorldParams};

/// Read-only telemetry snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub active_chunks: usize,
    pub triangles: usize,
    pub avatar: Vec3,
    pub avatar_grounded: bool,
    pub creature: Vec3,
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} | chunks {} | triangles {} | avatar ({:.2}, {:.2}, {:.2}){} | creature ({:.2}, {:.2}, {:.2})",
            self.ticks,
            self.active_chunks,
            self.triangles,
            self.avatar.x,
            self.avatar.y,
            self.avatar.z,
            if self.avatar_grounded { " grounded" } else { "" },
            self.creature.x,
            self.creature.y,
            self.creature.z,
        )
    }
}

/// Owns the world and both actors. Edits go through `&mut self`, so they can
/// only happen between ticks.
pub struct Simulation {
    world: World,
    avatar: AvatarController,
    creature: CreatureController,
    max_tick_seconds: f32,
    ticks: u64,
}

/// Raises a configured spawn point to the top of its generated column.
fn spawn_point(world: &World, terrain: &TerrainGenerator, spawn: Vec3) -> Vec3 {
    let tile = world.tile_size();
    let column_x = (spawn.x / tile).floor() as i32;
    let column_z = (spawn.z / tile).floor() as i32;
    let surface = terrain.surface_height(column_x, column_z, world.chunk_size()) as f32 * tile;
    Vec3::new(spawn.x, spawn.y.max(surface), spawn.z)
}

impl Simulation {
    pub fn new(settings: &Settings) -> Self {
        let terrain = TerrainGenerator::from(&settings.terrain);
        let mut world = World::new(WorldParams::from(&settings.world));
        world.generate(&terrain);
        world.rebuild_all();

        let avatar_spawn = spawn_point(&world, &terrain, settings.avatar.spawn);
        let creature_spawn = spawn_point(&world, &terrain, settings.creature.spawn);
        tracing::info!(
            "Avatar spawns at ({:.2}, {:.2}, {:.2}), creature at ({:.2}, {:.2}, {:.2})",
            avatar_spawn.x,
            avatar_spawn.y,
            avatar_spawn.z,
            creature_spawn.x,
            creature_spawn.y,
            creature_spawn.z
        );

        Simulation {
            world,
            avatar: AvatarController::avatar(avatar_spawn, &settings.avatar),
            creature: CreatureController::creature(creature_spawn, &settings.creature),
            max_tick_seconds: settings.simulation.max_tick_seconds,
            ticks: 0,
        }
    }

    /// Advances both actors by `dt` seconds, then separates them. Returns
    /// `false` when `dt` is unusable and nothing ran.
    pub fn tick(&mut self, intent: MovementIntent, dt: f32) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            tracing::debug!("Skipping tick with dt={}", dt);
            return false;
        }
        let dt = dt.min(self.max_tick_seconds);

        self.avatar.tick(&self.world, &intent, dt);
        self.creature.tick(&self.world, &MovementIntent::IDLE, dt);

        let avatar = self.avatar.actor_mut();
        let creature = self.creature.actor_mut();
        resolve_overlap(
            &mut avatar.position,
            avatar.capsule.radius,
            &mut creature.position,
            creature.capsule.radius,
        );

        self.ticks += 1;
        true
    }

    /// Writes one voxel without remeshing. Pair with `rebuild_chunk_at`.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, code: VoxelCode) -> bool {
        self.world.set_voxel(x, y, z, code)
    }

    pub fn rebuild_chunk_at(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.world.rebuild_chunk_at(x, y, z)
    }

    /// Writes one voxel and remeshes its chunk, plus any neighbor chunk whose
    /// border faces the edited voxel.
    pub fn edit_voxel(&mut self, x: i32, y: i32, z: i32, code: VoxelCode) -> bool {
        if !self.world.set_voxel(x, y, z, code) {
            tracing::debug!("Ignored edit outside the world at ({}, {}, {})", x, y, z);
            return false;
        }
        let own = self.world.chunk_coord_of(x, z);
        self.world.rebuild_chunk(own);
        for (dx, dz) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let neighbor = self.world.chunk_coord_of(x + dx, z + dz);
            if neighbor != own {
                self.world.rebuild_chunk(neighbor);
            }
        }
        tracing::debug!("Set voxel ({}, {}, {}) to {}", x, y, z, code);
        true
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.world.mesh(coord)
    }

    pub fn avatar(&self) -> &Actor {
        self.avatar.actor()
    }

    pub fn avatar_mut(&mut self) -> &mut Actor {
        self.avatar.actor_mut()
    }

    pub fn creature(&self) -> &Actor {
        self.creature.actor()
    }

    pub fn creature_mut(&mut self) -> &mut Actor {
        self.creature.actor_mut()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            ticks: self.ticks,
            active_chunks: self.world.active_chunk_count(),
            triangles: self.world.total_triangle_count(),
            avatar: self.avatar.position(),
            avatar_grounded: self.avatar.actor().grounded,
            creature: self.creature.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::AIR;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 1.0 / 60.0;

    fn small_settings() -> Settings {
        let mut settings = Settings::default();
        settings.world.world_size = 3;
        settings.avatar.spawn = Vec3::new(20.5, 12.0, 20.5);
        settings.creature.spawn = Vec3::new(24.5, 12.0, 20.5);
        settings
    }

    #[test]
    fn new_world_is_generated_and_meshed() {
        let sim = Simulation::new(&small_settings());
        let stats = sim.stats();
        assert_eq!(stats.active_chunks, 9);
        assert!(stats.triangles > 0);
        assert!(sim.world().chunks().all(|c| !c.is_mesh_dirty()));
        assert!(sim.mesh(ChunkCoord::new(1, 1)).is_some());
    }

    #[test]
    fn spawn_below_surface_is_raised() {
        let mut settings = small_settings();
        settings.avatar.spawn = Vec3::new(20.5, 0.0, 20.5);
        let sim = Simulation::new(&settings);
        let terrain = TerrainGenerator::default();
        assert_eq!(sim.avatar().position.y, terrain.height(20, 20) as f32);
    }

    #[test]
    fn actors_fall_and_settle_on_terrain() {
        let mut sim = Simulation::new(&small_settings());
        for _ in 0..600 {
            assert!(sim.tick(MovementIntent::IDLE, DT));
        }
        let terrain = TerrainGenerator::default();
        assert_eq!(sim.avatar().position.y, terrain.height(20, 20) as f32);
        assert_eq!(sim.creature().position.y, terrain.height(24, 20) as f32);
        assert!(sim.avatar().grounded);
        assert!(sim.creature().grounded);
        assert_eq!(sim.creature().velocity.y, 0.0);
        assert_eq!(sim.ticks(), 600);
    }

    #[test]
    fn unusable_dt_is_skipped() {
        let mut sim = Simulation::new(&small_settings());
        let before = sim.avatar().clone();
        assert!(!sim.tick(MovementIntent::IDLE, f32::NAN));
        assert!(!sim.tick(MovementIntent::IDLE, 0.0));
        assert!(!sim.tick(MovementIntent::IDLE, -1.0));
        assert!(!sim.tick(MovementIntent::IDLE, f32::INFINITY));
        assert_eq!(sim.avatar(), &before);
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut clamped = Simulation::new(&small_settings());
        let mut reference = Simulation::new(&small_settings());
        clamped.tick(MovementIntent::IDLE, 2.0);
        reference.tick(MovementIntent::IDLE, 0.1);
        assert_eq!(clamped.avatar(), reference.avatar());
    }

    #[test]
    fn overlapping_actors_are_separated() {
        let mut sim = Simulation::new(&small_settings());
        for _ in 0..600 {
            sim.tick(MovementIntent::IDLE, DT);
        }
        let avatar = sim.avatar().position;
        sim.creature_mut().position = avatar + Vec3::new(0.5, 0.0, 0.0);
        sim.tick(MovementIntent::IDLE, DT);

        let a = sim.avatar().position;
        let c = sim.creature().position;
        let gap = Vec3::new(c.x - a.x, 0.0, c.z - a.z).length();
        assert_abs_diff_eq!(gap, 0.7, epsilon = 1e-4);
    }

    #[test]
    fn set_voxel_then_rebuild_keeps_value() {
        let mut sim = Simulation::new(&small_settings());
        assert!(sim.set_voxel(5, 10, 5, 3));
        assert!(sim.world().chunk(ChunkCoord::new(0, 0)).unwrap().is_mesh_dirty());
        assert!(sim.rebuild_chunk_at(5, 10, 5));
        assert_eq!(sim.world().get_voxel(5, 10, 5), 3);
        assert!(!sim.world().chunk(ChunkCoord::new(0, 0)).unwrap().is_mesh_dirty());
    }

    #[test]
    fn edit_on_chunk_border_remeshes_neighbor() {
        let mut sim = Simulation::new(&small_settings());
        let neighbor = ChunkCoord::new(1, 0);
        let before = sim.mesh(neighbor).unwrap().triangle_count();

        assert!(sim.edit_voxel(15, 1, 5, AIR));
        assert_eq!(sim.mesh(neighbor).unwrap().triangle_count(), before + 2);
        assert!(sim.world().chunks().all(|c| !c.is_mesh_dirty()));
    }

    #[test]
    fn edit_outside_world_is_ignored() {
        let mut sim = Simulation::new(&small_settings());
        let triangles = sim.stats().triangles;
        assert!(!sim.edit_voxel(-1, 2, 2, 1));
        assert!(!sim.edit_voxel(2, 99, 2, 1));
        assert_eq!(sim.stats().triangles, triangles);
    }

    #[test]
    fn stats_line_mentions_counts() {
        let sim = Simulation::new(&small_settings());
        let line = sim.stats().to_string();
        assert!(line.starts_with("tick 0 | chunks 9 | triangles "));
        assert!(line.contains("creature (24.50, "));
    }
}
