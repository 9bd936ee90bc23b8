// World constants
pub const DEFAULT_CHUNK_SIZE: i32 = 16;
pub const DEFAULT_WORLD_SIZE: i32 = 8;
pub const DEFAULT_TILE_SIZE: f32 = 1.0;

// Terrain constants
pub const TERRAIN_BASE_HEIGHT: f64 = 5.0;
pub const TERRAIN_NOISE_SCALE: f64 = 0.1;
pub const TERRAIN_AMPLITUDE: f64 = 2.0;

// Physics constants
pub const TERMINAL_FALL_SPEED: f32 = 20.0;
/// Rebound speeds below this are zeroed after a ground bounce.
pub const BOUNCE_SNAP_THRESHOLD: f32 = 0.1;
pub const MOVEMENT_EPSILON: f32 = 1e-6;
/// Distance in voxel units under which a position counts as on a cell boundary.
pub const GRID_SNAP_EPSILON: f32 = 1e-4;
/// Shaves the capsule top so a head flush with a block face does not count as inside it.
pub const LAYER_EPSILON: f32 = 0.001;
/// Squared XZ distance under which two actors are treated as coincident.
pub const OVERLAP_EPSILON_SQ: f32 = 0.001;
pub const MAX_TICK_SECONDS: f32 = 0.1;

// Avatar constants
pub const PLAYER_RADIUS: f32 = 0.3;
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_GRAVITY: f32 = 12.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_JUMP_VELOCITY: f32 = 5.0;
pub const HORIZONTAL_DAMPING: f32 = 0.8;
pub const DAMPING_SNAP_THRESHOLD: f32 = 0.01;

// Idle-input watchdog
pub const WATCHDOG_IDLE_SECONDS: f32 = 1.0;
pub const WATCHDOG_MAX_STRIKES: u32 = 3;

// Creature constants
pub const CREATURE_RADIUS: f32 = 0.4;
pub const CREATURE_HEIGHT: f32 = 1.8;
pub const CREATURE_GRAVITY: f32 = 9.8;
pub const CREATURE_RESTITUTION: f32 = 0.4;

// Spawn points
pub const AVATAR_SPAWN: [f32; 3] = [32.0, 20.0, 32.0];
pub const CREATURE_SPAWN: [f32; 3] = [34.0, 20.0, 32.0];
