// Core module with fundamental types
pub mod core;

// Actor module with input, state and controllers
pub mod player;

// Physics module with voxel collision and actor separation
pub mod physics;

// Render module with chunk geometry
pub mod render;

// World module with chunk storage and terrain
pub mod world;

// Other modules
pub mod constants;
pub mod simulation;
pub mod utils;

// Re-exports
pub use constants::*;
pub use crate::core::{AIR, BlockType, Chunk, ChunkCoord, Face, Vertex, VoxelCode};
pub use physics::{Capsule, CollisionOutcome, CollisionResolver, resolve_overlap};
pub use player::{
    Actor, ActorController, AvatarController, AvatarSteering, CreatureController, MovementIntent,
    PassiveSteering, Steering,
};
pub use render::{ChunkMesh, build_chunk_mesh};
pub use simulation::{Simulation, SimulationStats};
pub use utils::{ActorSettings, Settings, SettingsError};
pub use world::{TerrainGenerator, World, WorldParams};
