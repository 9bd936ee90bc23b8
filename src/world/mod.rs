//! World storage and generation modules
//! Contains the chunk store and the terrain height field.

pub mod generator;
pub mod store;

// Re-export commonly used types
pub use generator::TerrainGenerator;
pub use store::{World, WorldParams};
