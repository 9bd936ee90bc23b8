//! Core data structures for the simulation
//! Contains fundamental types like blocks, faces, chunks, and vertices.

pub mod block;
pub mod chunk;
pub mod face;
pub mod vertex;

// Re-export commonly used types
pub use block::{AIR, BlockType, VoxelCode, base_color, is_solid_code};
pub use chunk::{Chunk, ChunkCoord};
pub use face::{FACE_UVS, Face};
pub use vertex::Vertex;
