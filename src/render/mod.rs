//! Geometry generation modules
//! Contains the chunk mesh buffer and the face-culling mesher.

pub mod mesh;
pub mod mesher;

// Re-export commonly used types
pub use mesh::{ChunkMesh, add_face};
pub use mesher::build_chunk_mesh;
