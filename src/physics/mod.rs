//! Actor physics modules
//! Contains the voxel collision resolver and actor-actor separation.

pub mod collision;
pub mod overlap;

// Re-export commonly used types
pub use collision::{Capsule, CollisionOutcome, CollisionResolver};
pub use overlap::resolve_overlap;
