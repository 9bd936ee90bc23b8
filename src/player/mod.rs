//! Actor-related modules
//! Contains movement input, actor state, and the per-tick controllers.

pub mod actor;
pub mod controller;
pub mod input;

// Re-export commonly used types
pub use actor::Actor;
pub use controller::{
    ActorController, AvatarController, AvatarSteering, CreatureController, PassiveSteering,
    Steering,
};
pub use input::{InputWatchdog, MovementIntent};
