//! Utility modules
//! Contains configuration loading.

pub mod settings;

// Re-export commonly used types
pub use settings::{
    ActorSettings, Settings, SettingsError, SimulationSettings, TerrainSettings, WorldSettings,
};
