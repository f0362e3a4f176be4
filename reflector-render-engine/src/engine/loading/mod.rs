//! Loading of the reflector config and surface textures ahead of the running state.

/// Config asset loading, validation and live reload.
pub mod config_loader;

/// Loading progress tracking for the state transition.
pub mod progress;

/// Surface texture load-state monitoring.
pub mod texture_loader;
