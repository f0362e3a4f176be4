//! Core application setup and state management.
//!
//! Handles the application lifecycle, window configuration and the
//! loading-to-running transition for both native and WASM targets.

/// Application setup and plugin configuration.
///
/// Creates the app with the reflector material, reflection camera,
/// post-processing chain and the loading and runtime systems.
pub mod app_setup;

/// Application state machine and the loading transition.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
