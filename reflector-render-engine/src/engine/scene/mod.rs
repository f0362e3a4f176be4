//! Demo scene around the reflective floor.
//!
//! Pillars, a hovering sphere and lighting are spawned at startup; the
//! floor joins the scene group once its config and textures have loaded.

/// Main camera, lighting and the props reflected in the floor.
pub mod props;

/// Reflection target creation and the reflective floor spawn.
pub mod reflector_floor;
