//! Main camera navigation.
//!
//! Mouse drag orbits the scene origin, the wheel dollies towards it.

/// Orbit controller resource and input system.
pub mod orbit_camera;
