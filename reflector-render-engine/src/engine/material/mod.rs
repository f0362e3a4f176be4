//! The reflector surface material and the CPU side of its shading.

/// Two-layer flow phase for the ripple normal maps.
pub mod flow;

/// Standard material extension carrying the reflection and ripple inputs.
pub mod reflector_material;

/// Reference implementation of the ripple and roughness shading terms.
pub mod shading;
