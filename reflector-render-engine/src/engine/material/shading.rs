//! CPU model of the reflector fragment shading.
//!
//! `reflector_material.wgsl` evaluates the same expressions per fragment.
//! Keeping them here lets the sampling decisions be checked without a GPU.

use bevy::math::{Vec2, Vec3, Vec4};

/// Roughness above which the surface reads as dry and reflects sharply.
pub const WET_ROUGHNESS_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPath {
    /// Undistorted projective lookup.
    Sharp,
    /// Lookup offset by the blended ripple normal.
    Rippled,
}

/// `step(roughness, threshold)`: 1.0 on wet texels, 0.0 on dry ones.
///
/// Used as a mix factor rather than a branch so every backend produces the
/// same pixels.
pub fn wet_weight(roughness: f32) -> f32 {
    if roughness > WET_ROUGHNESS_THRESHOLD {
        0.0
    } else {
        1.0
    }
}

pub fn sampling_path(roughness: f32) -> SamplingPath {
    if wet_weight(roughness) == 0.0 {
        SamplingPath::Sharp
    } else {
        SamplingPath::Rippled
    }
}

/// UV offset of a ripple layer at `offset` along `flow_direction`.
pub fn ripple_uv(surface_uv: Vec2, flow_direction: Vec2, offset: f32) -> Vec2 {
    surface_uv + flow_direction * offset
}

/// Surface normal decoded from a blended ripple sample (`rgb` in `[0, 1]`).
///
/// The map stores tangent-space x/y in red/green; blue becomes the up axis.
pub fn ripple_normal(sample_a: Vec4, sample_b: Vec4, blend: f32) -> Vec3 {
    let color = sample_a.lerp(sample_b, blend);
    Vec3::new(color.x * 2.0 - 1.0, color.z, color.y * 2.0 - 1.0).normalize_or_zero()
}

/// Reflection UV after the w divide, nudged by the ripple normal.
///
/// `projected` is the texture-matrix output; `z` scales the offset so distant
/// fragments distort less in screen terms.
pub fn distorted_uv(projected: Vec4, normal: Vec3, distortion: f32) -> Vec2 {
    let coord = projected.truncate() / projected.w;
    coord.truncate() + coord.z * Vec2::new(normal.x, normal.z) * distortion
}

/// Reflection added on top of the surface colour.
pub fn reflected_contribution(sharp: Vec3, rippled: Vec3, roughness: f32, opacity: f32) -> Vec3 {
    let mixed = sharp.lerp(rippled, wet_weight(roughness));
    opacity * mixed * (1.0 - roughness)
}
