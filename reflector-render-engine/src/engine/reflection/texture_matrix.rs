use bevy::math::{Mat4, Vec3};

/// Maps clip coordinates in `[-w, w]` to projective texture coordinates in `[0, w]`.
pub const UV_BIAS: Mat4 = Mat4::from_cols_array(&[
    0.5, 0.0, 0.0, 0.0, //
    0.0, 0.5, 0.0, 0.0, //
    0.0, 0.0, 0.5, 0.0, //
    0.5, 0.5, 0.5, 1.0, //
]);

/// Reflector-local position to reflection-texture coordinates (before the w divide).
///
/// Must be built from the projection before the oblique patch. The patch only
/// rewrites the depth row, and the ripple distortion reads that row.
pub fn texture_matrix(clip_from_view: &Mat4, view_from_world: &Mat4, world_from_reflector: &Mat4) -> Mat4 {
    UV_BIAS * *clip_from_view * *view_from_world * *world_from_reflector
}

/// Projects a reflector-local point into the reflection texture, returning
/// `(u, v, depth)` after the w divide. `v` grows upwards as in GL.
pub fn project_to_texture(texture_matrix: &Mat4, local_point: Vec3) -> Vec3 {
    texture_matrix.project_point3(local_point)
}
