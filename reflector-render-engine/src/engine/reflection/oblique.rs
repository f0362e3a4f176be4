//! Oblique near-plane clipping (Lengyel, "Oblique View Frustum Depth Projection and Clipping").
//!
//! The third row of a perspective projection is replaced so the near clip
//! plane coincides with an arbitrary view-space plane, here the reflector.
//! Geometry between the mirrored camera and the reflector is then clipped
//! instead of leaking into the reflection.

use crate::engine::reflection::math::sign;
use bevy::math::{Mat4, Vec4};

/// Rewrites the third row of `clip_from_view` so its near plane is `clip_plane`.
///
/// `clip_plane` is `(normal.xyz, distance)` in view space, with the visible
/// half-space on the normal side. Returns the scaled plane written into the
/// matrix.
///
/// `clip_from_view` must be a GL-convention perspective projection with
/// non-zero elements 0, 5 and 14. A singular matrix yields a meaningless
/// result; this is a precondition, not a checked error.
pub fn apply_oblique_clip_plane(clip_from_view: &mut Mat4, clip_plane: Vec4, clip_bias: f32) -> Vec4 {
    let m = clip_from_view.to_cols_array();

    // Clip-space corner opposite the plane, taken back to view space.
    let q = Vec4::new(
        (sign(clip_plane.x) + m[8]) / m[0],
        (sign(clip_plane.y) + m[9]) / m[5],
        -1.0,
        (1.0 + m[10]) / m[14],
    );

    let scaled = clip_plane * (2.0 / clip_plane.dot(q));

    clip_from_view.x_axis.z = scaled.x;
    clip_from_view.y_axis.z = scaled.y;
    clip_from_view.z_axis.z = scaled.z + 1.0 - clip_bias;
    clip_from_view.w_axis.z = scaled.w;

    scaled
}

/// Maps GL clip depth (`[-w, w]`, near at `-w`) to the reversed `[0, w]`
/// range used by the GPU depth buffer (near at `w`, far at `0`).
pub const GL_TO_REVERSE_Z: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, -0.5, 0.0, //
    0.0, 0.0, 0.5, 1.0, //
]);

/// GPU-ready copy of a GL-convention projection.
///
/// Only the depth row changes, so x, y and w (and every UV derived from
/// them) are identical to the GL matrix.
pub fn to_reverse_z(clip_from_view: &Mat4) -> Mat4 {
    GL_TO_REVERSE_Z * *clip_from_view
}

/// Near clip plane of a GL-convention projection as a view-space plane
/// `(row3 + row4)`. Points with a non-negative dot product are inside.
pub fn near_plane(clip_from_view: &Mat4) -> Vec4 {
    clip_from_view.row(2) + clip_from_view.row(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    const EPSILON: f32 = 1e-4;

    fn projection() -> Mat4 {
        Mat4::perspective_rh_gl(60f32.to_radians(), 1.6, 0.1, 100.0)
    }

    fn point_on_plane(plane: Vec4, x: f32, y: f32) -> Vec3 {
        // Solve for z on a plane with a non-zero z component.
        let z = -(plane.x * x + plane.y * y + plane.w) / plane.z;
        Vec3::new(x, y, z)
    }

    #[test]
    fn near_plane_coincides_with_clip_plane() {
        let clip_plane = Vec4::new(0.0, 0.6, 0.8, 4.0);
        let mut m = projection();

        apply_oblique_clip_plane(&mut m, clip_plane, 0.0);

        let near = near_plane(&m);
        for (x, y) in [(0.0, 0.0), (1.0, -2.0), (-3.0, 0.5), (2.5, 2.5)] {
            let p = point_on_plane(clip_plane, x, y);
            assert!(near.dot(p.extend(1.0)).abs() < EPSILON);
        }
    }

    #[test]
    fn biased_near_plane_meets_clip_plane_at_view_origin_depth() {
        let clip_plane = Vec4::new(0.2, 0.7, 0.68, 3.0).normalize();
        for bias in [0.0, 0.25, 0.5, 0.99] {
            let mut m = projection();
            apply_oblique_clip_plane(&mut m, clip_plane, bias);
            let near = near_plane(&m);

            // Points on the reflector plane with view z = 0 sit on both planes.
            let x = 1.5;
            let y = -(clip_plane.x * x + clip_plane.w) / clip_plane.y;
            let p = Vec4::new(x, y, 0.0, 1.0);
            assert!(clip_plane.dot(p).abs() < EPSILON);
            assert!(near.dot(p).abs() < EPSILON);
        }
    }

    #[test]
    fn only_the_depth_row_changes() {
        let before = projection();
        let mut m = before;
        apply_oblique_clip_plane(&mut m, Vec4::new(0.0, 1.0, 0.0, 2.0), 0.0);

        assert_eq!(m.row(0), before.row(0));
        assert_eq!(m.row(1), before.row(1));
        assert_eq!(m.row(3), before.row(3));
    }

    #[test]
    fn reverse_z_maps_near_to_one_and_far_to_zero() {
        let m = to_reverse_z(&projection());

        let near = m * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -100.0, 1.0);

        assert!((near.z / near.w - 1.0).abs() < EPSILON);
        assert!((far.z / far.w).abs() < EPSILON);
    }
}
