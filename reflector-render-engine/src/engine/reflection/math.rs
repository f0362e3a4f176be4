use bevy::math::{Mat3, Mat4, Vec3, Vec4};

/// Reflects `v` off a surface with unit `normal`: `v - 2 (v·n) n`.
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}

/// Mirror image of `v` across the plane through the origin with unit `normal`.
///
/// This is the reflect-and-negate pair used to carry camera-relative vectors
/// to the far side of the reflector.
pub fn mirror(v: Vec3, normal: Vec3) -> Vec3 {
    -reflect(v, normal)
}

/// Translation part of an affine world matrix.
pub fn matrix_position(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

/// Rotation part of an affine matrix with any scale removed from its basis.
pub fn extract_rotation(m: &Mat4) -> Mat4 {
    let basis = Mat3::from_mat4(*m);
    Mat4::from_mat3(Mat3::from_cols(
        basis.x_axis.normalize_or_zero(),
        basis.y_axis.normalize_or_zero(),
        basis.z_axis.normalize_or_zero(),
    ))
}

/// Sign with zero mapped to zero.
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// World matrix of a camera at `eye` looking at `target`, `-Z` forward.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z = (eye - target).try_normalize().unwrap_or(Vec3::Z);
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);

    Mat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        eye.extend(1.0),
    )
}

/// Plane `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            constant: 0.0,
        }
    }
}

impl Plane {
    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Signed distance of `point` from the plane, positive on the normal side.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    pub fn coplanar_point(&self) -> Vec3 {
        self.normal * -self.constant
    }

    /// The plane carried through an affine transform.
    ///
    /// The normal goes through the inverse transpose so non-uniform scale
    /// keeps it perpendicular to the surface.
    pub fn transformed(&self, m: &Mat4) -> Self {
        let normal_matrix = Mat3::from_mat4(*m).inverse().transpose();
        let reference_point = m.transform_point3(self.coplanar_point());
        let normal = (normal_matrix * self.normal).normalize();

        Self {
            normal,
            constant: -reference_point.dot(normal),
        }
    }

    /// `(normal.xyz, constant)` for use in clip-space algebra.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn mirror_flips_the_normal_component_only() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        let mirrored = mirror(v, Vec3::Y);
        assert!((mirrored - Vec3::new(-1.0, -2.0, -3.0)).length() < EPSILON);
        assert!((reflect(v, Vec3::Y) - Vec3::new(1.0, 2.0, 3.0)).length() < EPSILON);
    }

    #[test]
    fn extract_rotation_drops_scale() {
        let m = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 4.0),
            bevy::math::Quat::from_rotation_y(0.7),
            Vec3::new(5.0, 6.0, 7.0),
        );
        let rotation = extract_rotation(&m);
        let expected = Mat4::from_quat(bevy::math::Quat::from_rotation_y(0.7));
        assert!(rotation.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn look_at_points_negative_z_at_target() {
        let world = look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let forward = -world.z_axis.truncate();
        assert!((forward - Vec3::NEG_Z).length() < EPSILON);
        assert!((matrix_position(&world) - Vec3::new(0.0, 0.0, 10.0)).length() < EPSILON);
    }

    #[test]
    fn plane_transform_keeps_points_on_the_plane() {
        let plane = Plane::from_normal_and_coplanar_point(Vec3::Y, Vec3::new(0.0, -3.0, 0.0));
        let m = Mat4::from_rotation_translation(
            bevy::math::Quat::from_rotation_x(0.4),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let moved = plane.transformed(&m);
        let point = m.transform_point3(Vec3::new(4.0, -3.0, -2.0));
        assert!(moved.distance_to_point(point).abs() < 1e-4);
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(2.0), 1.0);
    }
}
