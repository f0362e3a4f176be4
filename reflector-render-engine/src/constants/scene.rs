use bevy::math::Vec3;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Every prop is parented under a group shifted back along Z.
pub const SCENE_GROUP_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -5.0);

pub const TOTEM_SIZE: Vec3 = Vec3::new(1.0, 6.0, 1.0);
pub const TOTEM_X_POSITIONS: [f32; 3] = [-4.0, 0.0, 4.0];

pub const SPHERE_RADIUS: f32 = 0.2;

pub const FLOOR_RADIUS: f32 = 12.0;
/// Just below the totem bases to avoid z-fighting.
pub const FLOOR_HEIGHT: f32 = -3.001;

pub const SPOT_LIGHT_POSITION: Vec3 = Vec3::new(20.0, 20.0, 10.0);
pub const SPOT_LIGHT_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
pub const SPOT_LIGHT_RANGE: f32 = 100.0;
/// Ambient intensity 0.3 in Bevy's ambient brightness units.
pub const AMBIENT_BRIGHTNESS: f32 = 300.0;

pub const SURFACE_METALLIC: f32 = 0.8;
pub const SURFACE_ROUGHNESS: f32 = 0.3;
pub const SURFACE_CLEARCOAT: f32 = 0.5;
