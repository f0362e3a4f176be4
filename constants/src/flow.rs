use bevy::math::Vec2;

/// Flow phase advance per second.
pub const FLOW_SPEED: f32 = 100.0;

/// Length of one flow cycle. The two ripple layers are half a cycle apart.
pub const FLOW_CYCLE: f32 = 1.0;

/// Direction the ripple normal maps scroll in.
pub const FLOW_DIRECTION: Vec2 = Vec2::new(-0.8, 0.3);

/// Scale of the UV displacement produced by the ripple normal.
pub const RIPPLE_DISTORTION: f32 = 0.05;
