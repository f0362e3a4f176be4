/// Bias subtracted from the oblique near plane. Zero clips exactly at the surface.
pub const CLIP_BIAS: f32 = 0.0;

/// Strength of the reflected contribution added to the surface diffuse colour.
pub const REFLECTOR_OPACITY: f32 = 0.2;

/// Depth-of-field focus distance, normalised to the reflection camera far plane.
pub const DOF_FOCUS_DISTANCE: f32 = 0.3;

/// Depth-of-field focal length, normalised. Larger values widen the sharp band.
pub const DOF_FOCAL_LENGTH: f32 = 0.6;

/// Bokeh kernel scale of the reflection blur.
pub const DOF_BOKEH_SCALE: f32 = 3.0;

/// Render layer holding everything except the reflector surface.
pub const SCENE_LAYER: usize = 0;

/// Render layer holding the reflector surface. The reflection camera never sees it.
pub const REFLECTOR_LAYER: usize = 1;
