pub const REFLECTOR_CONFIG_PATH: &str = "config/reflector.json";

pub const REFLECTOR_SHADER_PATH: &str = "shaders/reflector_material.wgsl";
pub const COLOR_NOISE_SHADER_PATH: &str = "shaders/color_noise.wgsl";
pub const CHROMATIC_ABERRATION_SHADER_PATH: &str = "shaders/chromatic_aberration.wgsl";
