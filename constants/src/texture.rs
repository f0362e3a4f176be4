use bevy::math::Vec2;

/// Default reflection render target width. Power-of-two sizes keep mipmaps.
pub const REFLECTION_TEXTURE_WIDTH: u32 = 512;

/// Default reflection render target height.
pub const REFLECTION_TEXTURE_HEIGHT: u32 = 512;

/// Tiling applied to every surface texture (base maps and ripple normal maps).
pub const SURFACE_TEXTURE_REPEAT: Vec2 = Vec2::new(4.0, 4.0);

/// Base colour, ambient occlusion, height, normal and roughness maps, in that order.
pub const SURFACE_TEXTURE_PATHS: [&str; 5] = [
    "textures/BASE.jpg",
    "textures/AO.jpg",
    "textures/HEIGHT.png",
    "textures/NORMAL.jpg",
    "textures/ROUGHNESS.jpg",
];

/// The two scrolling normal maps cross-faded by the flow state.
pub const RIPPLE_NORMAL_MAP_PATHS: [&str; 2] = ["textures/Water_1.jpg", "textures/Water_2.jpg"];
