use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;

use constants::texture::{RIPPLE_NORMAL_MAP_PATHS, SURFACE_TEXTURE_PATHS};

/// Tileable textures of the reflective floor.
#[derive(Resource, Debug, Clone, Default)]
pub struct SurfaceTextures {
    pub base_color: Handle<Image>,
    pub occlusion: Handle<Image>,
    /// Loaded with the set but unused: vertex displacement is not supported.
    pub height: Handle<Image>,
    pub normal: Handle<Image>,
    pub roughness: Handle<Image>,
    pub ripple_normals: [Handle<Image>; 2],
}

impl SurfaceTextures {
    pub fn all_mut(&mut self) -> [&mut Handle<Image>; 7] {
        let [ripple_a, ripple_b] = &mut self.ripple_normals;
        [
            &mut self.base_color,
            &mut self.occlusion,
            &mut self.height,
            &mut self.normal,
            &mut self.roughness,
            ripple_a,
            ripple_b,
        ]
    }
}

/// Repeat addressing on both axes so the 4×4 UV tiling wraps.
pub fn repeat_sampler() -> ImageSampler {
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    })
}

fn load_tileable(asset_server: &AssetServer, path: &'static str, is_srgb: bool) -> Handle<Image> {
    asset_server.load_with_settings(path, move |settings: &mut ImageLoaderSettings| {
        settings.sampler = repeat_sampler();
        settings.is_srgb = is_srgb;
    })
}

pub fn load_surface_textures(asset_server: &AssetServer) -> SurfaceTextures {
    let [base, ao, height, normal, roughness] = SURFACE_TEXTURE_PATHS;
    let [ripple_a, ripple_b] = RIPPLE_NORMAL_MAP_PATHS;

    // Only the base colour is authored in sRGB.
    SurfaceTextures {
        base_color: load_tileable(asset_server, base, true),
        occlusion: load_tileable(asset_server, ao, false),
        height: load_tileable(asset_server, height, false),
        normal: load_tileable(asset_server, normal, false),
        roughness: load_tileable(asset_server, roughness, false),
        ripple_normals: [
            load_tileable(asset_server, ripple_a, false),
            load_tileable(asset_server, ripple_b, false),
        ],
    }
}
