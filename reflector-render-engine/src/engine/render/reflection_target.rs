use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};

use crate::engine::assets::reflector_config::ReflectorConfig;

/// Size and mip policy of the offscreen reflection image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionTargetDescriptor {
    pub width: u32,
    pub height: u32,
    /// Only power-of-two sizes get a mip chain.
    pub generate_mipmaps: bool,
}

impl ReflectionTargetDescriptor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            generate_mipmaps: width.is_power_of_two() && height.is_power_of_two(),
        }
    }

    pub fn mip_level_count(&self) -> u32 {
        if self.generate_mipmaps {
            32 - self.width.max(self.height).leading_zeros()
        } else {
            1
        }
    }

    pub fn extent(&self) -> Extent3d {
        Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// A cleared, linearly filtered image usable as a camera render target.
    ///
    /// The attachment itself stays single-level; `mip_level_count` only
    /// records what a mip-capable backend would allocate.
    pub fn create_image(&self) -> Image {
        let mut image = Image::new_fill(
            self.extent(),
            TextureDimension::D2,
            &[0, 0, 0, 0],
            TextureFormat::Bgra8UnormSrgb,
            RenderAssetUsages::default(),
        );
        image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
            | TextureUsages::COPY_DST
            | TextureUsages::RENDER_ATTACHMENT;
        image.sampler = ImageSampler::linear();
        image
    }
}

/// The persistent reflection image sampled by the reflector material.
///
/// The image is allocated with a single mip level and no mips are generated
/// after the reflection render, so the material always samples level 0.
/// [`ReflectionTargetDescriptor::mip_level_count`] is the chain size a
/// power-of-two target would want, kept for logging.
#[derive(Resource, Debug, Clone)]
pub struct ReflectionTarget {
    pub image: Handle<Image>,
    pub descriptor: ReflectionTargetDescriptor,
}

impl ReflectionTarget {
    pub fn create(images: &mut Assets<Image>, descriptor: ReflectionTargetDescriptor) -> Self {
        if !descriptor.generate_mipmaps {
            info!(
                "Reflection target {}x{} is not a power of two, mipmaps disabled",
                descriptor.width, descriptor.height
            );
        }
        Self {
            image: images.add(descriptor.create_image()),
            descriptor,
        }
    }
}

/// Recreates the reflection image in place when the configured size changes.
///
/// The handle is kept, so the camera target and material binding follow
/// without being touched.
pub fn sync_reflection_target_size(
    config: Res<ReflectorConfig>,
    mut target: ResMut<ReflectionTarget>,
    mut images: ResMut<Assets<Image>>,
) {
    if !config.is_changed() {
        return;
    }

    let descriptor = ReflectionTargetDescriptor::new(config.texture_width, config.texture_height);
    if descriptor == target.descriptor {
        return;
    }

    let Some(image) = images.get_mut(&target.image) else {
        warn!("Reflection target image missing, cannot resize");
        return;
    };

    *image = descriptor.create_image();
    info!(
        "Reflection target recreated at {}x{} (single level, {} mips wanted)",
        descriptor.width,
        descriptor.height,
        descriptor.mip_level_count()
    );
    target.descriptor = descriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_enables_mipmaps() {
        let descriptor = ReflectionTargetDescriptor::new(512, 512);
        assert!(descriptor.generate_mipmaps);
        assert_eq!(descriptor.mip_level_count(), 10);
    }

    #[test]
    fn non_power_of_two_disables_mipmaps() {
        let descriptor = ReflectionTargetDescriptor::new(500, 500);
        assert!(!descriptor.generate_mipmaps);
        assert_eq!(descriptor.mip_level_count(), 1);

        assert!(!ReflectionTargetDescriptor::new(512, 300).generate_mipmaps);
    }

    #[test]
    fn image_is_allocated_single_level() {
        let descriptor = ReflectionTargetDescriptor::new(512, 512);
        let image = descriptor.create_image();

        assert_eq!(descriptor.mip_level_count(), 10);
        assert_eq!(image.texture_descriptor.mip_level_count, 1);
    }

    #[test]
    fn image_is_a_render_attachment() {
        let image = ReflectionTargetDescriptor::new(64, 32).create_image();
        assert_eq!(image.width(), 64);
        assert_eq!(image.height(), 32);
        assert!(
            image
                .texture_descriptor
                .usage
                .contains(TextureUsages::RENDER_ATTACHMENT)
        );
    }
}
