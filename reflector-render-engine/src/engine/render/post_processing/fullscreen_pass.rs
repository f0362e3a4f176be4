//! Shared plumbing for single-draw fullscreen effects that read the view's
//! current colour and write the next post-process target.

use std::marker::PhantomData;

use bevy::{
    core_pipeline::{
        core_3d::graph::Core3d, fullscreen_vertex_shader::fullscreen_shader_vertex_state,
    },
    ecs::query::QueryItem,
    prelude::*,
    render::{
        RenderApp,
        extract_component::{
            ComponentUniforms, DynamicUniformIndex, ExtractComponent, ExtractComponentPlugin,
            UniformComponentPlugin,
        },
        render_graph::{
            NodeRunError, RenderGraphApp, RenderGraphContext, RenderLabel, ViewNode, ViewNodeRunner,
        },
        render_resource::{
            binding_types::{sampler, texture_2d, uniform_buffer},
            encase::{ShaderSize, internal::WriteInto},
            *,
        },
        renderer::{RenderContext, RenderDevice},
        view::ViewTarget,
    },
};

/// Per-camera settings component of a fullscreen effect. Cameras without it
/// skip the pass.
pub trait FullscreenEffect:
    Component + ExtractComponent<Out = Self> + ShaderType + ShaderSize + WriteInto + Clone + Copy
{
    const NAME: &'static str;
    const SHADER_PATH: &'static str;
}

/// Registers extraction, uniforms, the render-graph node and its pipeline for `E`.
///
/// Edges are left to the caller so several effects can be chained in one call.
pub struct FullscreenEffectPlugin<E, L> {
    label: L,
    _effect: PhantomData<fn() -> E>,
}

impl<E, L> FullscreenEffectPlugin<E, L> {
    pub fn new(label: L) -> Self {
        Self {
            label,
            _effect: PhantomData,
        }
    }
}

impl<E: FullscreenEffect, L: RenderLabel + Clone> Plugin for FullscreenEffectPlugin<E, L> {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ExtractComponentPlugin::<E>::default(),
            UniformComponentPlugin::<E>::default(),
        ));

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app.add_render_graph_node::<ViewNodeRunner<FullscreenEffectNode<E>>>(
            Core3d,
            self.label.clone(),
        );
    }

    fn finish(&self, app: &mut App) {
        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app.init_resource::<FullscreenEffectPipeline<E>>();
    }
}

pub struct FullscreenEffectNode<E>(PhantomData<fn() -> E>);

impl<E> Default for FullscreenEffectNode<E> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<E: FullscreenEffect> ViewNode for FullscreenEffectNode<E> {
    type ViewQuery = (
        &'static ViewTarget,
        &'static E,
        &'static DynamicUniformIndex<E>,
    );

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (view_target, _settings, settings_index): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let effect_pipeline = world.resource::<FullscreenEffectPipeline<E>>();
        let pipeline_cache = world.resource::<PipelineCache>();

        let pipeline_id = if view_target.is_hdr() {
            effect_pipeline.hdr_pipeline_id
        } else {
            effect_pipeline.ldr_pipeline_id
        };
        let Some(pipeline) = pipeline_cache.get_render_pipeline(pipeline_id) else {
            return Ok(());
        };

        let settings_uniforms = world.resource::<ComponentUniforms<E>>();
        let Some(settings_binding) = settings_uniforms.uniforms().binding() else {
            return Ok(());
        };

        let post_process = view_target.post_process_write();

        let bind_group = render_context.render_device().create_bind_group(
            E::NAME,
            &effect_pipeline.layout,
            &BindGroupEntries::sequential((
                post_process.source,
                &effect_pipeline.sampler,
                settings_binding.clone(),
            )),
        );

        let mut render_pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
            label: Some(E::NAME),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: post_process.destination,
                resolve_target: None,
                ops: Operations::default(),
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_render_pipeline(pipeline);
        render_pass.set_bind_group(0, &bind_group, &[settings_index.index()]);
        render_pass.draw(0..3, 0..1);

        Ok(())
    }
}

#[derive(Resource)]
pub struct FullscreenEffectPipeline<E> {
    layout: BindGroupLayout,
    sampler: Sampler,
    ldr_pipeline_id: CachedRenderPipelineId,
    hdr_pipeline_id: CachedRenderPipelineId,
    _effect: PhantomData<fn() -> E>,
}

impl<E: FullscreenEffect> FromWorld for FullscreenEffectPipeline<E> {
    fn from_world(world: &mut World) -> Self {
        let render_device = world.resource::<RenderDevice>();

        let layout = render_device.create_bind_group_layout(
            E::NAME,
            &BindGroupLayoutEntries::sequential(
                ShaderStages::FRAGMENT,
                (
                    texture_2d(TextureSampleType::Float { filterable: true }),
                    sampler(SamplerBindingType::Filtering),
                    uniform_buffer::<E>(true),
                ),
            ),
        );

        let sampler = render_device.create_sampler(&SamplerDescriptor {
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            ..default()
        });

        let shader: Handle<Shader> = world.load_asset(E::SHADER_PATH);

        let mut pipeline_cache = world.resource_mut::<PipelineCache>();
        let mut queue = |format: TextureFormat| {
            pipeline_cache.queue_render_pipeline(RenderPipelineDescriptor {
                label: Some(E::NAME.into()),
                layout: vec![layout.clone()],
                vertex: fullscreen_shader_vertex_state(),
                fragment: Some(FragmentState {
                    shader: shader.clone(),
                    shader_defs: vec![],
                    entry_point: "fragment".into(),
                    targets: vec![Some(ColorTargetState {
                        format,
                        blend: None,
                        write_mask: ColorWrites::ALL,
                    })],
                }),
                primitive: PrimitiveState::default(),
                depth_stencil: None,
                multisample: MultisampleState::default(),
                push_constant_ranges: vec![],
                zero_initialize_workgroup_memory: false,
            })
        };

        let ldr_pipeline_id = queue(TextureFormat::bevy_default());
        let hdr_pipeline_id = queue(ViewTarget::TEXTURE_FORMAT_HDR);

        Self {
            layout,
            sampler,
            ldr_pipeline_id,
            hdr_pipeline_id,
            _effect: PhantomData,
        }
    }
}
