use crate::data_structures::{
    instance::InstanceRaw,
    model::{self, Vertex},
    texture::Texture,
};
use crate::pipelines::mk_render_pipeline;

/// Filled and wireframe variants of the matcap pipeline. Both share one
/// layout, so a material's bind group works with either.
#[derive(Debug)]
pub struct MatcapPipelines {
    pub fill: wgpu::RenderPipeline,
    pub wireframe: wgpu::RenderPipeline,
    pub material_layout: wgpu::BindGroupLayout,
}

impl MatcapPipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let material_layout = model::matcap_layout(device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Matcap Pipeline Layout"),
            bind_group_layouts: &[camera_bind_group_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Matcap Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("matcap.wgsl").into()),
        });
        let blend = Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        });
        let vertex_layouts = [model::ModelVertex::desc(), InstanceRaw::desc()];

        let fill = mk_render_pipeline(
            device,
            "Matcap Fill Pipeline",
            &layout,
            config.format,
            blend,
            Some(Texture::DEPTH_FORMAT),
            &vertex_layouts,
            &shader,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let wireframe = mk_render_pipeline(
            device,
            "Matcap Wireframe Pipeline",
            &layout,
            config.format,
            blend,
            Some(Texture::DEPTH_FORMAT),
            &vertex_layouts,
            &shader,
            wgpu::PrimitiveTopology::LineList,
        );

        Self {
            fill,
            wireframe,
            material_layout,
        }
    }
}
