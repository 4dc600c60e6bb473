#![cfg(feature = "integration-tests")]

mod common;

use common::test_utils::{demo_800x600, fixture_font};
use matcap_text::camera::CameraResources;
use matcap_text::data_structures::texture::Texture;
use matcap_text::pipelines::matcap::MatcapPipelines;
use matcap_text::render::SceneRenderer;

const SIZE: u32 = 64;
const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

async fn device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await?;
    adapter
        .request_device(&wgpu::DeviceDescriptor::default(), None)
        .await
        .ok()
}

#[test]
fn should_draw_the_scene_offscreen() {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let Some((device, queue)) = runtime.block_on(device()) else {
        eprintln!("no graphics adapter, skipping");
        return;
    };

    let mut demo = demo_800x600();
    demo.on_font_resolved(&fixture_font())
        .expect("text builds");
    let text = demo.text_node().expect("text node");
    let material = demo.scene.node(text).expect("text").material;
    demo.scene
        .material_mut(material)
        .expect("text material")
        .wireframe = true;

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: FORMAT,
        width: SIZE,
        height: SIZE,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    let mut camera = CameraResources::new(&device);
    let pipelines = MatcapPipelines::new(&device, &config, &camera.bind_group_layout);
    let mut renderer = SceneRenderer::new();

    renderer.prepare(&device, &queue, &pipelines.material_layout, &demo.scene);
    camera.write(&queue, &demo.camera, &mut demo.projection);
    // Three primitive batches and the text.
    assert_eq!(renderer.draw_count(), 4);

    let slot = demo.scene.material(material).expect("text material").matcap;
    assert_eq!(renderer.bound_matcap(material), None);
    let matcap = image::DynamicImage::new_rgba8(2, 2);
    renderer.set_matcap(
        &device,
        &queue,
        &pipelines.material_layout,
        &demo.scene,
        slot,
        matcap.clone(),
    );
    assert_eq!(renderer.bound_matcap(material), Some(slot));
    // A repeated load of the same slot keeps the existing binding.
    renderer.set_matcap(
        &device,
        &queue,
        &pipelines.material_layout,
        &demo.scene,
        slot,
        matcap,
    );
    assert_eq!(renderer.bound_matcap(material), Some(slot));

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [SIZE, SIZE], "depth");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("smoke encoder"),
    });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("smoke pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        renderer.draw(&mut pass, &pipelines, &camera.bind_group);
    }
    queue.submit(std::iter::once(encoder.finish()));
    device.poll(wgpu::Maintain::Wait);
}
