//! Mirrors the scene graph on the GPU and draws it in instanced batches.
//!
//! Every geometry in the scene is uploaded once as a [`Mesh`], every material
//! once as a [`Material`]. Each frame the visible nodes are grouped into
//! batches of equal geometry and material, their transforms are written to a
//! per-batch instance buffer, and each batch becomes one instanced draw.

use std::collections::HashMap;

use crate::data_structures::{
    instance::InstanceRaw,
    model::{DrawModel, Material, Mesh},
    scene_graph::{GeometryId, MaterialId, SceneGraph},
    texture::Texture,
};
use crate::pipelines::matcap::MatcapPipelines;

/// Instance buffer that grows to the largest batch it has seen.
#[derive(Debug)]
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

/// One instanced draw prepared by [`SceneRenderer::prepare`].
#[derive(Clone, Copy, Debug)]
struct Draw {
    geometry: GeometryId,
    material: MaterialId,
    amount: u32,
    wireframe: bool,
}

#[derive(Debug, Default)]
pub struct SceneRenderer {
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    /// Decoded matcaps by slot, kept for materials created later.
    matcaps: HashMap<usize, image::DynamicImage>,
    instances: HashMap<(GeometryId, MaterialId), InstanceBuffer>,
    material_revision: Option<u64>,
    draws: Vec<Draw>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a freshly loaded matcap to every material that samples `slot`.
    pub fn set_matcap(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        scene: &SceneGraph,
        slot: usize,
        image: image::DynamicImage,
    ) {
        for (material, params) in self.materials.iter_mut().zip(scene.materials()) {
            if params.matcap == slot && material.bound_slot != Some(slot) {
                let label = format!("matcap {slot}");
                let texture = Texture::from_image(device, queue, &image, Some(&label));
                material.set_matcap(device, texture, slot, layout);
                log::debug!("bound matcap {slot} to material {:?}", params.name);
            }
        }
        self.matcaps.insert(slot, image);
    }

    /// Uploads anything new in the scene and writes this frame's instances.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        scene: &SceneGraph,
    ) {
        for (idx, geometry) in scene.geometries().iter().enumerate().skip(self.meshes.len()) {
            self.meshes
                .push(Mesh::new(device, &format!("geometry {idx}"), geometry));
        }

        for params in scene.materials().iter().skip(self.materials.len()) {
            let (texture, slot) = match self.matcaps.get(&params.matcap) {
                Some(image) => (
                    Texture::from_image(device, queue, image, Some(&params.name)),
                    Some(params.matcap),
                ),
                None => (Texture::create_placeholder_matcap(device, queue), None),
            };
            self.materials.push(Material::new(
                device,
                &params.name,
                params,
                texture,
                slot,
                layout,
            ));
        }

        if self.material_revision != Some(scene.material_revision()) {
            for (material, params) in self.materials.iter().zip(scene.materials()) {
                material.write_params(queue, params);
            }
            self.material_revision = Some(scene.material_revision());
        }

        self.draws.clear();
        for batch in scene.batches() {
            let raw: Vec<InstanceRaw> = batch
                .nodes
                .iter()
                .filter_map(|id| scene.node(*id))
                .map(|node| node.transform.to_raw())
                .collect();
            if raw.is_empty() {
                continue;
            }
            let key = (batch.geometry, batch.material);
            let needs_alloc = self
                .instances
                .get(&key)
                .is_none_or(|buffer| buffer.capacity < raw.len());
            if needs_alloc {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("{key:?} Instance Buffer")),
                    size: (raw.len() * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                self.instances.insert(
                    key,
                    InstanceBuffer {
                        buffer,
                        capacity: raw.len(),
                    },
                );
            }
            if let Some(instances) = self.instances.get(&key) {
                queue.write_buffer(&instances.buffer, 0, bytemuck::cast_slice(&raw));
            }
            self.draws.push(Draw {
                geometry: batch.geometry,
                material: batch.material,
                amount: raw.len() as u32,
                wireframe: scene
                    .material(batch.material)
                    .is_some_and(|material| material.wireframe),
            });
        }
    }

    /// Records the draws of the last [`prepare`](Self::prepare).
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        pipelines: &MatcapPipelines,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        for draw in &self.draws {
            let (Some(mesh), Some(material), Some(instances)) = (
                self.meshes.get(draw.geometry.0),
                self.materials.get(draw.material.0),
                self.instances.get(&(draw.geometry, draw.material)),
            ) else {
                continue;
            };
            pass.set_vertex_buffer(1, instances.buffer.slice(..));
            if draw.wireframe {
                pass.set_pipeline(&pipelines.wireframe);
                pass.draw_mesh_lines_instanced(mesh, material, 0..draw.amount, camera_bind_group);
            } else {
                pass.set_pipeline(&pipelines.fill);
                pass.draw_mesh_instanced(mesh, material, 0..draw.amount, camera_bind_group);
            }
        }
    }

    /// Matcap slot bound to `material`, `None` while it shows the placeholder.
    pub fn bound_matcap(&self, material: MaterialId) -> Option<usize> {
        self.materials
            .get(material.0)
            .and_then(|material| material.bound_slot)
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}
