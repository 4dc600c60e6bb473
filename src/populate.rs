//! Scatters the primitive shapes around the origin.

use std::f32::consts::PI;

use cgmath::Vector3;
use rand::Rng;

use crate::config::{PrimitiveKind, SceneConfig};
use crate::data_structures::{
    geometry::Geometry,
    instance::Instance,
    scene_graph::{GeometryId, MaterialId, MaterialParams, NodeId, NodeKind, SceneGraph},
};

/// Shared geometry, shared material and the nodes of one primitive kind.
#[derive(Clone, Debug)]
pub struct KindHandles {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub nodes: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct PrimitiveHandles {
    pub torus: KindHandles,
    pub sphere: KindHandles,
    pub plane: KindHandles,
}

impl PrimitiveHandles {
    pub fn get(&self, kind: PrimitiveKind) -> &KindHandles {
        match kind {
            PrimitiveKind::Torus => &self.torus,
            PrimitiveKind::Sphere => &self.sphere,
            PrimitiveKind::Plane => &self.plane,
        }
    }

    /// Nodes the render loop rotates every frame.
    pub fn spinning(&self) -> impl Iterator<Item = NodeId> + '_ {
        PrimitiveKind::ALL
            .into_iter()
            .filter(|kind| kind.spins())
            .flat_map(|kind| self.get(kind).nodes.iter().copied())
    }
}

fn register(scene: &mut SceneGraph, config: &SceneConfig, kind: PrimitiveKind) -> KindHandles {
    let geometry = match kind {
        PrimitiveKind::Torus => Geometry::torus(&config.torus_dims),
        PrimitiveKind::Sphere => Geometry::sphere(&config.sphere_dims),
        PrimitiveKind::Plane => Geometry::plane(config.plane_size),
    };
    let name = match kind {
        PrimitiveKind::Torus => "torus",
        PrimitiveKind::Sphere => "sphere",
        PrimitiveKind::Plane => "plane",
    };
    KindHandles {
        geometry: scene.add_geometry(geometry),
        material: scene.add_material(MaterialParams::new(name, config.primitive(kind).matcap)),
        nodes: Vec::with_capacity(config.primitive_count),
    }
}

fn symmetric<R: Rng>(rng: &mut R, half_extent: f32) -> f32 {
    let half_extent = half_extent.abs();
    rng.gen_range(-half_extent..=half_extent)
}

fn random_instance<R: Rng>(rng: &mut R, half_extent: Vector3<f32>) -> Instance {
    let position = Vector3::new(
        symmetric(rng, half_extent.x),
        symmetric(rng, half_extent.y),
        symmetric(rng, half_extent.z),
    );
    let rotation = Vector3::new(rng.gen_range(0.0..=PI), rng.gen_range(0.0..=PI), 0.0);
    let scale: f32 = rng.gen_range(0.0..1.0);
    Instance {
        position,
        rotation,
        scale: Vector3::new(scale, scale, scale),
    }
}

/// Adds `primitive_count` nodes of every kind, interleaved torus, sphere, plane.
pub fn populate<R: Rng>(
    scene: &mut SceneGraph,
    config: &SceneConfig,
    rng: &mut R,
) -> PrimitiveHandles {
    let mut handles = PrimitiveHandles {
        torus: register(scene, config, PrimitiveKind::Torus),
        sphere: register(scene, config, PrimitiveKind::Sphere),
        plane: register(scene, config, PrimitiveKind::Plane),
    };

    for _ in 0..config.primitive_count {
        for kind in PrimitiveKind::ALL {
            let transform = random_instance(rng, config.primitive(kind).half_extent);
            let slot = match kind {
                PrimitiveKind::Torus => &mut handles.torus,
                PrimitiveKind::Sphere => &mut handles.sphere,
                PrimitiveKind::Plane => &mut handles.plane,
            };
            let node = scene.add_node(
                NodeKind::Primitive(kind),
                slot.geometry,
                slot.material,
                transform,
            );
            slot.nodes.push(node);
        }
    }
    log::info!(
        "populated {} primitives of each kind",
        config.primitive_count
    );
    handles
}
