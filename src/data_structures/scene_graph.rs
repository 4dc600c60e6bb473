//! Scene graph: the ordered collection of everything that gets drawn.
//!
//! Geometry and material state is kept in flyweight registries. Nodes only
//! carry their own transform and visibility and point into the registries by
//! handle, so 80 toruses share one mesh and one material.

use crate::{
    config::PrimitiveKind,
    data_structures::{geometry::Geometry, instance::Instance},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Primitive(PrimitiveKind),
    Text,
}

/// CPU-side state of a matcap material. The renderer mirrors it to the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialParams {
    pub name: String,
    /// Index into the configured matcap list.
    pub matcap: usize,
    /// Linear RGB multiplier applied to the matcap sample.
    pub color: [f32; 3],
    pub wireframe: bool,
}

impl MaterialParams {
    pub fn new(name: &str, matcap: usize) -> Self {
        Self {
            name: name.to_string(),
            matcap,
            color: [1.0, 1.0, 1.0],
            wireframe: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub transform: Instance,
    pub visible: bool,
}

/// A run of visible nodes sharing geometry and material, drawn with one
/// instanced call.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    geometries: Vec<Geometry>,
    materials: Vec<MaterialParams>,
    nodes: Vec<Node>,
    /// Bumped whenever a material changes so the renderer knows to re-upload.
    material_revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_material(&mut self, material: MaterialParams) -> MaterialId {
        self.materials.push(material);
        self.material_revision += 1;
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_node(
        &mut self,
        kind: NodeKind,
        geometry: GeometryId,
        material: MaterialId,
        transform: Instance,
    ) -> NodeId {
        debug_assert!(geometry.0 < self.geometries.len());
        debug_assert!(material.0 < self.materials.len());
        self.nodes.push(Node {
            kind,
            geometry,
            material,
            transform,
            visible: true,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn material(&self, id: MaterialId) -> Option<&MaterialParams> {
        self.materials.get(id.0)
    }

    /// Mutable access marks the material as changed.
    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut MaterialParams> {
        self.material_revision += 1;
        self.materials.get_mut(id.0)
    }

    pub fn materials(&self) -> &[MaterialParams] {
        &self.materials
    }

    pub fn material_revision(&self) -> u64 {
        self.material_revision
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    /// Groups visible nodes by (geometry, material), in order of first appearance.
    pub fn batches(&self) -> Vec<Batch> {
        let mut batches: Vec<Batch> = Vec::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            if !node.visible {
                continue;
            }
            match batches
                .iter_mut()
                .find(|batch| batch.geometry == node.geometry && batch.material == node.material)
            {
                Some(batch) => batch.nodes.push(NodeId(idx)),
                None => batches.push(Batch {
                    geometry: node.geometry,
                    material: node.material,
                    nodes: vec![NodeId(idx)],
                }),
            }
        }
        batches
    }
}
