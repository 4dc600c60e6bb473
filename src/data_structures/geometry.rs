//! CPU-side triangle geometry and the primitive shape generators.
//!
//! Geometry stays on the CPU until the renderer uploads it; the scene graph
//! stores each one once and lets any number of nodes reference it.

use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3};

use crate::config::{SphereDims, TorusDims};
use crate::data_structures::model::ModelVertex;

/// Axis-aligned bounds of a geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<ModelVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first: Vector3<f32> = self.vertices.first()?.position.into();
        let bounds = self.vertices.iter().fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |bounds, vertex| {
                let p: Vector3<f32> = vertex.position.into();
                BoundingBox {
                    min: Vector3::new(
                        bounds.min.x.min(p.x),
                        bounds.min.y.min(p.y),
                        bounds.min.z.min(p.z),
                    ),
                    max: Vector3::new(
                        bounds.max.x.max(p.x),
                        bounds.max.y.max(p.y),
                        bounds.max.z.max(p.z),
                    ),
                }
            },
        );
        Some(bounds)
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        for vertex in &mut self.vertices {
            let p: Vector3<f32> = vertex.position.into();
            vertex.position = (p + offset).into();
        }
    }

    /// Moves the geometry so its bounding box is centered on the origin.
    pub fn center(&mut self) {
        if let Some(bounds) = self.bounding_box() {
            self.translate(-bounds.center());
        }
    }

    /// Unique triangle edges as a line list, used for wireframe drawing.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for triangle in self.indices.chunks_exact(3) {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }
        lines
    }

    pub fn torus(dims: &TorusDims) -> Self {
        let radial = dims.radial_segments.max(3);
        let tubular = dims.tubular_segments.max(3);
        let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let position = Vector3::new(
                    (dims.radius + dims.tube * v.cos()) * u.cos(),
                    (dims.radius + dims.tube * v.cos()) * u.sin(),
                    dims.tube * v.sin(),
                );
                let ring_center = Vector3::new(dims.radius * u.cos(), dims.radius * u.sin(), 0.0);
                let normal = (position - ring_center).normalize();
                vertices.push(ModelVertex {
                    position: position.into(),
                    normal: normal.into(),
                });
            }
        }

        for j in 1..=radial {
            for i in 1..=tubular {
                let a = (tubular + 1) * j + i - 1;
                let b = (tubular + 1) * (j - 1) + i - 1;
                let c = (tubular + 1) * (j - 1) + i;
                let d = (tubular + 1) * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self::new(vertices, indices)
    }

    pub fn sphere(dims: &SphereDims) -> Self {
        let segments = dims.width_segments.max(3);
        let rings = dims.height_segments.max(2);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();

                vertices.push(ModelVertex {
                    position: [x * dims.radius, y * dims.radius, z * dims.radius],
                    normal: [x, y, z],
                });
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = ring * (segments + 1) + seg;
                let next = current + segments + 1;

                indices.extend_from_slice(&[current, current + 1, next]);
                indices.extend_from_slice(&[current + 1, next + 1, next]);
            }
        }

        Self::new(vertices, indices)
    }

    /// A square in the XY plane facing +Z. Both faces are emitted so the plane
    /// is visible from behind with back-face culling enabled.
    pub fn plane(size: f32) -> Self {
        let half = size * 0.5;
        let corners = [
            [-half, -half, 0.0],
            [half, -half, 0.0],
            [half, half, 0.0],
            [-half, half, 0.0],
        ];
        let front = corners.iter().map(|&position| ModelVertex {
            position,
            normal: [0.0, 0.0, 1.0],
        });
        let back = corners.iter().map(|&position| ModelVertex {
            position,
            normal: [0.0, 0.0, -1.0],
        });
        let vertices = front.chain(back).collect();
        let indices = vec![0, 1, 2, 2, 3, 0, 4, 6, 5, 6, 4, 7];

        Self::new(vertices, indices)
    }
}
