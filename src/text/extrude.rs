//! Extrusion of flattened glyph contours into a closed, bevelled solid.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Vector2, Vector3};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use crate::data_structures::{geometry::Geometry, model::ModelVertex};
use crate::text::{Contour, TextError, TextGeometryParams};

/// One ring of the extrusion: contours pushed outward by `offset` at depth `z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub offset: f32,
    pub z: f32,
}

/// Layers from the front cap to the back cap.
pub fn layers(params: &TextGeometryParams) -> Vec<Layer> {
    if !params.bevel_enabled {
        return vec![
            Layer { offset: 0.0, z: 0.0 },
            Layer {
                offset: 0.0,
                z: params.depth,
            },
        ];
    }
    let segments = params.bevel_segments.max(1);
    let ring = |b: u32| {
        let t = b as f32 / segments as f32 * FRAC_PI_2;
        (
            params.bevel_offset + params.bevel_size * t.sin(),
            params.bevel_thickness * t.cos(),
        )
    };
    let full = params.bevel_size + params.bevel_offset;

    let mut layers = Vec::with_capacity(2 * segments as usize + 2);
    for b in 0..segments {
        let (offset, dz) = ring(b);
        layers.push(Layer { offset, z: -dz });
    }
    layers.push(Layer { offset: full, z: 0.0 });
    layers.push(Layer {
        offset: full,
        z: params.depth,
    });
    for b in (0..segments).rev() {
        let (offset, dz) = ring(b);
        layers.push(Layer {
            offset,
            z: params.depth + dz,
        });
    }
    layers
}

/// Twice the signed area; positive for counter-clockwise contours.
pub fn signed_area(contour: &[Vector2<f32>]) -> f32 {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let (a, b) = (contour[i], contour[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Reorients every contour so the filled region lies to the left of its
/// edges. The contour with the largest area decides which winding the font
/// uses for outer shapes.
pub fn orient(contours: &mut [Contour]) {
    let Some(reference) = contours
        .iter()
        .map(|c| signed_area(c))
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
    else {
        return;
    };
    if reference < 0.0 {
        for contour in contours.iter_mut() {
            contour.reverse();
        }
    }
}

/// Per-vertex outward directions, scaled so every edge moves by one unit.
fn bevel_directions(contour: &[Vector2<f32>]) -> Vec<Vector2<f32>> {
    let n = contour.len();
    let outward = |from: Vector2<f32>, to: Vector2<f32>| {
        let d = to - from;
        let len = d.magnitude();
        if len <= f32::EPSILON {
            Vector2::new(0.0, 0.0)
        } else {
            Vector2::new(d.y, -d.x) / len
        }
    };
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let here = contour[i];
            let next = contour[(i + 1) % n];
            let n1 = outward(prev, here);
            let n2 = outward(here, next);
            let sum = n1 + n2;
            if sum.magnitude2() <= 1e-8 {
                return n1;
            }
            let miter = sum.normalize();
            // Clamp the miter on sharp spikes.
            miter / miter.dot(n1).max(0.25)
        })
        .collect()
}

fn offset_contour(contour: &[Vector2<f32>], dirs: &[Vector2<f32>], offset: f32) -> Contour {
    contour
        .iter()
        .zip(dirs)
        .map(|(p, d)| *p + *d * offset)
        .collect()
}

/// Builds the solid for already oriented contours.
pub fn extrude(contours: &[Contour], params: &TextGeometryParams) -> Result<Geometry, TextError> {
    let layers = layers(params);
    let directions: Vec<Vec<Vector2<f32>>> =
        contours.iter().map(|c| bevel_directions(c)).collect();
    let mut geometry = Geometry::default();

    // Both caps use the outline of the first layer.
    let (front, back) = match (layers.first(), layers.last()) {
        (Some(front), Some(back)) => (*front, *back),
        _ => return Ok(geometry),
    };
    let cap: Vec<Contour> = contours
        .iter()
        .zip(&directions)
        .map(|(c, d)| offset_contour(c, d, front.offset))
        .collect();
    let triangles = tessellate(&cap)?;
    push_cap(&mut geometry, &triangles, front.z, false);
    push_cap(&mut geometry, &triangles, back.z, true);

    for (contour, dirs) in contours.iter().zip(&directions) {
        let rings: Vec<Vec<Vector3<f32>>> = layers
            .iter()
            .map(|layer| {
                offset_contour(contour, dirs, layer.offset)
                    .into_iter()
                    .map(|p| Vector3::new(p.x, p.y, layer.z))
                    .collect()
            })
            .collect();
        for pair in rings.windows(2) {
            push_walls(&mut geometry, &pair[0], &pair[1], contour);
        }
    }
    Ok(geometry)
}

/// Tessellated cap triangles, three points per triangle, counter-clockwise.
fn tessellate(contours: &[Contour]) -> Result<Vec<[Vector2<f32>; 3]>, TextError> {
    let mut builder = Path::builder();
    for contour in contours {
        let Some((first, rest)) = contour.split_first() else {
            continue;
        };
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::tolerance(0.0001).with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                vertex.position().to_array()
            }),
        )
        .map_err(|err| TextError::Tessellation(format!("{err:?}")))?;

    let vertex = |index: u32| {
        let [x, y] = buffers.vertices[index as usize];
        Vector2::new(x, y)
    };
    Ok(buffers
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let (a, b, c) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2]));
            if signed_area(&[a, b, c]) < 0.0 {
                [a, c, b]
            } else {
                [a, b, c]
            }
        })
        .collect())
}

fn push_cap(geometry: &mut Geometry, triangles: &[[Vector2<f32>; 3]], z: f32, facing_back: bool) {
    let normal = [0.0, 0.0, if facing_back { 1.0 } else { -1.0 }];
    for tri in triangles {
        let order = if facing_back { [0, 1, 2] } else { [0, 2, 1] };
        let base = geometry.vertices.len() as u32;
        for i in order {
            geometry.vertices.push(ModelVertex {
                position: [tri[i].x, tri[i].y, z],
                normal,
            });
        }
        geometry.indices.extend([base, base + 1, base + 2]);
    }
}

/// Side faces between two rings. Each quad gets its own vertices so the
/// facets are shaded flat.
fn push_walls(
    geometry: &mut Geometry,
    lower: &[Vector3<f32>],
    upper: &[Vector3<f32>],
    outline: &[Vector2<f32>],
) {
    let n = lower.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let (a, b, c, d) = (lower[i], lower[j], upper[j], upper[i]);
        let mut normal = (c - a).cross(d - b);
        if normal.magnitude2() <= 1e-12 {
            let edge = outline[j] - outline[i];
            normal = Vector3::new(edge.y, -edge.x, 0.0);
        }
        let normal = if normal.magnitude2() <= 1e-12 {
            [0.0, 0.0, 0.0]
        } else {
            normal.normalize().into()
        };
        let base = geometry.vertices.len() as u32;
        for p in [a, b, c, d] {
            geometry.vertices.push(ModelVertex {
                position: p.into(),
                normal,
            });
        }
        geometry
            .indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
