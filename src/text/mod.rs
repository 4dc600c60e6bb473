//! 3D text: typeface fonts, glyph extrusion and the one-shot text node.

mod extrude;
mod font;

use cgmath::Vector3;
use thiserror::Error;

pub use extrude::{Layer, layers, orient, signed_area};
pub use font::{Contour, Font, FontError, Glyph, OutlineCommand};

use crate::config::SceneConfig;
use crate::data_structures::{
    geometry::Geometry,
    instance::Instance,
    scene_graph::{MaterialParams, NodeId, NodeKind, SceneGraph},
};

#[derive(Debug, Error)]
pub enum TextError {
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("failed to tessellate glyph caps: {0}")]
    Tessellation(String),
}

/// Shape of the extruded text, in text units before node scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextGeometryParams {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextGeometryParams {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            curve_segments: 5,
            bevel_enabled: true,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 4,
        }
    }
}

/// Extrudes `text` and centers the result on its bounding box.
pub fn build_text_geometry(
    font: &Font,
    text: &str,
    params: &TextGeometryParams,
) -> Result<Geometry, TextError> {
    let mut contours = font.contours(text, params.size, params.curve_segments);
    orient(&mut contours);
    let mut geometry = extrude::extrude(&contours, params)?;
    geometry.center();
    Ok(geometry)
}

/// Inserts the label into the scene the first time a font resolves.
#[derive(Debug)]
pub struct TextBuilder {
    label: String,
    params: TextGeometryParams,
    scale: Vector3<f32>,
    matcap: usize,
    node: Option<NodeId>,
}

impl TextBuilder {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            label: config.label.clone(),
            params: config.text,
            scale: config.text_scale.into(),
            matcap: config.text_matcap,
            node: None,
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Builds and adds the text node. Returns `None` once the text exists.
    pub fn on_font_resolved(
        &mut self,
        scene: &mut SceneGraph,
        font: &Font,
    ) -> Result<Option<NodeId>, TextError> {
        if let Some(existing) = self.node {
            log::debug!("font resolved again, keeping text node {existing:?}");
            return Ok(None);
        }
        let geometry = build_text_geometry(font, &self.label, &self.params)?;
        log::info!(
            "built text {:?}: {} triangles",
            self.label,
            geometry.triangle_count()
        );
        let geometry = scene.add_geometry(geometry);
        let material = scene.add_material(MaterialParams::new("text", self.matcap));
        let transform = Instance {
            scale: self.scale,
            ..Instance::default()
        };
        let node = scene.add_node(NodeKind::Text, geometry, material, transform);
        self.node = Some(node);
        Ok(Some(node))
    }
}
