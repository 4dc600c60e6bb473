//! The debug panel bound to the text node.
//!
//! Every control is a plain method on [`DebugPanel`] so it can be driven
//! without a window; [`DebugPanel::ui`] only lays the methods out as egui
//! widgets.

use crate::animation::{Ease, Tween};
use crate::config::SceneConfig;
use crate::data_structures::scene_graph::{MaterialId, NodeId, SceneGraph};

#[derive(Debug)]
pub struct DebugPanel {
    node: NodeId,
    material: MaterialId,
    spin: Option<Tween>,
    spin_radians: f32,
    spin_seconds: f32,
}

impl DebugPanel {
    /// Binds to `node`. Returns `None` when the node is not in the scene.
    pub fn attach(scene: &SceneGraph, node: NodeId, config: &SceneConfig) -> Option<Self> {
        let material = scene.node(node)?.material;
        Some(Self {
            node,
            material,
            spin: None,
            spin_radians: config.spin_radians,
            spin_seconds: config.spin_seconds,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn wireframe(&self, scene: &SceneGraph) -> bool {
        scene
            .material(self.material)
            .is_some_and(|material| material.wireframe)
    }

    pub fn set_wireframe(&self, scene: &mut SceneGraph, wireframe: bool) {
        if let Some(material) = scene.material_mut(self.material) {
            material.wireframe = wireframe;
        }
    }

    pub fn hidden(&self, scene: &SceneGraph) -> bool {
        scene.node(self.node).is_some_and(|node| !node.visible)
    }

    pub fn set_hidden(&self, scene: &mut SceneGraph, hidden: bool) {
        if let Some(node) = scene.node_mut(self.node) {
            node.visible = !hidden;
        }
    }

    pub fn color(&self, scene: &SceneGraph) -> [f32; 3] {
        scene
            .material(self.material)
            .map_or([1.0, 1.0, 1.0], |material| material.color)
    }

    pub fn set_color(&self, scene: &mut SceneGraph, color: [f32; 3]) {
        if let Some(material) = scene.material_mut(self.material) {
            material.color = color;
        }
    }

    pub fn spin_tween(&self) -> Option<&Tween> {
        self.spin.as_ref()
    }

    /// Starts a spin from the current angle, replacing any spin in flight.
    pub fn spin(&mut self, scene: &SceneGraph, now: f32) {
        let current = match &self.spin {
            Some(tween) => tween.value_at(now),
            None => scene
                .node(self.node)
                .map_or(0.0, |node| node.transform.rotation.x),
        };
        log::debug!("spinning text from {current:.3} rad");
        self.spin = Some(Tween::new(
            current,
            current + self.spin_radians,
            now,
            self.spin_seconds,
            Ease::Power1Out,
        ));
    }

    /// Applies the active spin to the text node.
    pub fn update(&mut self, scene: &mut SceneGraph, now: f32) {
        let Some(tween) = self.spin else {
            return;
        };
        if let Some(node) = scene.node_mut(self.node) {
            node.transform.rotation.x = tween.value_at(now);
        }
        if tween.is_finished(now) {
            self.spin = None;
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, scene: &mut SceneGraph, now: f32) {
        egui::Window::new("Debug")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                let mut wireframe = self.wireframe(scene);
                if ui.checkbox(&mut wireframe, "wireframe").changed() {
                    self.set_wireframe(scene, wireframe);
                }

                let mut hidden = self.hidden(scene);
                if ui.checkbox(&mut hidden, "Hide Name").changed() {
                    self.set_hidden(scene, hidden);
                }

                ui.horizontal(|ui| {
                    let mut color = self.color(scene);
                    if ui.color_edit_button_rgb(&mut color).changed() {
                        self.set_color(scene, color);
                    }
                    ui.label("color");
                });

                if ui.button("spin").clicked() {
                    self.spin(scene, now);
                }
            });
    }
}
