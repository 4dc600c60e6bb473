//! Window-independent state of the matcap text scene.
//!
//! [`Demo`] owns everything that changes over time: the scene graph, camera,
//! orbit controls, viewport and the debug panel. The event loop in
//! [`crate::flow`] feeds it input and time; the renderer only reads it.

use cgmath::Point3;
use instant::{Duration, Instant};
use rand::Rng;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalSize};
use winit::event::WindowEvent;

use crate::camera::{Camera, OrbitControls, Projection};
use crate::config::SceneConfig;
use crate::data_structures::scene_graph::{NodeId, SceneGraph};
use crate::panel::DebugPanel;
use crate::populate::{PrimitiveHandles, populate};
use crate::render_loop::{StopHandle, spin_primitives};
use crate::text::{Font, TextBuilder, TextError};
use crate::viewport::{DoubleClickDetector, Viewport};

pub struct Demo {
    pub config: SceneConfig,
    pub scene: SceneGraph,
    pub primitives: PrimitiveHandles,
    pub camera: Camera,
    pub projection: Projection,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    text: TextBuilder,
    panel: Option<DebugPanel>,
    double_click: DoubleClickDetector,
    stop: StopHandle,
    now: f32,
}

impl Demo {
    pub fn new<R: Rng>(
        config: SceneConfig,
        size: LogicalSize<f64>,
        device_pixel_ratio: f64,
        rng: &mut R,
    ) -> Self {
        let mut scene = SceneGraph::new();
        let primitives = populate(&mut scene, &config, rng);

        let camera = Camera::new(
            Point3::from(config.camera.position),
            Point3::from(config.camera.target),
        );
        let mut projection =
            Projection::from_config(&config.camera, size.width as f32, size.height as f32);
        let mut viewport = Viewport::new(size, device_pixel_ratio, config.max_pixel_ratio);
        let physical = viewport.resize(size, device_pixel_ratio, &mut projection);
        let controls = OrbitControls::new(config.camera.damping_factor, physical.height as f32);
        let double_click = DoubleClickDetector::new(
            Duration::from_millis(config.double_click_millis),
            config.double_click_distance,
        );

        Self {
            text: TextBuilder::new(&config),
            config,
            scene,
            primitives,
            camera,
            projection,
            controls,
            viewport,
            panel: None,
            double_click,
            stop: StopHandle::new(),
            now: 0.0,
        }
    }

    pub fn resize(&mut self, size: LogicalSize<f64>, device_pixel_ratio: f64) -> PhysicalSize<u32> {
        let physical = self
            .viewport
            .resize(size, device_pixel_ratio, &mut self.projection);
        self.controls.set_viewport_height(physical.height as f32);
        physical
    }

    /// Adds the text node and attaches the debug panel. Only the first
    /// resolved font has an effect.
    pub fn on_font_resolved(&mut self, font: &Font) -> Result<Option<NodeId>, TextError> {
        let node = self.text.on_font_resolved(&mut self.scene, font)?;
        if let Some(node) = node {
            self.panel = DebugPanel::attach(&self.scene, node, &self.config);
        }
        Ok(node)
    }

    pub fn text_node(&self) -> Option<NodeId> {
        self.text.node()
    }

    pub fn panel(&self) -> Option<&DebugPanel> {
        self.panel.as_ref()
    }

    /// Presses the panel's spin button.
    pub fn spin_text(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.spin(&self.scene, self.now);
        }
    }

    /// Routes camera input. Returns true on a double click.
    pub fn handle_window_event(&mut self, event: &WindowEvent, scale_factor: f64) -> bool {
        self.controls
            .handle_window_events(event, &self.camera, self.projection.fovy());
        if let WindowEvent::MouseInput {
            state: winit::event::ElementState::Pressed,
            button: winit::event::MouseButton::Left,
            ..
        } = event
        {
            if let Some(position) = self.controls.cursor() {
                let logical: LogicalPosition<f64> = position.to_logical(scale_factor);
                return self.press(Instant::now(), logical);
            }
        }
        false
    }

    /// Registers a primary-button press. Returns true on a double click.
    pub fn press(&mut self, at: Instant, position: LogicalPosition<f64>) -> bool {
        self.double_click.press(at, position)
    }

    /// One frame of animation at `elapsed` seconds. Returns true if the
    /// camera moved.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        self.now = elapsed;
        spin_primitives(
            &mut self.scene,
            &self.primitives,
            elapsed,
            self.config.spin_speed,
        );
        if let Some(panel) = self.panel.as_mut() {
            panel.update(&mut self.scene, elapsed);
        }
        self.controls.update(&mut self.camera)
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        if let Some(panel) = self.panel.as_mut() {
            panel.ui(ctx, &mut self.scene, self.now);
        }
    }

    /// Shares an externally owned stop flag with the demo.
    pub fn set_stop_handle(&mut self, stop: StopHandle) {
        self.stop = stop;
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn should_stop(&self) -> bool {
        self.stop.is_stopped()
    }
}
