//! Window size bookkeeping, double-click detection and fullscreen toggling.

use instant::{Duration, Instant};
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalSize};

use crate::camera::Projection;

/// Logical window size and the pixel ratio the surface is rendered at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size: LogicalSize<f64>,
    pixel_ratio: f64,
    max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(size: LogicalSize<f64>, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            size,
            pixel_ratio: device_pixel_ratio.min(max_pixel_ratio),
            max_pixel_ratio,
        }
    }

    /// Records the new size, updates the camera aspect and returns the
    /// physical size the render target must take.
    pub fn resize(
        &mut self,
        size: LogicalSize<f64>,
        device_pixel_ratio: f64,
        projection: &mut Projection,
    ) -> PhysicalSize<u32> {
        self.size = size;
        // A minimised window or hidden canvas keeps the last valid aspect.
        if size.width > 0.0 && size.height > 0.0 {
            projection.set_aspect((size.width / size.height) as f32);
        }
        self.pixel_ratio = device_pixel_ratio.min(self.max_pixel_ratio);
        let physical = self.physical_size();
        log::debug!(
            "viewport {}x{} at pixel ratio {} -> {}x{}",
            size.width,
            size.height,
            self.pixel_ratio,
            physical.width,
            physical.height
        );
        physical
    }

    pub fn size(&self) -> LogicalSize<f64> {
        self.size
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn physical_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(
            (self.size.width * self.pixel_ratio).round() as u32,
            (self.size.height * self.pixel_ratio).round() as u32,
        )
    }
}

/// Turns single primary-button presses into double clicks.
#[derive(Clone, Debug)]
pub struct DoubleClickDetector {
    window: Duration,
    distance: f64,
    last: Option<(Instant, LogicalPosition<f64>)>,
}

impl DoubleClickDetector {
    pub fn new(window: Duration, distance: f64) -> Self {
        Self {
            window,
            distance,
            last: None,
        }
    }

    /// Registers a press and reports whether it completes a double click.
    pub fn press(&mut self, at: Instant, position: LogicalPosition<f64>) -> bool {
        if let Some((previous, origin)) = self.last {
            let dx = position.x - origin.x;
            let dy = position.y - origin.y;
            let close = (dx * dx + dy * dy).sqrt() <= self.distance;
            if close && at >= previous && at.duration_since(previous) <= self.window {
                self.last = None;
                return true;
            }
        }
        self.last = Some((at, position));
        false
    }
}

/// Something that can enter and leave borderless fullscreen.
pub trait FullscreenTarget {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&self, fullscreen: bool);
}

impl FullscreenTarget for winit::window::Window {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen().is_some()
    }

    fn request_fullscreen(&self, fullscreen: bool) {
        self.set_fullscreen(fullscreen.then_some(winit::window::Fullscreen::Borderless(None)));
    }
}

/// Enters fullscreen when windowed and leaves it otherwise. Returns the
/// requested state.
pub fn toggle_fullscreen(target: &impl FullscreenTarget) -> bool {
    let enter = !target.is_fullscreen();
    log::info!(
        "{} fullscreen",
        if enter { "entering" } else { "leaving" }
    );
    target.request_fullscreen(enter);
    enter
}
