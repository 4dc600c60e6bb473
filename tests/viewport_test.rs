use std::cell::Cell;

use cgmath::Deg;
use instant::{Duration, Instant};
use matcap_text::camera::Projection;
use matcap_text::viewport::{DoubleClickDetector, FullscreenTarget, Viewport, toggle_fullscreen};
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalSize};

fn projection() -> Projection {
    Projection::new(1, 1, Deg(75.0), 0.1, 100.0)
}

#[test]
fn should_update_aspect_on_resize() {
    let mut projection = projection();
    projection.update_matrix();
    assert!(!projection.needs_update());

    let mut viewport = Viewport::new(LogicalSize::new(1.0, 1.0), 1.0, 2.0);
    let physical = viewport.resize(LogicalSize::new(800.0, 600.0), 1.0, &mut projection);

    assert_eq!(physical, PhysicalSize::new(800, 600));
    assert!((projection.aspect() - 800.0 / 600.0).abs() < 1e-6);
    assert!(projection.needs_update());
    projection.update_matrix();
    assert!(!projection.needs_update());
}

#[test]
fn should_cap_the_pixel_ratio() {
    let mut projection = projection();
    let mut viewport = Viewport::new(LogicalSize::new(800.0, 600.0), 1.0, 2.0);

    let physical = viewport.resize(LogicalSize::new(800.0, 600.0), 3.0, &mut projection);
    assert_eq!(viewport.pixel_ratio(), 2.0);
    assert_eq!(physical, PhysicalSize::new(1600, 1200));

    let physical = viewport.resize(LogicalSize::new(800.0, 600.0), 1.5, &mut projection);
    assert_eq!(viewport.pixel_ratio(), 1.5);
    assert_eq!(physical, PhysicalSize::new(1200, 900));
}

#[test]
fn should_round_fractional_sizes() {
    let mut projection = projection();
    let mut viewport = Viewport::new(LogicalSize::new(1.0, 1.0), 1.0, 2.0);

    let physical = viewport.resize(LogicalSize::new(333.3, 200.5), 1.25, &mut projection);
    assert_eq!(physical, PhysicalSize::new(417, 251));
}

#[test]
fn should_keep_the_aspect_for_a_zero_height() {
    let mut projection = projection();
    let mut viewport = Viewport::new(LogicalSize::new(800.0, 600.0), 1.0, 2.0);
    viewport.resize(LogicalSize::new(800.0, 600.0), 1.0, &mut projection);

    viewport.resize(LogicalSize::new(800.0, 0.0), 1.0, &mut projection);
    assert!(projection.aspect().is_finite());
    assert!((projection.aspect() - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn should_keep_the_aspect_for_a_zero_width() {
    let mut projection = projection();
    let mut viewport = Viewport::new(LogicalSize::new(800.0, 600.0), 1.0, 2.0);
    viewport.resize(LogicalSize::new(800.0, 600.0), 1.0, &mut projection);

    let physical = viewport.resize(LogicalSize::new(0.0, 600.0), 1.0, &mut projection);
    assert_eq!(physical.width, 0);
    assert!((projection.aspect() - 800.0 / 600.0).abs() < 1e-6);
    // Rebuilding the matrix must not trip the zero-aspect assertion.
    let matrix: [[f32; 4]; 4] = projection.update_matrix().into();
    assert!(matrix.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn should_fall_back_to_a_square_aspect_for_an_empty_window() {
    let config = matcap_text::SceneConfig::default();
    let mut from_config = Projection::from_config(&config.camera, 0.0, 600.0);
    assert_eq!(from_config.aspect(), 1.0);
    from_config.update_matrix();

    let mut from_pixels = Projection::new(0, 0, Deg(75.0), 0.1, 100.0);
    assert_eq!(from_pixels.aspect(), 1.0);
    from_pixels.update_matrix();
}

fn detector() -> DoubleClickDetector {
    DoubleClickDetector::new(Duration::from_millis(300), 4.0)
}

#[test]
fn should_detect_two_close_presses() {
    let mut clicks = detector();
    let t0 = Instant::now();
    let at = LogicalPosition::new(100.0, 100.0);

    assert!(!clicks.press(t0, at));
    assert!(clicks.press(t0 + Duration::from_millis(200), at));
}

#[test]
fn should_ignore_slow_presses() {
    let mut clicks = detector();
    let t0 = Instant::now();
    let at = LogicalPosition::new(100.0, 100.0);

    assert!(!clicks.press(t0, at));
    assert!(!clicks.press(t0 + Duration::from_millis(400), at));
    // The slow press starts a new window.
    assert!(clicks.press(t0 + Duration::from_millis(500), at));
}

#[test]
fn should_ignore_distant_presses() {
    let mut clicks = detector();
    let t0 = Instant::now();

    assert!(!clicks.press(t0, LogicalPosition::new(100.0, 100.0)));
    assert!(!clicks.press(
        t0 + Duration::from_millis(100),
        LogicalPosition::new(110.0, 100.0)
    ));
}

#[test]
fn should_not_chain_a_third_press() {
    let mut clicks = detector();
    let t0 = Instant::now();
    let at = LogicalPosition::new(5.0, 5.0);

    assert!(!clicks.press(t0, at));
    assert!(clicks.press(t0 + Duration::from_millis(100), at));
    assert!(!clicks.press(t0 + Duration::from_millis(200), at));
}

#[derive(Default)]
struct FakeWindow {
    fullscreen: Cell<bool>,
    requests: Cell<usize>,
}

impl FullscreenTarget for FakeWindow {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn request_fullscreen(&self, fullscreen: bool) {
        self.fullscreen.set(fullscreen);
        self.requests.set(self.requests.get() + 1);
    }
}

#[test]
fn should_toggle_fullscreen() {
    let window = FakeWindow::default();

    assert!(toggle_fullscreen(&window));
    assert!(window.is_fullscreen());

    assert!(!toggle_fullscreen(&window));
    assert!(!window.is_fullscreen());
    assert_eq!(window.requests.get(), 2);
}
