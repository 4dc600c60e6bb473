mod common;

use cgmath::Point3;
use common::test_utils::{assert_close, demo_800x600, fixture_font, seeded_rng};
use instant::{Duration, Instant};
use matcap_text::data_structures::scene_graph::NodeKind;
use matcap_text::render_loop::StopHandle;
use matcap_text::{Demo, SceneConfig};
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalSize};

#[test]
fn should_start_with_primitives_and_no_text() {
    let demo = demo_800x600();

    assert_eq!(demo.scene.len(), 240);
    assert_eq!(demo.scene.count(NodeKind::Text), 0);
    assert!(demo.text_node().is_none());
    assert!(demo.panel().is_none());
    assert_close(demo.projection.aspect(), 800.0 / 600.0, 1e-6);
    assert_eq!(demo.viewport.physical_size(), PhysicalSize::new(800, 600));
    assert_eq!(demo.camera.position, Point3::new(1.0, 1.0, 2.0));
}

#[test]
fn should_add_text_and_panel_when_the_font_resolves() {
    let mut demo = demo_800x600();
    let node = demo
        .on_font_resolved(&fixture_font())
        .expect("text builds")
        .expect("text node");

    assert_eq!(demo.text_node(), Some(node));
    assert_eq!(demo.scene.len(), 241);
    assert_eq!(demo.panel().map(|panel| panel.node()), Some(node));

    let again = demo.on_font_resolved(&fixture_font()).expect("ignored");
    assert_eq!(again, None);
    assert_eq!(demo.scene.count(NodeKind::Text), 1);
}

#[test]
fn should_spin_primitives_on_tick() {
    let mut demo = demo_800x600();
    let torus = demo.primitives.torus.nodes[0];

    assert!(!demo.tick(4.0));
    let rotation = demo.scene.node(torus).expect("torus").transform.rotation;
    assert_close(rotation.x, 1.2, 1e-5);
    assert_close(rotation.y, 0.8, 1e-5);
}

#[test]
fn should_spin_the_text_from_the_panel() {
    let mut demo = demo_800x600();
    let node = demo
        .on_font_resolved(&fixture_font())
        .expect("text builds")
        .expect("text node");

    demo.tick(1.0);
    demo.spin_text();
    demo.tick(3.0);

    let rotation = demo.scene.node(node).expect("text").transform.rotation.x;
    assert_close(rotation, 15.0, 1e-4);
    assert!(demo.panel().and_then(|panel| panel.spin_tween()).is_none());
}

#[test]
fn should_resize_projection_and_viewport() {
    let mut demo = demo_800x600();

    let physical = demo.resize(LogicalSize::new(1024.0, 512.0), 3.0);
    assert_eq!(physical, PhysicalSize::new(2048, 1024));
    assert_close(demo.projection.aspect(), 2.0, 1e-6);
    assert_eq!(demo.viewport.pixel_ratio(), 2.0);
}

#[test]
fn should_survive_a_zero_width_window() {
    let mut demo = demo_800x600();
    demo.resize(LogicalSize::new(0.0, 600.0), 1.0);
    assert_close(demo.projection.aspect(), 800.0 / 600.0, 1e-6);
    demo.projection.update_matrix();

    let mut hidden = Demo::new(
        SceneConfig::default(),
        LogicalSize::new(0.0, 600.0),
        1.0,
        &mut seeded_rng(42),
    );
    assert_eq!(hidden.projection.aspect(), 1.0);
    hidden.projection.update_matrix();
    assert_eq!(hidden.viewport.physical_size(), PhysicalSize::new(0, 600));

    let physical = hidden.resize(LogicalSize::new(800.0, 600.0), 1.0);
    assert_eq!(physical, PhysicalSize::new(800, 600));
    assert_close(hidden.projection.aspect(), 800.0 / 600.0, 1e-6);
}

#[test]
fn should_report_double_clicks() {
    let mut demo = demo_800x600();
    let t0 = Instant::now();
    let at = LogicalPosition::new(400.0, 300.0);

    assert!(!demo.press(t0, at));
    assert!(demo.press(t0 + Duration::from_millis(150), at));
}

#[test]
fn should_stop_through_a_shared_handle() {
    let mut demo = demo_800x600();
    let stop = StopHandle::new();
    demo.set_stop_handle(stop.clone());
    assert!(!demo.should_stop());

    stop.stop();
    assert!(demo.should_stop());
    assert!(demo.stop_handle().is_stopped());
}
