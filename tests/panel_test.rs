mod common;

use common::test_utils::{assert_close, config_with_count, fixture_font};
use matcap_text::animation::{Ease, Tween};
use matcap_text::config::SceneConfig;
use matcap_text::data_structures::scene_graph::{NodeId, SceneGraph};
use matcap_text::panel::DebugPanel;
use matcap_text::text::TextBuilder;

fn scene_with_text() -> (SceneGraph, DebugPanel, SceneConfig) {
    let config = config_with_count(0);
    let mut scene = SceneGraph::new();
    let node = TextBuilder::new(&config)
        .on_font_resolved(&mut scene, &fixture_font())
        .expect("text builds")
        .expect("text node");
    let panel = DebugPanel::attach(&scene, node, &config).expect("panel attaches");
    (scene, panel, config)
}

#[test]
fn should_not_attach_to_a_missing_node() {
    let scene = SceneGraph::new();
    assert!(DebugPanel::attach(&scene, NodeId(3), &SceneConfig::default()).is_none());
}

#[test]
fn should_toggle_wireframe_on_the_text_material() {
    let (mut scene, panel, _) = scene_with_text();
    let revision = scene.material_revision();
    assert!(!panel.wireframe(&scene));

    panel.set_wireframe(&mut scene, true);
    assert!(panel.wireframe(&scene));
    assert!(scene.material_revision() > revision);

    panel.set_wireframe(&mut scene, false);
    assert!(!panel.wireframe(&scene));
}

#[test]
fn should_hide_and_show_the_text() {
    let (mut scene, panel, _) = scene_with_text();
    assert!(!panel.hidden(&scene));

    panel.set_hidden(&mut scene, true);
    assert!(panel.hidden(&scene));
    assert!(!scene.node(panel.node()).expect("text").visible);
    assert!(scene.batches().is_empty());

    panel.set_hidden(&mut scene, false);
    assert_eq!(scene.batches().len(), 1);
}

#[test]
fn should_tint_the_text_material() {
    let (mut scene, panel, _) = scene_with_text();
    assert_eq!(panel.color(&scene), [1.0, 1.0, 1.0]);

    panel.set_color(&mut scene, [0.2, 0.4, 0.6]);
    assert_eq!(panel.color(&scene), [0.2, 0.4, 0.6]);
}

#[test]
fn should_ease_out_the_spin() {
    let (mut scene, mut panel, config) = scene_with_text();
    panel.spin(&scene, 0.0);

    let tween = *panel.spin_tween().expect("spin in flight");
    assert_eq!(tween.ease, Ease::Power1Out);
    assert_close(tween.to, config.spin_radians, 1e-6);

    panel.update(&mut scene, 1.0);
    let rotation = scene.node(panel.node()).expect("text").transform.rotation.x;
    assert_close(rotation, 11.25, 1e-4);
    assert!(panel.spin_tween().is_some());

    panel.update(&mut scene, 2.0);
    let rotation = scene.node(panel.node()).expect("text").transform.rotation.x;
    assert_close(rotation, 15.0, 1e-4);
    assert!(panel.spin_tween().is_none());
}

#[test]
fn should_restart_a_spin_from_the_current_angle() {
    let (mut scene, mut panel, _) = scene_with_text();
    panel.spin(&scene, 0.0);
    panel.update(&mut scene, 1.0);

    panel.spin(&scene, 1.0);
    let tween = *panel.spin_tween().expect("new spin");
    assert_close(tween.from, 11.25, 1e-4);
    assert_close(tween.to, 26.25, 1e-4);

    panel.update(&mut scene, 3.0);
    let rotation = scene.node(panel.node()).expect("text").transform.rotation.x;
    assert_close(rotation, 26.25, 1e-4);
}

#[test]
fn should_continue_from_a_finished_spin() {
    let (mut scene, mut panel, _) = scene_with_text();
    panel.spin(&scene, 0.0);
    panel.update(&mut scene, 5.0);

    panel.spin(&scene, 6.0);
    assert_close(panel.spin_tween().expect("spin").from, 15.0, 1e-4);
}

#[test]
fn should_clamp_tween_progress() {
    let tween = Tween::new(0.0, 10.0, 1.0, 2.0, Ease::Linear);
    assert_eq!(tween.value_at(0.0), 0.0);
    assert_close(tween.value_at(2.0), 5.0, 1e-6);
    assert_eq!(tween.value_at(10.0), 10.0);
    assert!(!tween.is_finished(2.9));
    assert!(tween.is_finished(3.0));

    let instant = Tween::new(0.0, 1.0, 0.0, 0.0, Ease::Power1Out);
    assert!(instant.is_finished(0.0));
    assert_eq!(instant.value_at(0.0), 1.0);
}
