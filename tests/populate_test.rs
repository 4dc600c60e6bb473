mod common;

use std::f32::consts::PI;

use common::test_utils::{config_with_count, seeded_rng};
use matcap_text::config::{PrimitiveKind, SceneConfig};
use matcap_text::data_structures::scene_graph::{NodeKind, SceneGraph};
use matcap_text::populate::populate;

#[test]
fn should_create_eighty_of_each_kind() {
    let config = SceneConfig::default();
    let mut scene = SceneGraph::new();
    let handles = populate(&mut scene, &config, &mut seeded_rng(1));

    assert_eq!(scene.len(), 240);
    for kind in PrimitiveKind::ALL {
        assert_eq!(scene.count(NodeKind::Primitive(kind)), 80);
        assert_eq!(handles.get(kind).nodes.len(), 80);
    }
    assert_eq!(scene.count(NodeKind::Text), 0);
}

#[test]
fn should_place_primitives_inside_their_volume() {
    let config = SceneConfig::default();
    let mut scene = SceneGraph::new();
    let handles = populate(&mut scene, &config, &mut seeded_rng(2));

    for kind in PrimitiveKind::ALL {
        let half = config.primitive(kind).half_extent;
        for id in &handles.get(kind).nodes {
            let t = &scene.node(*id).expect("node").transform;
            assert!(t.position.x.abs() <= half.x, "{kind:?} x {}", t.position.x);
            assert!(t.position.y.abs() <= half.y, "{kind:?} y {}", t.position.y);
            assert!(t.position.z.abs() <= half.z, "{kind:?} z {}", t.position.z);

            assert!((0.0..=PI).contains(&t.rotation.x));
            assert!((0.0..=PI).contains(&t.rotation.y));
            assert_eq!(t.rotation.z, 0.0);

            assert!((0.0..1.0).contains(&t.scale.x));
            assert_eq!(t.scale.x, t.scale.y);
            assert_eq!(t.scale.y, t.scale.z);
        }
    }
}

#[test]
fn should_share_geometry_and_material_per_kind() {
    let config = config_with_count(10);
    let mut scene = SceneGraph::new();
    let handles = populate(&mut scene, &config, &mut seeded_rng(3));

    assert_eq!(scene.geometries().len(), 3);
    assert_eq!(scene.materials().len(), 3);
    for kind in PrimitiveKind::ALL {
        let kind_handles = handles.get(kind);
        for id in &kind_handles.nodes {
            let node = scene.node(*id).expect("node");
            assert_eq!(node.geometry, kind_handles.geometry);
            assert_eq!(node.material, kind_handles.material);
        }
        let material = scene.material(kind_handles.material).expect("material");
        assert_eq!(material.matcap, config.primitive(kind).matcap);
    }

    // One instanced batch per kind.
    assert_eq!(scene.batches().len(), 3);
}

#[test]
fn should_interleave_kinds() {
    let config = config_with_count(2);
    let mut scene = SceneGraph::new();
    populate(&mut scene, &config, &mut seeded_rng(4));

    let kinds: Vec<NodeKind> = scene.nodes().iter().map(|node| node.kind).collect();
    assert_eq!(
        kinds,
        [
            PrimitiveKind::Torus,
            PrimitiveKind::Sphere,
            PrimitiveKind::Plane,
            PrimitiveKind::Torus,
            PrimitiveKind::Sphere,
            PrimitiveKind::Plane,
        ]
        .map(NodeKind::Primitive)
    );
}

#[test]
fn should_be_deterministic_for_a_seed() {
    let config = config_with_count(5);
    let mut first = SceneGraph::new();
    let mut second = SceneGraph::new();
    populate(&mut first, &config, &mut seeded_rng(9));
    populate(&mut second, &config, &mut seeded_rng(9));

    for (a, b) in first.nodes().iter().zip(second.nodes()) {
        assert_eq!(a.transform, b.transform);
    }
}

#[test]
fn should_spin_toruses_and_planes_only() {
    let config = config_with_count(4);
    let mut scene = SceneGraph::new();
    let handles = populate(&mut scene, &config, &mut seeded_rng(5));

    let spinning: Vec<_> = handles.spinning().collect();
    assert_eq!(spinning.len(), 8);
    assert!(
        spinning
            .iter()
            .all(|id| !handles.sphere.nodes.contains(id))
    );
}
