use matcap_text::SceneConfig;
use matcap_text::config::PrimitiveKind;

#[test]
fn should_load_only_referenced_matcaps() {
    let config = SceneConfig::default();

    assert_eq!(config.matcaps.len(), 8);
    assert_eq!(config.used_matcaps(), vec![2, 4, 6, 7]);
    assert_eq!(config.unused_matcaps(), vec![0, 1, 3, 5]);
}

#[test]
fn should_list_shared_slots_once() {
    let mut config = SceneConfig::default();
    config.sphere.matcap = config.torus.matcap;
    config.text_matcap = config.torus.matcap;

    assert_eq!(config.used_matcaps(), vec![2, 4]);
    assert_eq!(config.unused_matcaps(), vec![0, 1, 3, 5, 6, 7]);
}

#[test]
fn should_ignore_slots_without_a_matcap() {
    let config = SceneConfig {
        text_matcap: 20,
        ..SceneConfig::default()
    };

    assert_eq!(config.used_matcaps(), vec![2, 4, 6]);
    assert!(!config.unused_matcaps().contains(&20));
    assert_eq!(config.unused_matcaps(), vec![0, 1, 3, 5, 7]);
}

#[test]
fn should_spin_every_kind_but_spheres() {
    assert!(PrimitiveKind::Torus.spins());
    assert!(PrimitiveKind::Plane.spins());
    assert!(!PrimitiveKind::Sphere.spins());
}
