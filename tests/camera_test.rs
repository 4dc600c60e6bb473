use cgmath::{InnerSpace, Point3, Vector3};
use matcap_text::camera::{Camera, OrbitControls};

fn camera() -> Camera {
    Camera::new(Point3::new(1.0, 1.0, 2.0), Point3::new(0.0, 0.0, 0.0))
}

fn azimuth(camera: &Camera) -> f32 {
    let offset = camera.position - camera.target;
    offset.x.atan2(offset.z)
}

/// Runs updates until the controls settle and returns how many were needed.
fn settle(controls: &mut OrbitControls, camera: &mut Camera) -> usize {
    let mut steps = 0;
    while controls.is_moving() {
        controls.update(camera);
        steps += 1;
        assert!(steps < 1_000, "controls never settled");
    }
    steps
}

#[test]
fn should_not_move_without_input() {
    let mut camera = camera();
    let before = camera.clone();
    let mut controls = OrbitControls::new(0.05, 600.0);

    assert!(!controls.is_moving());
    assert!(!controls.update(&mut camera));
    assert_eq!(camera, before);
}

#[test]
fn should_apply_rotation_gradually() {
    let mut camera = camera();
    let theta0 = azimuth(&camera);
    let mut controls = OrbitControls::new(0.05, 600.0);

    controls.rotate_left(0.1);
    assert!(controls.update(&mut camera));
    let first_step = theta0 - azimuth(&camera);
    assert!((first_step - 0.1 * 0.05).abs() < 1e-4, "{first_step}");
    assert!(controls.is_moving());

    let steps = settle(&mut controls, &mut camera);
    assert!(steps > 10);
    assert!((azimuth(&camera) - (theta0 - 0.1)).abs() < 1e-3);
    assert!((camera.distance() - 6.0_f32.sqrt()).abs() < 1e-4);
    assert!(!controls.update(&mut camera));
}

#[test]
fn should_keep_the_camera_off_the_poles() {
    let mut camera = camera();
    let mut controls = OrbitControls::new(1.0, 600.0);

    let distance = camera.distance();
    controls.rotate_up(10.0);
    settle(&mut controls, &mut camera);

    let offset = (camera.position - camera.target).normalize();
    assert!(offset.y > 0.99);
    assert!((camera.distance() - distance).abs() < 1e-4);
    let view: [[f32; 4]; 4] = camera.calc_matrix().into();
    assert!(view.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn should_dolly_toward_the_target() {
    let mut camera = camera();
    let distance = camera.distance();
    let mut controls = OrbitControls::new(0.05, 600.0);

    controls.dolly(0.5);
    assert!(controls.update(&mut camera));
    assert!((camera.distance() - distance * 0.5).abs() < 1e-4);
    assert!(!controls.update(&mut camera));
}

#[test]
fn should_pan_camera_and_target_together() {
    let mut camera = camera();
    let offset_before = camera.position - camera.target;
    let mut controls = OrbitControls::new(0.05, 600.0);

    controls.pan(Vector3::new(1.0, 0.0, 0.0));
    settle(&mut controls, &mut camera);

    assert!((camera.target.x - 1.0).abs() < 1e-3);
    let offset_after = camera.position - camera.target;
    assert!((offset_after - offset_before).magnitude() < 1e-3);
}
