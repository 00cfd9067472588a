use approx::assert_relative_eq;
use cgmath::{EuclideanSpace, InnerSpace, Point3};
use donut_scene::{
    camera::PerspectiveCamera, config::CameraOptions, controls::OrbitControls,
};

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::from_options(&CameraOptions::default(), 800.0 / 600.0)
}

fn distance(camera: &PerspectiveCamera, controls: &OrbitControls) -> f32 {
    (camera.position - controls.target).magnitude()
}

#[test]
fn should_keep_gliding_after_input_with_damping() {
    let mut controls = OrbitControls::with_damping(0.05);
    let mut camera = camera();

    controls.rotate_left(0.5);
    assert!(controls.update(&mut camera));
    let after_one = camera.position;
    assert!(controls.update(&mut camera));
    assert_ne!(camera.position, after_one);
}

#[test]
fn should_converge_to_full_rotation_with_damping() {
    let mut controls = OrbitControls::with_damping(0.05);
    let mut camera = camera();

    controls.rotate_left(0.5);
    for _ in 0..1000 {
        controls.update(&mut camera);
    }

    // rotating left moves the camera towards -x around +y
    let azimuth = camera.position.x.atan2(camera.position.z);
    assert_relative_eq!(azimuth, -0.5, epsilon = 1e-3);
    assert_relative_eq!(distance(&camera, &controls), 3.0, epsilon = 1e-4);
    assert!(!controls.update(&mut camera));
}

#[test]
fn should_apply_whole_delta_without_damping() {
    let mut controls = OrbitControls::new();
    let mut camera = camera();

    controls.rotate_left(0.5);
    controls.update(&mut camera);
    let azimuth = camera.position.x.atan2(camera.position.z);
    assert_relative_eq!(azimuth, -0.5, epsilon = 1e-5);
    assert!(!controls.update(&mut camera));
}

#[test]
fn should_dolly_in_on_wheel_up() {
    let mut controls = OrbitControls::with_damping(0.05);
    let mut camera = camera();

    controls.scroll(1.0);
    assert!(controls.update(&mut camera));
    assert_relative_eq!(distance(&camera, &controls), 3.0 * 0.95, epsilon = 1e-4);
}

#[test]
fn should_dolly_out_on_wheel_down() {
    let mut controls = OrbitControls::new();
    let mut camera = camera();

    controls.scroll(-1.0);
    controls.update(&mut camera);
    assert_relative_eq!(distance(&camera, &controls), 3.0 / 0.95, epsilon = 1e-4);
}

#[test]
fn should_ignore_zero_scroll() {
    let mut controls = OrbitControls::new();
    let mut camera = camera();
    controls.update(&mut camera);

    controls.scroll(0.0);
    assert!(!controls.update(&mut camera));
    assert_relative_eq!(distance(&camera, &controls), 3.0, epsilon = 1e-5);
}

#[test]
fn should_shrink_orbit_radius_when_dollying_in() {
    let mut controls = OrbitControls::new();
    let mut camera = camera();

    controls.dolly_in(0.5);
    assert!(controls.update(&mut camera));
    assert_relative_eq!(distance(&camera, &controls), 1.5, epsilon = 1e-4);
    assert_eq!(camera.target, controls.target);
}

#[test]
fn should_clamp_polar_angle_at_the_pole() {
    let mut controls = OrbitControls::new();
    let mut camera = camera();

    controls.rotate_up(10.0);
    controls.update(&mut camera);
    let offset = camera.position - Point3::origin();
    assert!(offset.x.is_finite() && offset.y.is_finite() && offset.z.is_finite());
    assert!(offset.y > 0.0);
    assert_relative_eq!(offset.magnitude(), 3.0, epsilon = 1e-4);
}

#[test]
fn should_always_look_at_target() {
    let mut controls = OrbitControls::with_damping(0.05);
    let mut camera = camera();
    controls.rotate_left(1.0);
    controls.rotate_up(0.3);
    for _ in 0..10 {
        controls.update(&mut camera);
        assert_eq!(camera.target, controls.target);
    }
}
