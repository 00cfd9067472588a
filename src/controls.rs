//! Orbit controls with inertial damping.
//!
//! The camera orbits a target point on a sphere. Input accumulates deltas
//! (azimuth, polar angle, dolly scale, pan offset); [`OrbitControls::update`]
//! integrates them once per frame. With damping enabled only a fraction of the
//! pending delta is applied each frame and the remainder decays, so the camera
//! keeps gliding after input stops.
//!
//! Pointer coordinates handed to the controls are logical pixels; the client
//! height used to normalise drags must be in the same unit.

use std::collections::HashMap;
use std::f32::consts::PI;

use cgmath::{EuclideanSpace, InnerSpace, Point3, Rad, Vector2, Vector3, Zero};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};

use crate::camera::PerspectiveCamera;

const EPS: f32 = 0.000001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gesture {
    None,
    Rotate,
    Dolly,
    Pan,
    TouchRotate,
    TouchDollyPan,
}

/// Radius / polar angle / azimuth, with the azimuth measured from +z around +y.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_vector(v: Vector3<f32>) -> Self {
        let radius = v.magnitude();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_vector(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

/// Orbit camera controller.
#[derive(Debug)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    spherical_delta: Spherical,
    scale: f32,
    pan_offset: Vector3<f32>,
    zoom_changed: bool,
    gesture: Gesture,
    pointer: Option<Vector2<f32>>,
    touches: HashMap<u64, Vector2<f32>>,
    last_pinch: Option<(f32, Vector2<f32>)>,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            target: Point3::origin(),
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            spherical_delta: Spherical {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            },
            scale: 1.0,
            pan_offset: Vector3::zero(),
            zoom_changed: false,
            gesture: Gesture::None,
            pointer: None,
            touches: HashMap::new(),
            last_pinch: None,
        }
    }

    pub fn with_damping(damping_factor: f32) -> Self {
        Self {
            enable_damping: true,
            damping_factor,
            ..Self::new()
        }
    }

    /// Rotate around the target by a pointer drag of `delta` logical pixels.
    pub fn rotate(&mut self, delta: Vector2<f32>, client_height: f32) {
        if client_height <= 0.0 {
            return;
        }
        let delta = delta * self.rotate_speed;
        self.rotate_left(2.0 * PI * delta.x / client_height);
        self.rotate_up(2.0 * PI * delta.y / client_height);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Move towards the target; `factor` below one shrinks the orbit radius.
    pub fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
        self.zoom_changed = true;
    }

    pub fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
        self.zoom_changed = true;
    }

    /// One wheel notch; positive `amount` scrolls up and dollies in.
    pub fn scroll(&mut self, amount: f32) {
        if amount > 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if amount < 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Translate camera and target by a screen-space drag of `delta` logical pixels.
    pub fn pan(&mut self, delta: Vector2<f32>, camera: &PerspectiveCamera, client_height: f32) {
        if client_height <= 0.0 {
            return;
        }
        let delta = delta * self.pan_speed;
        let offset = camera.position - self.target;
        // half of the fov is center to top of screen
        let half_fov: Rad<f32> = (camera.fov_y / 2.0).into();
        let target_distance = offset.magnitude() * half_fov.0.tan();

        let forward = (camera.target - camera.position).normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);

        self.pan_offset += right * (-2.0 * delta.x * target_distance / client_height);
        self.pan_offset += up * (2.0 * delta.y * target_distance / client_height);
    }

    /// Integrate pending input into the camera transform.
    ///
    /// Returns `true` when the camera moved noticeably or a zoom was applied.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let last_position = camera.position;
        let last_direction = camera.target - camera.position;

        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vector(offset);

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.spherical_delta.theta * step;
        spherical.phi += self.spherical_delta.phi * step;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();

        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * step;

        camera.position = self.target + spherical.to_vector();
        camera.look_at(self.target);

        if self.enable_damping {
            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta.theta = 0.0;
            self.spherical_delta.phi = 0.0;
            self.pan_offset = Vector3::zero();
        }
        self.scale = 1.0;

        let moved = (camera.position - last_position).magnitude2() > EPS;
        let new_direction = camera.target - camera.position;
        let turned = last_direction.magnitude2() > 0.0
            && 8.0 * (1.0 - last_direction.normalize().dot(new_direction.normalize())) > EPS;
        if self.zoom_changed || moved || turned {
            self.zoom_changed = false;
            return true;
        }
        false
    }

    /// Translate winit input into orbit gestures.
    ///
    /// `scale_factor` converts the physical positions winit reports into logical
    /// pixels; `client_height` is the logical height of the drawing surface.
    /// Returns `true` if the event was consumed.
    pub fn handle_window_event(
        &mut self,
        event: &WindowEvent,
        camera: &PerspectiveCamera,
        scale_factor: f64,
        client_height: f32,
    ) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) => self.gesture = Gesture::Rotate,
                    (ElementState::Pressed, MouseButton::Middle) => self.gesture = Gesture::Dolly,
                    (ElementState::Pressed, MouseButton::Right) => self.gesture = Gesture::Pan,
                    (ElementState::Released, _) => self.gesture = Gesture::None,
                    _ => return false,
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                let current = Vector2::new(logical.x, logical.y);
                let previous = self.pointer.replace(current);
                let Some(previous) = previous else {
                    return false;
                };
                let delta = current - previous;
                match self.gesture {
                    Gesture::Rotate => self.rotate(delta, client_height),
                    Gesture::Pan => self.pan(delta, camera, client_height),
                    Gesture::Dolly => {
                        if delta.y > 0.0 {
                            self.dolly_out(self.zoom_scale());
                        } else if delta.y < 0.0 {
                            self.dolly_in(self.zoom_scale());
                        }
                    }
                    _ => return false,
                }
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll(match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                });
                true
            }
            WindowEvent::Touch(touch) => {
                self.handle_touch(touch, camera, scale_factor, client_height);
                true
            }
            _ => false,
        }
    }

    fn handle_touch(
        &mut self,
        touch: &Touch,
        camera: &PerspectiveCamera,
        scale_factor: f64,
        client_height: f32,
    ) {
        let logical = touch.location.to_logical::<f32>(scale_factor);
        let location = Vector2::new(logical.x, logical.y);
        match touch.phase {
            TouchPhase::Started => {
                self.touches.insert(touch.id, location);
            }
            TouchPhase::Moved => {
                let previous = self.touches.insert(touch.id, location);
                match self.gesture {
                    Gesture::TouchRotate => {
                        if let Some(previous) = previous {
                            self.rotate(location - previous, client_height);
                        }
                    }
                    Gesture::TouchDollyPan => {
                        if let (Some((last_distance, last_center)), Some((distance, center))) =
                            (self.last_pinch, self.pinch())
                        {
                            if last_distance > 0.0 {
                                self.dolly_out((distance / last_distance).powf(self.zoom_speed));
                            }
                            self.pan(center - last_center, camera, client_height);
                        }
                    }
                    _ => (),
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&touch.id);
            }
        }
        self.gesture = match self.touches.len() {
            0 => Gesture::None,
            1 => Gesture::TouchRotate,
            _ => Gesture::TouchDollyPan,
        };
        self.last_pinch = self.pinch();
    }

    fn pinch(&self) -> Option<(f32, Vector2<f32>)> {
        let mut ids: Vec<_> = self.touches.keys().copied().collect();
        if ids.len() < 2 {
            return None;
        }
        ids.sort_unstable();
        let a = self.touches[&ids[0]];
        let b = self.touches[&ids[1]];
        Some(((a - b).magnitude(), (a + b) * 0.5))
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Deg;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(Deg(75.0), 1.0, 0.1, 100.0);
        camera.set_position(Point3::new(0.0, 0.0, 3.0));
        camera
    }

    #[test]
    fn spherical_round_trip_keeps_offset() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let back = Spherical::from_vector(v).to_vector();
        assert_relative_eq!(back.x, v.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-5);
    }

    #[test]
    fn pinch_reports_distance_and_midpoint() {
        let mut controls = OrbitControls::new();
        controls.touches.insert(1, Vector2::new(0.0, 0.0));
        controls.touches.insert(2, Vector2::new(3.0, 4.0));
        let (distance, center) = controls.pinch().unwrap();
        assert_relative_eq!(distance, 5.0);
        assert_relative_eq!(center.x, 1.5);
        assert_relative_eq!(center.y, 2.0);
    }

    #[test]
    fn idle_update_without_damping_is_still() {
        let mut controls = OrbitControls::new();
        let mut camera = camera();
        controls.update(&mut camera);
        assert!(!controls.update(&mut camera));
        assert_relative_eq!(camera.position.z, 3.0, epsilon = 1e-5);
    }
}
