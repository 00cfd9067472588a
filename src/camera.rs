//! Perspective camera and its GPU uniform.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};

use crate::config::CameraOptions;

// cgmath produces OpenGL clip space (z in [-1, 1]); wgpu expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A perspective camera looking from `position` towards `target`.
///
/// The projection matrix is cached; call [`update_projection`](Self::update_projection)
/// after changing `aspect`, `fov_y`, `near` or `far`.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y: Deg<f32>,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    pub fn new(fov_y: Deg<f32>, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            fov_y,
            aspect,
            near,
            far,
            projection: Matrix4::identity(),
        };
        camera.update_projection();
        camera
    }

    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        let mut camera = Self::new(options.fov_y, aspect, options.near, options.far);
        camera.set_position(options.position);
        camera
    }

    /// Move the camera while keeping its viewing direction.
    pub fn set_position(&mut self, position: Point3<f32>) {
        let direction = self.target - self.position;
        self.position = position;
        self.target = position + direction;
    }

    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    pub fn update_projection(&mut self) {
        self.projection = cgmath::perspective(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection * self.view_matrix()
    }
}

/// Camera data as laid out in the matcap shader's uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
        }
    }

    pub fn update(&mut self, camera: &PerspectiveCamera) {
        self.view = camera.view_matrix().into();
        self.projection = (OPENGL_TO_WGPU_MATRIX * camera.projection_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
