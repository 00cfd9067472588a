//! Scene configuration.
//!
//! Every literal that shapes the scene lives here as a typed default so the
//! assembly code, the controls and the renderer read from one place. The
//! defaults reproduce the reference scene exactly; nothing is read from files
//! or the environment.

use cgmath::{Deg, Point3};

/// Parameters of the extruded 3D text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOptions {
    pub content: String,
    /// Glyph height in world units.
    pub size: f32,
    /// Extrusion depth along +z.
    pub depth: f32,
    /// Divisions used when sampling each quadratic or cubic outline segment.
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            content: "Hello Three.js".to_string(),
            size: 0.6,
            depth: 0.2,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 5,
        }
    }
}

/// Parameters of the shared donut geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct TorusOptions {
    /// Distance from the torus centre to the centre of the tube.
    pub radius: f32,
    /// Radius of the tube.
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            radius: 0.3,
            tube: 0.2,
            radial_segments: 20,
            tubular_segments: 45,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraOptions {
    pub fov_y: Deg<f32>,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_y: Deg(75.0),
            near: 0.1,
            far: 100.0,
            position: Point3::new(0.0, 0.0, 3.0),
        }
    }
}

/// Top-level configuration consumed by [`crate::assembly::assemble`] and the event loop.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub text: TextOptions,
    pub torus: TorusOptions,
    pub camera: CameraOptions,
    pub donut_count: usize,
    /// Edge length of the cube (centred on the origin) donuts are scattered in.
    pub donut_spread: f32,
    /// Radians per second applied to the text's y-rotation.
    pub text_rotation_speed: f32,
    pub max_pixel_ratio: f64,
    pub damping_factor: f32,
    pub matcap_path: String,
    pub font_path: String,
    /// CSS selector of the drawing surface on the web.
    pub canvas_selector: String,
    pub clear_colour: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            text: TextOptions::default(),
            torus: TorusOptions::default(),
            camera: CameraOptions::default(),
            donut_count: 100,
            donut_spread: 10.0,
            text_rotation_speed: 0.15,
            max_pixel_ratio: 2.0,
            damping_factor: 0.05,
            matcap_path: "textures/matcaps/1.png".to_string(),
            font_path: "fonts/blocky_regular.typeface.json".to_string(),
            canvas_selector: "canvas.webgl".to_string(),
            clear_colour: wgpu::Color::BLACK,
        }
    }
}
