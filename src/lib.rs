//! donut-scene
//!
//! A small 3D scene: extruded "Hello Three.js" text surrounded by a hundred
//! randomly placed donuts, all shaded with one matcap texture, viewed through
//! a perspective camera with damped orbit controls. Runs natively through
//! winit and in the browser on a `<canvas class="webgl">`.
//!
//! High-level modules
//! - `geometry`: text and torus mesh generation (shapes, triangulation, extrusion)
//! - `font`: typeface JSON parsing into glyph outlines
//! - `data_structures`: scene graph, materials, instances and GPU textures
//! - `assembly`: builds the scene from loaded assets
//! - `app`: resize and per-frame handlers over the assembled scene
//! - `camera`, `controls`, `viewport`: view state and user input
//! - `context`, `pipelines`, `render`: wgpu setup and drawing
//! - `resources`: asset loading for native and web builds
//! - `flow`: the winit event loop
//!

pub mod animation;
pub mod app;
pub mod assembly;
pub mod camera;
pub mod config;
pub mod context;
pub mod controls;
pub mod data_structures;
pub mod debug;
pub mod flow;
pub mod font;
pub mod geometry;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod viewport;

pub use app::SceneState;
pub use config::SceneConfig;
pub use flow::{run, run_with_config};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
