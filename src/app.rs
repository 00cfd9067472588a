//! Application state shared by the event handlers.
//!
//! [`SceneState`] is everything the resize handler and the per-frame routine
//! touch. It is created by [`crate::assembly::assemble`] and owned by the
//! event loop; nothing here is global.

use cgmath::{Rad, Vector3};
use winit::event::WindowEvent;

use crate::{
    animation::{Clock, FrameScheduler},
    camera::PerspectiveCamera,
    config::SceneConfig,
    controls::OrbitControls,
    data_structures::scene_graph::{Mesh, NodeId, Scene},
    debug::DebugPanel,
    viewport::Viewport,
};

pub struct SceneState {
    pub config: SceneConfig,
    pub viewport: Viewport,
    pub scene: Scene,
    pub text: NodeId,
    pub donuts: Vec<NodeId>,
    /// Translations applied while centring the text geometry.
    pub text_offsets: [Vector3<f32>; 2],
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub debug: DebugPanel,
}

impl SceneState {
    /// Record a new logical size and pixel ratio and refit the camera.
    ///
    /// The GPU surface is reconfigured separately from
    /// [`Viewport::drawing_buffer_size`].
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) {
        let max_pixel_ratio = self.config.max_pixel_ratio;
        self.set_viewport(Viewport::new(width, height, device_pixel_ratio, max_pixel_ratio));
    }

    /// Resize from the physical window size winit reports.
    ///
    /// Below the pixel-ratio cap the drawing buffer keeps that exact size.
    pub fn resize_physical(&mut self, size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) {
        let max_pixel_ratio = self.config.max_pixel_ratio;
        self.set_viewport(Viewport::from_physical(size, scale_factor, max_pixel_ratio));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = self.viewport.aspect();
        self.camera.update_projection();
        log::debug!(
            "resized to {}x{} @{} (buffer {:?})",
            self.viewport.width,
            self.viewport.height,
            self.viewport.pixel_ratio,
            self.viewport.drawing_buffer_size()
        );
    }

    /// Advance the scene to `elapsed` seconds since the clock started.
    ///
    /// The text rotation is assigned, not accumulated, so repeated calls with
    /// the same time leave it unchanged. Returns whether the controls moved
    /// the camera.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        let angle = Rad(self.config.text_rotation_speed * elapsed);
        if let Some(text) = self.scene.mesh_mut(self.text) {
            text.transform.rotation.y = angle;
        }
        self.controls.update(&mut self.camera)
    }

    /// Tick from `clock` and ask `scheduler` for the next frame.
    ///
    /// Returns the elapsed seconds the scene was advanced to.
    pub fn advance_frame<S>(&mut self, clock: &mut Clock, scheduler: &S) -> f32
    where
        S: FrameScheduler + ?Sized,
    {
        let elapsed = clock.elapsed_secs();
        self.tick(elapsed);
        scheduler.request_frame();
        elapsed
    }

    pub fn text_mesh(&self) -> Option<&Mesh> {
        self.scene.mesh(self.text)
    }

    pub fn donut_meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.donuts.iter().filter_map(|id| self.scene.mesh(*id))
    }

    /// Route pointer input to the orbit controls.
    pub fn handle_window_event(&mut self, event: &WindowEvent, scale_factor: f64) -> bool {
        self.controls.handle_window_event(
            event,
            &self.camera,
            scale_factor,
            self.viewport.height as f32,
        )
    }
}
