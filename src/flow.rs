//! Application event loop.
//!
//! The window (a canvas on the web) is created on `resumed`; assets are then
//! loaded, the scene assembled and the GPU initialised asynchronously. Natively
//! the tokio runtime blocks on that future; on wasm it is spawned and the
//! result comes back as an [`AppEvent`].
//!
//! # Per-frame routine
//!
//! On every `RedrawRequested`, [`SceneState::advance_frame`] reads the
//! [`Clock`], ticks the scene (text rotation, control damping) and schedules
//! the next frame; the scene is then rendered from the camera.

use std::{fmt::Debug, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::Key,
    window::Window,
};

use crate::{
    animation::{Clock, FrameScheduler},
    app::SceneState,
    assembly::assemble,
    config::SceneConfig,
    context::Context,
    render::Renderer,
    resources::load_scene_assets,
    viewport::Viewport,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const WINDOW_TITLE: &str = "Donut Scene";

/// Everything alive once initialisation has finished.
pub struct AppState {
    pub ctx: Context,
    pub renderer: Renderer,
    pub scene: SceneState,
    pub clock: Clock,
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> anyhow::Result<Self> {
        let viewport = Viewport::from_physical(
            window.inner_size(),
            window.scale_factor(),
            config.max_pixel_ratio,
        );
        let assets = load_scene_assets(&config).await?;
        let scene = assemble(config, assets, viewport, &mut rand::rng())?;

        let ctx = Context::new(window, viewport.drawing_buffer_size()).await?;
        let renderer = Renderer::new(&ctx.device, &ctx.queue, ctx.config.format, &scene);
        log::info!("initialised, drawing buffer {:?}", ctx.surface_size());

        Ok(Self {
            ctx,
            renderer,
            scene,
            clock: Clock::new(),
        })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let scale_factor = self.ctx.window.scale_factor();
        self.scene.resize_physical(size, scale_factor);
        self.ctx.resize(self.scene.viewport.drawing_buffer_size());
    }

    fn frame(&mut self) {
        // queues the next RedrawRequested; winit delivers it after this one
        self.scene.advance_frame(&mut self.clock, self.ctx.window.as_ref());

        if !self.scene.viewport.is_empty() {
            match self.renderer.render(&self.ctx, &self.scene) {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = self.ctx.window.inner_size();
                    log::warn!("surface lost, reconfiguring to {:?}", size);
                    self.resize(size);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            }
        }
    }
}

pub enum AppEvent {
    #[allow(dead_code)]
    Initialized(anyhow::Result<AppState>),
}

impl Debug for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(Ok(_)) => f.write_str("Initialized(Ok)"),
            Self::Initialized(Err(e)) => f.debug_tuple("Initialized").field(e).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
    // taken on the first `resumed`
    config: Option<SceneConfig>,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config: Some(config),
            state: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("start-up failed: {:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn initialized(&mut self, event_loop: &ActiveEventLoop, result: anyhow::Result<AppState>) {
        match result {
            Ok(mut state) => {
                // the window may have been resized while assets were loading
                let size = state.ctx.window.inner_size();
                state.resize(size);
                state.ctx.window.request_frame();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn create_window(
        &self,
        event_loop: &ActiveEventLoop,
        config: &SceneConfig,
    ) -> anyhow::Result<Arc<Window>> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(WINDOW_TITLE);

        #[cfg(target_arch = "wasm32")]
        {
            use anyhow::Context as _;
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let window = web_sys::window().context("no browser window")?;
            let document = window.document().context("no document")?;
            let canvas = document
                .query_selector(&config.canvas_selector)
                .map_err(|e| anyhow::anyhow!("invalid selector: {:?}", e))?
                .with_context(|| format!("no element matches {}", config.canvas_selector))?;
            let canvas = canvas
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .map_err(|_| anyhow::anyhow!("{} is not a canvas", config.canvas_selector))?;
            window_attributes = window_attributes.with_canvas(Some(canvas));
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = config;

        Ok(Arc::new(event_loop.create_window(window_attributes)?))
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            return;
        };
        let window = match self.create_window(event_loop, &config) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };

        let init_future = AppState::new(window, config);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.async_runtime.block_on(init_future);
            self.initialized(event_loop, result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = init_future.await;
                if proxy.send_event(AppEvent::Initialized(result)).is_err() {
                    log::error!("event loop closed before initialisation finished");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            AppEvent::Initialized(result) => self.initialized(event_loop, result),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let scale_factor = state.ctx.window.scale_factor();
        state.scene.handle_window_event(&event, scale_factor);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::KeyboardInput { event, .. } => match &event.logical_key {
                Key::Character(c)
                    if event.state == ElementState::Pressed
                        && !event.repeat
                        && c.eq_ignore_ascii_case("h") =>
                {
                    state.scene.debug.toggle();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => state.frame(),
            _ => {}
        }
    }
}

/// Run the scene with the default configuration until the window closes.
pub fn run() -> anyhow::Result<()> {
    run_with_config(SceneConfig::default())
}

pub fn run_with_config(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_hook();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }
    }

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
fn console_error_hook() {
    std::panic::set_hook(Box::new(|info| {
        web_sys::console::error_1(&JsValue::from_str(&info.to_string()));
    }));
}
