//! Application event loop.
//!
//! [`App`] owns the [`Demo`] state and the GPU [`Context`] and drives them
//! from winit callbacks:
//!
//! 1. `resumed` creates the window, the demo and the GPU context, then starts
//!    loading matcaps and the font in the background
//! 2. asset results come back as [`FlowEvent`]s through the event loop proxy
//! 3. window events go to egui first, then to the orbit controls and the
//!    double-click detector
//! 4. every redraw advances the demo to the clock's elapsed time, renders and
//!    requests the next frame until the stop handle is set

use std::fmt::Debug;
use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::{
    config::SceneConfig,
    context::Context,
    demo::Demo,
    render_loop::{Clock, StopHandle},
    resources::loader::{AssetEvent, AssetLoader},
    viewport::toggle_fullscreen,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Events posted back to the event loop from background work.
pub enum FlowEvent {
    /// The GPU context finished initialising. Only the web initialises
    /// asynchronously; native blocks in `resumed`.
    #[cfg(target_arch = "wasm32")]
    Initialized(Box<anyhow::Result<Context>>),
    Asset(AssetEvent),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(target_arch = "wasm32")]
            Self::Initialized(ctx) => f
                .debug_tuple("Initialized")
                .field(&ctx.is_ok())
                .finish(),
            Self::Asset(event) => f.debug_tuple("Asset").field(event).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    config: Option<SceneConfig>,
    demo: Option<Demo>,
    ctx: Option<Context>,
    clock: Clock,
    stop: StopHandle,
    /// Matcaps that arrived before the GPU context existed.
    pending_matcaps: Vec<(usize, image::DynamicImage)>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(
        event_loop: &EventLoop<FlowEvent>,
        config: SceneConfig,
        stop: StopHandle,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            config: Some(config),
            demo: None,
            ctx: None,
            clock: Clock::new(),
            stop,
            pending_matcaps: Vec::new(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        self.stop.stop();
        event_loop.exit();
    }

    fn window_attributes(config: &SceneConfig) -> winit::window::WindowAttributes {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(config.label.clone());

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes =
                        window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!("no #{CANVAS_ID} element, winit will create a canvas"),
            }
        }

        window_attributes
    }

    fn on_context_ready(&mut self, mut ctx: Context) {
        if let Some(demo) = &self.demo {
            for (slot, image) in self.pending_matcaps.drain(..) {
                ctx.set_matcap(demo, slot, image);
            }
            ctx.resize(demo.viewport.physical_size());
        }
        ctx.window().request_redraw();
        self.ctx = Some(ctx);
    }

    fn on_asset(&mut self, event: AssetEvent) {
        let Some(demo) = &mut self.demo else {
            log::debug!("dropping {event:?}, no scene yet");
            return;
        };
        match event {
            AssetEvent::Matcap {
                slot,
                image: Ok(image),
            } => {
                log::info!("matcap {slot} loaded");
                match &mut self.ctx {
                    Some(ctx) => ctx.set_matcap(demo, slot, image),
                    None => self.pending_matcaps.push((slot, image)),
                }
            }
            AssetEvent::Matcap {
                slot,
                image: Err(err),
            } => {
                log::warn!("matcap {slot} failed to load, keeping placeholder: {err:#}");
            }
            AssetEvent::Font(Ok(font)) => match demo.on_font_resolved(&font) {
                Ok(Some(node)) => log::info!("text node {node:?} added"),
                Ok(None) => (),
                Err(err) => log::warn!("could not build text: {err}"),
            },
            AssetEvent::Font(Err(err)) => {
                log::warn!("font failed to load, no text will be shown: {err:#}");
            }
        }
    }

    fn redraw(&mut self) {
        let (Some(demo), Some(ctx)) = (&mut self.demo, &mut self.ctx) else {
            return;
        };
        demo.tick(self.clock.elapsed());
        match ctx.render(demo) {
            Ok(()) => (),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                ctx.reconfigure();
            }
            Err(err) => log::error!("unable to render: {err}"),
        }
        ctx.window().request_redraw();
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            // Already initialised; a resume after suspend keeps the scene.
            return;
        };

        let window = match event_loop.create_window(Self::window_attributes(&config)) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let scale_factor = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale_factor);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let clear_colour = config.clear_colour;
        let loader = AssetLoader::new(
            self.proxy.clone(),
            #[cfg(not(target_arch = "wasm32"))]
            self.async_runtime.handle().clone(),
        );
        loader.load_matcaps(&config);
        loader.load_font(&config.font_path);

        let mut demo = Demo::new(config, logical, scale_factor, &mut rng);
        demo.set_stop_handle(self.stop.clone());
        let physical = demo.viewport.physical_size();
        log::info!(
            "scene ready: {} nodes, viewport {}x{}",
            demo.scene.len(),
            physical.width,
            physical.height
        );
        self.demo = Some(demo);

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self
                .async_runtime
                .block_on(Context::new(window, physical, clear_colour))
            {
                Ok(ctx) => self.on_context_ready(ctx),
                Err(err) => self.fail(event_loop, err),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let ctx = Context::new(window, physical, clear_colour).await;
                if proxy
                    .send_event(FlowEvent::Initialized(Box::new(ctx)))
                    .is_err()
                {
                    log::debug!("event loop closed before the context was ready");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            #[cfg(target_arch = "wasm32")]
            FlowEvent::Initialized(ctx) => match *ctx {
                Ok(ctx) => self.on_context_ready(ctx),
                Err(err) => self.fail(event_loop, err),
            },
            FlowEvent::Asset(asset) => self.on_asset(asset),
        }
        if self.stop.is_stopped() {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let (Some(demo), Some(ctx)) = (&mut self.demo, &mut self.ctx) else {
            if let WindowEvent::CloseRequested = event {
                self.stop.stop();
                event_loop.exit();
            }
            return;
        };

        let consumed = ctx.gui.on_window_event(&ctx.window, &event);
        if !consumed && demo.handle_window_event(&event, ctx.window.scale_factor()) {
            toggle_fullscreen(ctx.window());
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.stop.stop();
            }
            WindowEvent::Resized(size) => {
                let scale_factor = ctx.window.scale_factor();
                let physical = demo.resize(size.to_logical(scale_factor), scale_factor);
                ctx.resize(physical);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("scale factor changed to {scale_factor}");
            }
            WindowEvent::RedrawRequested => {
                if !demo.should_stop() {
                    self.redraw();
                }
            }
            _ => (),
        }

        if self.stop.is_stopped() {
            event_loop.exit();
        }
    }
}

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {e}");
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {e}").into());
        }
    }
}

/// Opens the window and runs the demo until the window closes or `stop` is set.
pub fn run_with_stop(config: SceneConfig, stop: StopHandle) -> anyhow::Result<()> {
    init_logging();

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config, stop)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    run_with_stop(config, StopHandle::new())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|err| JsValue::from_str(&format!("{err:#}")))
}
