//! Piefall - Coming Soon
//!
//! Pies (and, in the extended variant, "COMING SOON" slabs) tumble down past
//! a fixed camera forever.

use std::error::Error;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use piefall::config::AppConfig;
use piefall::systems::{LogRenderer, RenderSystem, SimulationSystem, WindowSystem};
use piefall_core::IntervalPacer;

/// Frames between window title refreshes
const TITLE_INTERVAL: u64 = 60;

/// Main application state
struct App {
    config: AppConfig,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let simulation = SimulationSystem::new(&config);
        Self {
            config,
            simulation,
            window: None,
            render: None,
        }
    }

    /// Stop the driver and leave the event loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation.stop_handle().stop();
        log::info!(
            "Shutting down after {} frames",
            self.simulation.driver().frame_index()
        );
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.simulation.stop_handle().is_stopped() {
            return;
        }
        let Some(render) = self.render.as_mut() else {
            return;
        };

        for (template, loaded) in self.simulation.receive_templates() {
            render.upload_template(template, &loaded.name, &loaded.mesh);
        }

        match self.simulation.tick(render) {
            Ok(report) => {
                if report.frame % TITLE_INTERVAL == 0 {
                    if let Some(window) = &self.window {
                        window.update_title(self.simulation.object_count(), self.simulation.fps());
                    }
                }
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("Skipping frame: {}", e);
                render.reconfigure();
            }
            Err(e) => {
                log::error!("Render failed: {}", e);
                self.shutdown(event_loop);
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                self.shutdown(event_loop);
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &self.config.camera,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                self.shutdown(event_loop);
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => self.shutdown(event_loop),
                    PhysicalKey::Code(KeyCode::KeyF) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Tick at a fixed rate without a window, logging each frame summary
fn run_headless(config: &AppConfig) {
    let mut simulation = SimulationSystem::new(config);
    let mut renderer = LogRenderer::new(config.debug.stats_interval);
    let mut pacer = IntervalPacer::from_hz(config.debug.headless_fps)
        .with_limit(config.debug.headless_frames);

    log::info!(
        "Running headless for {} frames at {} fps",
        config.debug.headless_frames,
        config.debug.headless_fps
    );

    match simulation.run(&mut pacer, &mut renderer) {
        Ok(_) => {}
        Err(never) => match never {},
    }

    log::info!(
        "Headless run finished after {} frames with {} objects",
        renderer.frames(),
        simulation.object_count()
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load();

    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Piefall");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    if config.debug.headless {
        run_headless(&config);
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
