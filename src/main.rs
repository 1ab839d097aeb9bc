use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod animation;
mod app;
mod driver;
mod error;
mod field;
mod interpreter;
mod pose;
mod renderer;
mod settings;
mod signals;

pub const CONFY_APP_NAME: &str = "handvis-rs";

struct AppHandler {
    app: Option<app::App>,
    settings: settings::Settings,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("HandVis-RS - Hand Tracked Particle Field")
                .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("window creation failed: {e}");
                    event_loop.exit();
                    return;
                }
            };
            match pollster::block_on(app::App::new(window, &self.settings)) {
                Ok(app) => self.app = Some(app),
                Err(e) => {
                    log::error!("startup failed: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            if app.handle_event(&event) {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            match app.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    app.reconfigure_surface();
                }
                // A failed tick is abandoned; the next one starts fresh.
                Err(e) => log::error!("render tick failed: {e:?}"),
            }
            app.window.request_redraw();
        }
    }
}

fn main() -> Result<(), error::VisError> {
    env_logger::init();

    let settings = settings::Settings::load();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler {
        app: None,
        settings,
    };

    event_loop.run_app(&mut handler)?;

    Ok(())
}
