use std::sync::Arc;

use crossbeam_channel::Receiver;
use winit::window::Window;

use crate::driver::FrameDriver;
use crate::error::VisError;
use crate::field;
use crate::pose::PoseFeed;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::signals::ControlSignals;

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    driver: FrameDriver,
    signal_rx: Receiver<ControlSignals>,
}

impl App {
    pub async fn new(window: Arc<Window>, settings: &Settings) -> Result<Self, VisError> {
        // Bind before anything else so a bad tracker address fails startup.
        let feed = PoseFeed::bind(&settings.tracking.listen_addr, &settings.tracking.oracle)?;
        let (signal_tx, signal_rx) = crossbeam_channel::unbounded();
        let _feed = feed.spawn(signal_tx);

        let mut rng = rand::rng();
        let particles = field::generate(
            settings.field.particle_count,
            settings.field.height_range,
            &mut rng,
        );
        log::info!("generated particle field: {} particles", particles.len());

        let renderer =
            Renderer::new(window.clone(), &particles, &settings.field, &settings.display).await?;

        Ok(Self {
            window,
            renderer,
            driver: FrameDriver::new(),
            signal_rx,
        })
    }

    /// Handles one window event. Returns true when the app should exit.
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        match event {
            winit::event::WindowEvent::CloseRequested => {
                return true;
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return true;
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            _ => {}
        }
        false
    }

    /// One tick of the steady-state loop: advance the driver, draw.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.driver.tick(&self.signal_rx);
        self.renderer.render(&frame)
    }

    pub fn reconfigure_surface(&mut self) {
        self.renderer.reconfigure();
    }
}
