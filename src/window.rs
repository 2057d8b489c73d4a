//! Windowed demo shell: winit event loop driving a [`ParticleSystem`]
//! onto a [`Canvas`].
//!
//! Escape closes the window, Space pauses and resumes the simulation.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::canvas::{Canvas, SpriteTexture};
use crate::error::RunError;
use crate::system::ParticleSystem;
use crate::texture::SpriteImage;
use crate::time::Time;

const WINDOW_SIZE: u32 = 600;

struct App {
    system: ParticleSystem,
    sprite_image: SpriteImage,
    window: Option<Arc<Window>>,
    canvas: Option<Canvas>,
    sprite: Option<SpriteTexture>,
    time: Time,
    failure: Option<RunError>,
}

impl App {
    fn new(system: ParticleSystem, sprite_image: SpriteImage) -> Self {
        Self {
            system,
            sprite_image,
            window: None,
            canvas: None,
            sprite: None,
            time: Time::new(),
            failure: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("sparkly")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.failure = Some(RunError::Window(err));
                event_loop.exit();
                return;
            }
        };

        let canvas = match pollster::block_on(Canvas::new(window.clone())) {
            Ok(canvas) => canvas,
            Err(err) => {
                self.failure = Some(RunError::Gpu(err));
                event_loop.exit();
                return;
            }
        };

        self.sprite = Some(canvas.create_sprite(&self.sprite_image));
        self.window = Some(window);
        self.canvas = Some(canvas);
        self.time = Time::new();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(canvas) = &mut self.canvas {
                    canvas.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => event_loop.exit(),
                Key::Named(NamedKey::Space) => self.time.toggle_pause(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let dt = self.time.update();

                if let (Some(canvas), Some(sprite)) = (&mut self.canvas, &mut self.sprite) {
                    self.system.step(canvas, sprite, dt);

                    match canvas.present(sprite) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            let size = winit::dpi::PhysicalSize {
                                width: canvas.config.width,
                                height: canvas.config.height,
                            };
                            canvas.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(err) => eprintln!("present error: {err:?}"),
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Run the windowed demo until the user closes it.
pub fn run(system: ParticleSystem, sprite_image: SpriteImage) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(system, sprite_image);
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
