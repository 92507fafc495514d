//! winit event loop shared by the desktop (glutin) and web (canvas) targets.
//!
//! Everything except GL setup and presentation lives here: native events are
//! translated into the [`EventBridge`] as they arrive, and each
//! `RedrawRequested` runs one program frame. `about_to_wait` requests the next
//! redraw, so with `ControlFlow::Poll` the loop renders continuously.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use kiln_core::math::{IVec2, UVec2};

use super::winit_input::{map_button, map_cursor, map_key};
use crate::bridge::EventBridge;
use crate::config::PlatformConfig;
use crate::error::PlatformError;
use crate::program::{Context, LoopControl, Program};

#[cfg(not(target_arch = "wasm32"))]
type Target = super::desktop::DesktopTarget;
#[cfg(target_arch = "wasm32")]
type Target = super::web::CanvasTarget;

/// A window with a current GL context that can be drawn into.
pub(crate) trait GlTarget: Sized {
    fn create(
        event_loop: &ActiveEventLoop,
        config: &PlatformConfig,
    ) -> Result<Self, PlatformError>;

    fn window(&self) -> &Window;

    fn gl(&self) -> &glow::Context;

    /// Drawable size in physical pixels.
    fn drawable_size(&self) -> UVec2;

    fn resize(&self, size: UVec2);

    /// Shows the frame just drawn.
    fn present(&self);

    /// Monotonic timestamp in seconds.
    fn now(&self) -> f64;

    /// Called once per loop iteration before the redraw is requested.
    fn poll(&self) {}
}

struct Running<P> {
    // Dropped first: the program may own GL objects.
    program: P,
    target: Target,
}

struct App<P: Program> {
    config: PlatformConfig,
    bridge: EventBridge,
    running: Option<Running<P>>,
    exit_state: Result<(), PlatformError>,
}

impl<P: Program> App<P> {
    fn new(config: PlatformConfig) -> Self {
        let bridge = EventBridge::new(config.max_events_per_frame);
        Self {
            config,
            bridge,
            running: None,
            exit_state: Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running<P>, PlatformError> {
        let target = Target::create(event_loop, &self.config)?;
        let size = target.drawable_size();
        log::info!("Window created: {}x{}", size.x, size.y);

        // Programs see the initial size as a regular resize on their first frame.
        self.bridge.resize(size);

        let program = P::init(&mut Context {
            gl: target.gl(),
            config: &self.config,
            size,
        })?;
        Ok(Running { program, target })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let now = running.target.now();
        let outcome = self.bridge.run_frame(&mut running.program, now);
        if let Some(cursor) = outcome.cursor {
            running.target.window().set_cursor(map_cursor(cursor));
        }
        if outcome.control == LoopControl::Exit {
            log::info!("Program requested exit");
            event_loop.exit();
            return;
        }

        running.program.draw(running.target.gl());
        running.target.present();
    }
}

impl<P: Program> ApplicationHandler for App<P> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                log::error!("{e}");
                self.exit_state = Err(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.target.poll();
            running.target.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = self.running.as_ref() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.bridge.close();
            }

            WindowEvent::Resized(physical_size) => {
                let size = UVec2::new(physical_size.width, physical_size.height);
                running.target.resize(size);
                self.bridge.resize(size);
            }

            WindowEvent::Focused(false) => self.bridge.focus_lost(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => self.bridge.key_down(key),
                            ElementState::Released => self.bridge.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.bridge
                    .mouse_move(IVec2::new(position.x as i32, position.y as i32));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = map_button(button) {
                    let position = self.bridge.mouse_position();
                    self.bridge
                        .mouse_button(button, state == ElementState::Pressed, position);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Opens the window, initializes `P` and runs it until it asks to exit.
///
/// On the web the browser owns the loop: this returns as soon as the loop is
/// scheduled, and initialization errors are only logged.
pub fn run<P: Program>(config: PlatformConfig) -> Result<(), PlatformError> {
    config.validate().map_err(PlatformError::Window)?;

    let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    start_event_loop(event_loop, App::<P>::new(config))
}

#[cfg(not(target_arch = "wasm32"))]
fn start_event_loop<P: Program>(
    event_loop: EventLoop<()>,
    mut app: App<P>,
) -> Result<(), PlatformError> {
    event_loop
        .run_app(&mut app)
        .map_err(|e| PlatformError::EventLoop(e.to_string()))?;
    app.exit_state
}

#[cfg(target_arch = "wasm32")]
fn start_event_loop<P: Program>(
    event_loop: EventLoop<()>,
    app: App<P>,
) -> Result<(), PlatformError> {
    use winit::platform::web::EventLoopExtWebSys;

    event_loop.spawn_app(app);
    Ok(())
}
