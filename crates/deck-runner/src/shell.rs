//! The windowed shell.
//!
//! Owns the window and pixel surface, polls gamepads, feeds keyboard input
//! to the session, and runs the render pump at the frame clock's cadence.
//! Everything happens on the event-loop thread; the clock's next deadline
//! drives `ControlFlow::WaitUntil`, so waiting never blocks emulation work.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use console_snes::SnesSession;
use deck_core::{ConsoleFamily, DisplaySink, FrameFormat, RenderImage};
use deck_frontend::{
    DeviceId, DeviceKind, DeviceRegistry, FrameClock, GamepadHub, convert_keycode,
};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Configuration for the shell window.
pub struct ShellConfig {
    /// Window title.
    pub title: String,
    /// Integer scale factor for sharp pixels.
    pub scale: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "Console Deck".to_string(),
            scale: 3,
        }
    }
}

/// Run a booted session in a window.
pub fn run(session: SnesSession, config: ShellConfig) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut shell = Shell::new(session, config);
    event_loop.run_app(&mut shell).expect("Event loop error");
}

/// Display sink holding only the most recent frame.
#[derive(Default)]
struct LatestFrame {
    image: Option<RenderImage>,
}

impl DisplaySink for LatestFrame {
    fn present(&mut self, image: RenderImage) {
        self.image = Some(image);
    }
}

struct Shell {
    session: SnesSession,
    registry: DeviceRegistry,
    hub: Option<GamepadHub>,
    keyboard: DeviceId,
    frame: Rc<RefCell<LatestFrame>>,
    clock: FrameClock,
    config: ShellConfig,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
}

impl Shell {
    fn new(mut session: SnesSession, config: ShellConfig) -> Self {
        let mut registry = DeviceRegistry::new(ConsoleFamily::Snes.max_players());
        let keyboard = registry.connect(DeviceKind::Keyboard, "Host Keyboard");

        let hub = match GamepadHub::new() {
            Ok(hub) => Some(hub),
            Err(err) => {
                tracing::warn!(
                    "Failed to initialize gamepad support: {err}. Gamepads will not be available."
                );
                None
            }
        };

        let frame = Rc::new(RefCell::new(LatestFrame::default()));
        session.set_display_sink(&frame);

        Self {
            session,
            registry,
            hub,
            keyboard,
            frame,
            clock: FrameClock::new(60),
            config,
            window: None,
            pixels: None,
        }
    }

    fn rotate_active_gamepad(&mut self) {
        let Some(id) = self.hub.as_ref().and_then(GamepadHub::any_gamepad) else {
            tracing::info!("no gamepad connected");
            return;
        };
        self.registry.rotate_player_slot(id);
        for device in self.registry.devices() {
            tracing::info!(
                "{:?} \"{}\": slot {:?}, battery {:?}",
                device.kind(),
                device.name(),
                device.slot(),
                device.battery_percent()
            );
        }
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Create the window on first resume only.
        if self.window.is_some() {
            return;
        }

        let format = self.session.frame_format().unwrap_or(FrameFormat {
            width: 256,
            height: 224,
            bytes_per_pixel: 2,
        });
        let scaled_width = format.width * self.config.scale;
        let scaled_height = format.height * self.config.scale;

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(&self.config.title)
                        .with_inner_size(LogicalSize::new(scaled_width, scaled_height)),
                )
                .expect("Failed to create window"),
        );

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels =
            Pixels::new(format.width, format.height, surface).expect("Failed to create pixels");

        self.window = Some(window);
        // SAFETY: pixels' lifetime is tied to the window, which lives for
        // the rest of the program.
        self.pixels = Some(unsafe { std::mem::transmute(pixels) });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(pixels) = &mut self.pixels {
                        pixels.resize_surface(size.width, size.height).ok();
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;

                    if code == WinitKeyCode::Escape && pressed {
                        event_loop.exit();
                        return;
                    }
                    if code == WinitKeyCode::F2 && pressed && !event.repeat {
                        self.rotate_active_gamepad();
                    }

                    if let Some(key) = convert_keycode(code) {
                        self.registry
                            .key_event(self.keyboard, key, pressed, &mut self.session);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(pixels) = &mut self.pixels {
                    if let Some(image) = self.frame.borrow().image.as_ref() {
                        let buffer = pixels.frame_mut();
                        if buffer.len() == image.data().len() {
                            buffer.copy_from_slice(image.data());
                        }
                    }
                    if pixels.render().is_err() {
                        event_loop.exit();
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Skip until the window exists.
        if self.window.is_none() {
            return;
        }

        if let Some(hub) = &mut self.hub {
            hub.poll(&mut self.registry, &mut self.session);
        }

        if self.clock.tick_due(Instant::now()) {
            self.session.tick();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }
}
