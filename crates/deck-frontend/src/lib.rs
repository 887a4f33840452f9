//! Runner infrastructure for the console front-end.
//!
//! This crate provides everything between the host's event loop and an
//! external emulation core:
//!
//! - [`DeviceRegistry`] — tracks physical devices, assigns player slots,
//!   and dispatches edge-triggered logical-button events.
//! - [`GamepadHub`] — gilrs adapter feeding the registry (hot-plug,
//!   battery, button/axis normalization).
//! - [`convert_keycode`] — winit keyboard conversion for the raw key path.
//! - [`RenderPump`] — pulls one frame per tick from the core and publishes
//!   a converted [`deck_core::RenderImage`] to the display sink.
//! - [`ConsoleSession`] — binds a cartridge to a core handle and a pump.
//! - [`FrameClock`] — cooperative 60 Hz tick source.
//!
//! Everything runs on the host's single event-loop thread: device
//! notifications, input callbacks, and render ticks are serialized, so
//! nothing here locks and nothing blocks.

mod clock;
mod gamepad;
mod keyboard;
mod pump;
mod registry;
mod session;

pub use clock::FrameClock;
pub use gamepad::{GamepadHub, battery_percent, map_axis, map_button};
pub use keyboard::convert_keycode;
pub use pump::{RenderPump, convert_frame};
pub use registry::{Device, DeviceId, DeviceKind, DeviceRegistry, PadAxis};
pub use session::{ConsoleSession, SessionConfig};
