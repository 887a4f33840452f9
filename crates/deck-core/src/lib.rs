//! Core traits and types for the console front-end.
//!
//! This crate defines the seams the rest of the workspace plugs into:
//!
//! - [`EmulatorCore`] — the opaque handle to an external emulation core,
//!   together with [`CoreLoader`] for creating one from a cartridge.
//! - [`Console`] — a static description of a console family: its native
//!   button set and how device-agnostic [`LogicalButton`]s map onto it.
//! - [`InputReceiver`] / [`KeyboardReceiver`] — where normalized input ends
//!   up (gamepads are pre-normalized to logical buttons, keyboards deliver
//!   raw key codes).
//! - [`DisplaySink`] — where finished [`RenderImage`]s go, one per tick.
//!
//! No windowing or device crates appear here; adapters for those live in
//! `deck-frontend`.

mod buttons;
mod console;
mod emulator;
mod error;
mod input;
mod keys;
mod video;

pub use buttons::LogicalButton;
pub use console::{Console, ConsoleFamily};
pub use emulator::{CoreLoader, EmulatorCore, FrameFormat};
pub use error::BootError;
pub use input::{InputReceiver, KeyboardReceiver};
pub use keys::KeyCode;
pub use video::{DisplaySink, RenderImage};
