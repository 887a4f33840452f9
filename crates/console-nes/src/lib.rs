//! NES console family.
//!
//! The NES pad has eight buttons — four directions, A, B, Start and
//! Select. X, Y and the shoulders have no NES equivalent, so the logical
//! mapping is partial: those buttons are dropped silently, never errors.
//! Sessions on this path drive up to four controllers.

mod buttons;
mod nes;

pub use buttons::NesButton;
pub use nes::Nes;

/// A play session running a NES core.
pub type NesSession = deck_frontend::ConsoleSession<Nes>;
