//! Super NES console family.
//!
//! The SNES pad has the full logical button set — four directions, four
//! face buttons, two shoulders, Start and Select — so the mapping from
//! logical buttons is total. Sessions on this path are single-player.

mod buttons;
mod snes;

pub use buttons::SnesButton;
pub use snes::Snes;

/// A play session running a Super NES core.
pub type SnesSession = deck_frontend::ConsoleSession<Snes>;
