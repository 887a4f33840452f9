//! Console family descriptions.

use crate::buttons::LogicalButton;
use crate::keys::KeyCode;

/// Tag identifying a supported console family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleFamily {
    /// Super Nintendo Entertainment System.
    Snes,
    /// Nintendo Entertainment System / Famicom.
    Nes,
}

impl ConsoleFamily {
    /// Highest player slot sessions of this family accept.
    ///
    /// The SNES path is single-player; the NES path drives up to four
    /// controllers. Slots outside `1..=max_players()` are ignored by
    /// sessions, never rejected as errors.
    #[must_use]
    pub const fn max_players(self) -> u8 {
        match self {
            Self::Snes => 1,
            Self::Nes => 4,
        }
    }

    /// Human-readable family name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Snes => "Super NES",
            Self::Nes => "NES",
        }
    }
}

/// Static description of a console family.
///
/// Implementations are zero-sized tags; one per family crate. The mapping
/// from [`LogicalButton`] onto the family's native set is a pure, total
/// function — every logical button has a defined result, which is `None`
/// for buttons the family does not have. Existing mappings are stable;
/// adding a family means adding an implementation, not editing one.
pub trait Console {
    /// Native button enum for this family.
    type Button: Copy + core::fmt::Debug;

    /// Which family this is.
    const FAMILY: ConsoleFamily;

    /// Map a device-agnostic button onto this family's button set.
    fn translate(button: LogicalButton) -> Option<Self::Button>;

    /// Raw code for a native button, as consumed by the emulator core.
    fn button_code(button: Self::Button) -> u32;

    /// Default host-keyboard bindings for player 1.
    fn default_key_map() -> Vec<(KeyCode, Self::Button)>;
}
