//! The NES family description.

use deck_core::{Console, ConsoleFamily, KeyCode, LogicalButton};

use crate::buttons::NesButton;

/// NES console family tag.
///
/// Default keyboard layout for player 1:
/// - Arrows → D-pad
/// - Z → A, X → B
/// - Enter → Start, Right Shift → Select
pub struct Nes;

impl Console for Nes {
    type Button = NesButton;

    const FAMILY: ConsoleFamily = ConsoleFamily::Nes;

    fn translate(button: LogicalButton) -> Option<Self::Button> {
        match button {
            LogicalButton::Up => Some(NesButton::Up),
            LogicalButton::Down => Some(NesButton::Down),
            LogicalButton::Left => Some(NesButton::Left),
            LogicalButton::Right => Some(NesButton::Right),
            LogicalButton::A => Some(NesButton::A),
            LogicalButton::B => Some(NesButton::B),
            LogicalButton::Start => Some(NesButton::Start),
            LogicalButton::Select => Some(NesButton::Select),
            // No X/Y or shoulders on the NES pad.
            LogicalButton::X
            | LogicalButton::Y
            | LogicalButton::LeftShoulder
            | LogicalButton::RightShoulder => None,
        }
    }

    fn button_code(button: Self::Button) -> u32 {
        button.code()
    }

    fn default_key_map() -> Vec<(KeyCode, Self::Button)> {
        vec![
            (KeyCode::ArrowUp, NesButton::Up),
            (KeyCode::ArrowDown, NesButton::Down),
            (KeyCode::ArrowLeft, NesButton::Left),
            (KeyCode::ArrowRight, NesButton::Right),
            (KeyCode::KeyZ, NesButton::A),
            (KeyCode::KeyX, NesButton::B),
            (KeyCode::Enter, NesButton::Start),
            (KeyCode::ShiftRight, NesButton::Select),
        ]
    }
}
