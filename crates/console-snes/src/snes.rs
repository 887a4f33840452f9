//! The Super NES family description.

use deck_core::{Console, ConsoleFamily, KeyCode, LogicalButton};

use crate::buttons::SnesButton;

/// Super NES console family tag.
///
/// Default keyboard layout for player 1:
/// - Arrows → D-pad
/// - X → A, Z → B, S → X, A → Y
/// - Q → L, W → R
/// - Enter → Start, Right Shift → Select
pub struct Snes;

impl Console for Snes {
    type Button = SnesButton;

    const FAMILY: ConsoleFamily = ConsoleFamily::Snes;

    fn translate(button: LogicalButton) -> Option<Self::Button> {
        match button {
            LogicalButton::Up => Some(SnesButton::Up),
            LogicalButton::Down => Some(SnesButton::Down),
            LogicalButton::Left => Some(SnesButton::Left),
            LogicalButton::Right => Some(SnesButton::Right),
            LogicalButton::A => Some(SnesButton::A),
            LogicalButton::B => Some(SnesButton::B),
            LogicalButton::X => Some(SnesButton::X),
            LogicalButton::Y => Some(SnesButton::Y),
            LogicalButton::Start => Some(SnesButton::Start),
            LogicalButton::Select => Some(SnesButton::Select),
            LogicalButton::LeftShoulder => Some(SnesButton::L),
            LogicalButton::RightShoulder => Some(SnesButton::R),
        }
    }

    fn button_code(button: Self::Button) -> u32 {
        button.code()
    }

    fn default_key_map() -> Vec<(KeyCode, Self::Button)> {
        vec![
            (KeyCode::ArrowUp, SnesButton::Up),
            (KeyCode::ArrowDown, SnesButton::Down),
            (KeyCode::ArrowLeft, SnesButton::Left),
            (KeyCode::ArrowRight, SnesButton::Right),
            (KeyCode::KeyX, SnesButton::A),
            (KeyCode::KeyZ, SnesButton::B),
            (KeyCode::KeyS, SnesButton::X),
            (KeyCode::KeyA, SnesButton::Y),
            (KeyCode::KeyQ, SnesButton::L),
            (KeyCode::KeyW, SnesButton::R),
            (KeyCode::Enter, SnesButton::Start),
            (KeyCode::ShiftRight, SnesButton::Select),
        ]
    }
}
