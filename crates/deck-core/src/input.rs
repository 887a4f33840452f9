//! Receiver contracts for normalized input.

use crate::buttons::LogicalButton;
use crate::keys::KeyCode;

/// Receives device-agnostic button transitions from the device registry.
///
/// Calls are edge-triggered: one `button_pressed` per press transition, one
/// `button_unpressed` per release, in the order the underlying device state
/// actually changed. `slot` is the 1-based player slot of the originating
/// device.
pub trait InputReceiver {
    fn button_pressed(&mut self, button: LogicalButton, slot: u8);
    fn button_unpressed(&mut self, button: LogicalButton, slot: u8);
}

/// Receives raw key transitions from keyboard devices.
///
/// Keyboards bypass the logical-button path: key codes are not
/// pre-normalized, so the receiver applies its own key map. There is no
/// player slot on this path; receivers conventionally drive player 1.
pub trait KeyboardReceiver {
    fn key_pressed(&mut self, key: KeyCode);
    fn key_unpressed(&mut self, key: KeyCode);
}
