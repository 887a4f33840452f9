//! Gamepad discovery via gilrs.
//!
//! Drains the gilrs event queue and feeds the device registry: hot-plug
//! becomes connect/disconnect, buttons and axes become normalized
//! [`LogicalButton`]/[`PadAxis`] events. gilrs reports pads that were
//! already plugged in at startup as `Connected` events, so the first poll
//! picks them up too.

use std::collections::HashMap;

use deck_core::{InputReceiver, LogicalButton};
use gilrs::{Axis, Button, Event, EventType, Gilrs, PowerInfo};

use crate::registry::{DeviceId, DeviceKind, DeviceRegistry, PadAxis};

/// Bridge between gilrs and the device registry.
pub struct GamepadHub {
    gilrs: Gilrs,
    ids: HashMap<gilrs::GamepadId, DeviceId>,
}

impl GamepadHub {
    pub fn new() -> Result<Self, gilrs::Error> {
        Ok(Self {
            gilrs: Gilrs::new()?,
            ids: HashMap::new(),
        })
    }

    /// Drain pending gamepad events into the registry.
    ///
    /// Called once per event-loop pass, before the render tick.
    pub fn poll(&mut self, registry: &mut DeviceRegistry, receiver: &mut dyn InputReceiver) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    let gamepad = self.gilrs.gamepad(id);
                    let device = registry.connect(DeviceKind::Gamepad, gamepad.name());
                    registry.set_battery(device, battery_percent(gamepad.power_info()));
                    self.ids.insert(id, device);
                }
                EventType::Disconnected => {
                    if let Some(device) = self.ids.remove(&id) {
                        registry.disconnect(device, receiver);
                    }
                }
                EventType::ButtonPressed(button, _) => {
                    self.forward_button(id, button, true, registry, receiver);
                }
                EventType::ButtonReleased(button, _) => {
                    self.forward_button(id, button, false, registry, receiver);
                }
                EventType::AxisChanged(axis, value, _) => {
                    if let (Some(&device), Some(axis)) = (self.ids.get(&id), map_axis(axis)) {
                        registry.axis_event(device, axis, value, receiver);
                    }
                }
                _ => {}
            }
        }
    }

    /// Registry id of some connected gamepad, if any.
    ///
    /// Arbitrary when several pads are connected; shells wanting a specific
    /// one should pick from [`DeviceRegistry::devices`].
    #[must_use]
    pub fn any_gamepad(&self) -> Option<DeviceId> {
        self.ids.values().next().copied()
    }

    fn forward_button(
        &self,
        id: gilrs::GamepadId,
        button: Button,
        pressed: bool,
        registry: &mut DeviceRegistry,
        receiver: &mut dyn InputReceiver,
    ) {
        if let (Some(&device), Some(button)) = (self.ids.get(&id), map_button(button)) {
            registry.button_event(device, button, pressed, receiver);
        }
    }
}

/// Map a gilrs button to its logical equivalent.
///
/// `None` for buttons with no logical counterpart (triggers, stick clicks,
/// the mode button); those never reach a session.
#[must_use]
pub fn map_button(button: Button) -> Option<LogicalButton> {
    match button {
        Button::South => Some(LogicalButton::A),
        Button::East => Some(LogicalButton::B),
        Button::West => Some(LogicalButton::X),
        Button::North => Some(LogicalButton::Y),
        Button::DPadUp => Some(LogicalButton::Up),
        Button::DPadDown => Some(LogicalButton::Down),
        Button::DPadLeft => Some(LogicalButton::Left),
        Button::DPadRight => Some(LogicalButton::Right),
        Button::LeftTrigger => Some(LogicalButton::LeftShoulder),
        Button::RightTrigger => Some(LogicalButton::RightShoulder),
        Button::Start => Some(LogicalButton::Start),
        Button::Select => Some(LogicalButton::Select),
        _ => None,
    }
}

/// Map a gilrs axis to a pad axis.
#[must_use]
pub fn map_axis(axis: Axis) -> Option<PadAxis> {
    match axis {
        Axis::LeftStickX => Some(PadAxis::StickX),
        Axis::LeftStickY => Some(PadAxis::StickY),
        Axis::DPadX => Some(PadAxis::DpadX),
        Axis::DPadY => Some(PadAxis::DpadY),
        _ => None,
    }
}

/// Battery charge in percent from a gilrs power report.
#[must_use]
pub fn battery_percent(power: PowerInfo) -> Option<u8> {
    match power {
        PowerInfo::Discharging(percent) | PowerInfo::Charging(percent) => Some(percent),
        PowerInfo::Charged => Some(100),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_map_to_xbox_layout() {
        assert_eq!(map_button(Button::South), Some(LogicalButton::A));
        assert_eq!(map_button(Button::East), Some(LogicalButton::B));
        assert_eq!(map_button(Button::West), Some(LogicalButton::X));
        assert_eq!(map_button(Button::North), Some(LogicalButton::Y));
    }

    #[test]
    fn bumpers_map_to_shoulders() {
        assert_eq!(
            map_button(Button::LeftTrigger),
            Some(LogicalButton::LeftShoulder)
        );
        assert_eq!(
            map_button(Button::RightTrigger),
            Some(LogicalButton::RightShoulder)
        );
    }

    #[test]
    fn analog_triggers_and_stick_clicks_have_no_logical_button() {
        assert_eq!(map_button(Button::LeftTrigger2), None);
        assert_eq!(map_button(Button::RightTrigger2), None);
        assert_eq!(map_button(Button::LeftThumb), None);
        assert_eq!(map_button(Button::RightThumb), None);
        assert_eq!(map_button(Button::Mode), None);
    }

    #[test]
    fn only_left_stick_and_dpad_axes_are_mapped() {
        assert_eq!(map_axis(Axis::LeftStickX), Some(PadAxis::StickX));
        assert_eq!(map_axis(Axis::LeftStickY), Some(PadAxis::StickY));
        assert_eq!(map_axis(Axis::DPadX), Some(PadAxis::DpadX));
        assert_eq!(map_axis(Axis::DPadY), Some(PadAxis::DpadY));
        assert_eq!(map_axis(Axis::RightStickX), None);
        assert_eq!(map_axis(Axis::LeftZ), None);
    }

    #[test]
    fn battery_levels_surface_only_when_reported() {
        assert_eq!(battery_percent(PowerInfo::Discharging(45)), Some(45));
        assert_eq!(battery_percent(PowerInfo::Charging(90)), Some(90));
        assert_eq!(battery_percent(PowerInfo::Charged), Some(100));
        assert_eq!(battery_percent(PowerInfo::Wired), None);
        assert_eq!(battery_percent(PowerInfo::Unknown), None);
    }
}
