//! Physical device registry.
//!
//! Tracks connected input devices, assigns player slots, and turns raw
//! device state into edge-triggered logical-button events. Gamepads are
//! normalized to [`LogicalButton`] transitions; keyboards deliver raw
//! [`KeyCode`]s to a separate receiver since key codes carry no button
//! meaning of their own.

use deck_core::{InputReceiver, KeyCode, KeyboardReceiver, LogicalButton};

/// Stable identifier for a registered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(u32);

/// What kind of physical device this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Keyboard,
    Gamepad,
}

/// A directional axis on a pad.
///
/// Sticks and d-pads reported as axes share the same direction pairs but
/// keep independent state, so one going neutral never clobbers the other's
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAxis {
    StickX,
    StickY,
    DpadX,
    DpadY,
}

impl PadAxis {
    const COUNT: usize = 4;

    const fn index(self) -> usize {
        match self {
            Self::StickX => 0,
            Self::StickY => 1,
            Self::DpadX => 2,
            Self::DpadY => 3,
        }
    }

    /// Buttons for the positive and negative ends of this axis.
    const fn directions(self) -> (LogicalButton, LogicalButton) {
        match self {
            Self::StickX | Self::DpadX => (LogicalButton::Right, LogicalButton::Left),
            Self::StickY | Self::DpadY => (LogicalButton::Up, LogicalButton::Down),
        }
    }
}

/// Three-way axis classification.
///
/// Exactly +1 presses the positive direction, exactly -1 the negative,
/// anything else releases both. There is no dead zone beyond that: the
/// consumed pads report d-pad axes as ±1/0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AxisLean {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl AxisLean {
    fn classify(value: f32) -> Self {
        if value >= 1.0 {
            Self::Positive
        } else if value <= -1.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// A connected physical input device.
#[derive(Debug)]
pub struct Device {
    id: DeviceId,
    kind: DeviceKind,
    name: String,
    battery_percent: Option<u8>,
    slot: Option<u8>,
    held_buttons: Vec<LogicalButton>,
    held_keys: Vec<KeyCode>,
    axes: [AxisLean; PadAxis::COUNT],
}

impl Device {
    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Battery charge in percent, when the device reports one.
    #[must_use]
    pub fn battery_percent(&self) -> Option<u8> {
        self.battery_percent
    }

    /// Assigned player slot, 1-based. `None` until assigned or defaulted.
    #[must_use]
    pub fn slot(&self) -> Option<u8> {
        self.slot
    }
}

/// Registry of connected devices and their player slots.
///
/// All methods are plain data-structure work: nothing blocks, so they are
/// safe to call from an OS-notification callback. Receivers are passed per
/// call rather than stored — the registry holds no reference to whichever
/// session is currently receiving input.
pub struct DeviceRegistry {
    devices: Vec<Device>,
    next_id: u32,
    max_players: u8,
}

impl DeviceRegistry {
    /// Registry with the given player-slot limit (clamped to at least 1).
    #[must_use]
    pub fn new(max_players: u8) -> Self {
        Self {
            devices: Vec::new(),
            next_id: 0,
            max_players: max_players.max(1),
        }
    }

    /// Change the player-slot limit, e.g. when the active console family
    /// changes. Existing assignments are kept; rotation wraps them back
    /// into range.
    pub fn set_max_players(&mut self, max_players: u8) {
        self.max_players = max_players.max(1);
    }

    /// Register a newly connected device.
    ///
    /// Gamepads default to the lowest free slot (the first device becomes
    /// player 1), or no slot when every slot is taken. Keyboards are never
    /// auto-assigned — their raw key path carries no slot.
    pub fn connect(&mut self, kind: DeviceKind, name: impl Into<String>) -> DeviceId {
        let id = DeviceId(self.next_id);
        self.next_id += 1;
        let slot = match kind {
            DeviceKind::Gamepad => self.first_free_slot(),
            DeviceKind::Keyboard => None,
        };
        let name = name.into();
        match slot {
            Some(slot) => tracing::info!("{kind:?} \"{name}\" connected as player {slot}"),
            None => tracing::info!("{kind:?} \"{name}\" connected with no free player slot"),
        }
        self.devices.push(Device {
            id,
            kind,
            name,
            battery_percent: None,
            slot,
            held_buttons: Vec::new(),
            held_keys: Vec::new(),
            axes: [AxisLean::Neutral; PadAxis::COUNT],
        });
        id
    }

    /// Remove a device, freeing its slot.
    ///
    /// Any logical button the device still held is released through the
    /// receiver so nothing stays stuck. Keyboard devices should go through
    /// [`Self::disconnect_keyboard`] so held keys are released on the raw
    /// path instead.
    pub fn disconnect(&mut self, id: DeviceId, receiver: &mut dyn InputReceiver) {
        let Some(index) = self.devices.iter().position(|d| d.id == id) else {
            return;
        };
        let device = self.devices.remove(index);
        tracing::info!("{:?} \"{}\" disconnected", device.kind, device.name);
        if let Some(slot) = device.slot {
            for button in device.held_buttons {
                receiver.button_unpressed(button, slot);
            }
        }
    }

    /// Remove a keyboard device, releasing any held keys.
    pub fn disconnect_keyboard(&mut self, id: DeviceId, receiver: &mut dyn KeyboardReceiver) {
        let Some(index) = self
            .devices
            .iter()
            .position(|d| d.id == id && d.kind == DeviceKind::Keyboard)
        else {
            return;
        };
        let device = self.devices.remove(index);
        tracing::info!("{:?} \"{}\" disconnected", device.kind, device.name);
        for key in device.held_keys {
            receiver.key_unpressed(key);
        }
    }

    /// Advance a device's player slot by one, wrapping at the limit.
    ///
    /// Unassigned devices start at slot 1. Takes effect for subsequent
    /// events only. Two devices may share a slot; both then drive the same
    /// player.
    pub fn rotate_player_slot(&mut self, id: DeviceId) {
        let max_players = self.max_players;
        let Some(device) = self.device_mut(id) else {
            return;
        };
        let slot = match device.slot {
            None => 1,
            Some(slot) => slot % max_players + 1,
        };
        device.slot = Some(slot);
        tracing::info!("{:?} \"{}\" assigned to player {slot}", device.kind, device.name);
    }

    /// Record a battery reading for a device.
    pub fn set_battery(&mut self, id: DeviceId, percent: Option<u8>) {
        if let Some(device) = self.device_mut(id) {
            device.battery_percent = percent;
        }
    }

    /// All registered devices, in connection order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Feed a digital button state from a gamepad.
    ///
    /// Edge-triggered: only a press or release transition reaches the
    /// receiver; repeated identical states are dropped. Devices without a
    /// slot dispatch nothing.
    pub fn button_event(
        &mut self,
        id: DeviceId,
        button: LogicalButton,
        pressed: bool,
        receiver: &mut dyn InputReceiver,
    ) {
        self.apply_button(id, button, pressed, receiver);
    }

    /// Feed an axis reading from a gamepad.
    ///
    /// Classifies the value three ways and synthesizes the press/release
    /// transitions, releasing before pressing so a full reversal never
    /// leaves both directions held.
    pub fn axis_event(
        &mut self,
        id: DeviceId,
        axis: PadAxis,
        value: f32,
        receiver: &mut dyn InputReceiver,
    ) {
        let new = AxisLean::classify(value);
        let old = {
            let Some(device) = self.device_mut(id) else {
                return;
            };
            if device.kind != DeviceKind::Gamepad {
                return;
            }
            let old = device.axes[axis.index()];
            if old == new {
                return;
            }
            device.axes[axis.index()] = new;
            old
        };
        let (positive, negative) = axis.directions();
        if old == AxisLean::Positive {
            self.apply_button(id, positive, false, receiver);
        }
        if old == AxisLean::Negative {
            self.apply_button(id, negative, false, receiver);
        }
        match new {
            AxisLean::Positive => self.apply_button(id, positive, true, receiver),
            AxisLean::Negative => self.apply_button(id, negative, true, receiver),
            AxisLean::Neutral => {}
        }
    }

    /// Feed a raw key state from a keyboard device.
    ///
    /// Routed to the keyboard receiver without normalization. Edge-triggered
    /// like the button path, which also filters OS key repeat.
    pub fn key_event(
        &mut self,
        id: DeviceId,
        key: KeyCode,
        pressed: bool,
        receiver: &mut dyn KeyboardReceiver,
    ) {
        let Some(device) = self.device_mut(id) else {
            return;
        };
        if device.kind != DeviceKind::Keyboard {
            return;
        }
        let held = device.held_keys.iter().position(|&k| k == key);
        match (pressed, held) {
            (true, None) => {
                device.held_keys.push(key);
                receiver.key_pressed(key);
            }
            (false, Some(index)) => {
                device.held_keys.remove(index);
                receiver.key_unpressed(key);
            }
            _ => {}
        }
    }

    fn apply_button(
        &mut self,
        id: DeviceId,
        button: LogicalButton,
        pressed: bool,
        receiver: &mut dyn InputReceiver,
    ) {
        let Some(device) = self.device_mut(id) else {
            return;
        };
        if device.kind != DeviceKind::Gamepad {
            return;
        }
        let Some(slot) = device.slot else {
            return;
        };
        let held = device.held_buttons.iter().position(|&b| b == button);
        match (pressed, held) {
            (true, None) => {
                device.held_buttons.push(button);
                receiver.button_pressed(button, slot);
            }
            (false, Some(index)) => {
                device.held_buttons.remove(index);
                receiver.button_unpressed(button, slot);
            }
            _ => {}
        }
    }

    fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id == id)
    }

    fn first_free_slot(&self) -> Option<u8> {
        (1..=self.max_players).find(|&slot| !self.devices.iter().any(|d| d.slot == Some(slot)))
    }
}
