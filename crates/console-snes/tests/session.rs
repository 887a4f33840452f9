//! End-to-end tests: device registry → translation → session → core.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use console_snes::{SnesButton, SnesSession};
use deck_core::{
    BootError, ConsoleFamily, CoreLoader, DisplaySink, EmulatorCore, FrameFormat, LogicalButton,
    RenderImage,
};
use deck_frontend::{ConsoleSession, DeviceKind, DeviceRegistry, PadAxis};

#[derive(Clone, Default)]
struct Probe {
    presses: Rc<RefCell<Vec<(u32, u8)>>>,
    releases: Rc<RefCell<Vec<(u32, u8)>>>,
    advances: Rc<Cell<u32>>,
}

struct RecordingCore {
    probe: Probe,
}

impl EmulatorCore for RecordingCore {
    fn frame_format(&self) -> FrameFormat {
        // SNES-shaped frames in big-endian RGB565.
        FrameFormat {
            width: 256,
            height: 224,
            bytes_per_pixel: 2,
        }
    }

    fn advance_frame_into(&mut self, buffer: &mut [u8]) {
        assert_eq!(buffer.len(), self.frame_format().buffer_len());
        self.probe.advances.set(self.probe.advances.get() + 1);
    }

    fn press_button(&mut self, button: u32, player: u8) {
        self.probe.presses.borrow_mut().push((button, player));
    }

    fn release_button(&mut self, button: u32, player: u8) {
        self.probe.releases.borrow_mut().push((button, player));
    }
}

struct RecordingLoader {
    probe: Probe,
}

impl CoreLoader for RecordingLoader {
    fn create(&self, _cartridge: &Path, _save_file: &Path) -> Option<Box<dyn EmulatorCore>> {
        Some(Box::new(RecordingCore {
            probe: self.probe.clone(),
        }))
    }
}

#[derive(Default)]
struct CollectSink {
    images: Vec<RenderImage>,
}

impl DisplaySink for CollectSink {
    fn present(&mut self, image: RenderImage) {
        self.images.push(image);
    }
}

fn booted_session(probe: &Probe) -> SnesSession {
    let mut session = ConsoleSession::new(Box::new(RecordingLoader {
        probe: probe.clone(),
    }));
    session.insert_cartridge("game.sfc").expect("boot succeeds");
    session
}

#[test]
fn boot_without_cartridge_reports_missing() {
    let probe = Probe::default();
    let mut session: SnesSession = ConsoleSession::new(Box::new(RecordingLoader { probe }));
    assert_eq!(session.boot(), Err(BootError::CartridgeMissing));
}

#[test]
fn gamepad_press_reaches_the_core_exactly_once() {
    let probe = Probe::default();
    let mut session = booted_session(&probe);
    let mut registry = DeviceRegistry::new(ConsoleFamily::Snes.max_players());

    let pad = registry.connect(DeviceKind::Gamepad, "Test Pad");
    assert_eq!(registry.device(pad).and_then(|d| d.slot()), Some(1));

    // Repeated identical reads collapse to one transition.
    registry.button_event(pad, LogicalButton::A, true, &mut session);
    registry.button_event(pad, LogicalButton::A, true, &mut session);

    assert_eq!(*probe.presses.borrow(), vec![(SnesButton::A.code(), 1)]);
}

#[test]
fn dpad_axis_round_trip_presses_and_releases_once() {
    let probe = Probe::default();
    let mut session = booted_session(&probe);
    let mut registry = DeviceRegistry::new(ConsoleFamily::Snes.max_players());
    let pad = registry.connect(DeviceKind::Gamepad, "Test Pad");

    registry.axis_event(pad, PadAxis::DpadX, 1.0, &mut session);
    registry.axis_event(pad, PadAxis::DpadX, 0.0, &mut session);

    assert_eq!(*probe.presses.borrow(), vec![(SnesButton::Right.code(), 1)]);
    assert_eq!(*probe.releases.borrow(), vec![(SnesButton::Right.code(), 1)]);
}

#[test]
fn disconnect_mid_press_releases_the_button() {
    let probe = Probe::default();
    let mut session = booted_session(&probe);
    let mut registry = DeviceRegistry::new(ConsoleFamily::Snes.max_players());
    let pad = registry.connect(DeviceKind::Gamepad, "Test Pad");

    registry.button_event(pad, LogicalButton::B, true, &mut session);
    registry.disconnect(pad, &mut session);

    assert_eq!(*probe.releases.borrow(), vec![(SnesButton::B.code(), 1)]);
}

#[test]
fn second_player_input_is_ignored_on_the_single_player_path() {
    let probe = Probe::default();
    let mut session = booted_session(&probe);

    session.press_button(SnesButton::A, 2);
    assert!(probe.presses.borrow().is_empty());

    session.press_button(SnesButton::A, 1);
    assert_eq!(*probe.presses.borrow(), vec![(SnesButton::A.code(), 1)]);
}

#[test]
fn sixty_ticks_publish_sixty_frames() {
    let probe = Probe::default();
    let mut session = booted_session(&probe);
    let sink = Rc::new(RefCell::new(CollectSink::default()));
    session.set_display_sink(&sink);

    for _ in 0..60 {
        session.tick();
    }

    assert_eq!(probe.advances.get(), 60);
    let images = sink.borrow();
    assert_eq!(images.images.len(), 60);
    assert_eq!((images.images[0].width(), images.images[0].height()), (256, 224));
}
