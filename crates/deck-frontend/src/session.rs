//! Console sessions.
//!
//! A session binds a cartridge to an external core handle and a render
//! pump for one console family. The state machine is small: uninitialized
//! until booted, back to uninitialized on teardown or cartridge ejection.
//! The core handle lives inside the pump, which lives inside the booted
//! state — dropping any of them releases the native resources exactly
//! once, without an explicit teardown call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use deck_core::{
    BootError, Console, CoreLoader, DisplaySink, FrameFormat, InputReceiver, KeyCode,
    KeyboardReceiver, LogicalButton,
};

use crate::pump::RenderPump;

/// Session behaviour knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Boot immediately whenever a cartridge is inserted.
    pub auto_boot: bool,
    /// Directory for save files; next to the cartridge when `None`.
    pub save_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_boot: true,
            save_dir: None,
        }
    }
}

enum State {
    Uninitialized,
    Booted(RenderPump),
}

/// A play session for one console family.
///
/// Receives normalized input as an [`InputReceiver`] (gamepads) and raw
/// keys as a [`KeyboardReceiver`] (keyboards, mapped to player 1 through a
/// per-family key map).
pub struct ConsoleSession<C: Console> {
    loader: Box<dyn CoreLoader>,
    config: SessionConfig,
    cartridge: Option<PathBuf>,
    key_map: HashMap<KeyCode, C::Button>,
    sink: Option<Weak<RefCell<dyn DisplaySink>>>,
    state: State,
    _family: PhantomData<C>,
}

impl<C: Console> ConsoleSession<C> {
    /// Session with default configuration (auto-boot on insert).
    #[must_use]
    pub fn new(loader: Box<dyn CoreLoader>) -> Self {
        Self::with_config(loader, SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(loader: Box<dyn CoreLoader>, config: SessionConfig) -> Self {
        Self {
            loader,
            config,
            cartridge: None,
            key_map: C::default_key_map().into_iter().collect(),
            sink: None,
            state: State::Uninitialized,
            _family: PhantomData,
        }
    }

    #[must_use]
    pub fn is_booted(&self) -> bool {
        matches!(self.state, State::Booted(_))
    }

    #[must_use]
    pub fn cartridge(&self) -> Option<&Path> {
        self.cartridge.as_deref()
    }

    pub fn set_auto_boot(&mut self, auto_boot: bool) {
        self.config.auto_boot = auto_boot;
    }

    /// Insert or replace the cartridge.
    ///
    /// Any running core is torn down first. With auto-boot enabled the
    /// session boots the new cartridge immediately; otherwise it stays
    /// uninitialized until [`Self::boot`] is called.
    pub fn insert_cartridge(&mut self, path: impl Into<PathBuf>) -> Result<(), BootError> {
        self.shutdown();
        self.cartridge = Some(path.into());
        if self.config.auto_boot { self.boot() } else { Ok(()) }
    }

    /// Remove the cartridge, tearing down any running core.
    pub fn eject_cartridge(&mut self) {
        self.shutdown();
        self.cartridge = None;
    }

    /// Boot the inserted cartridge.
    ///
    /// Fails with [`BootError::CartridgeMissing`] when no cartridge is
    /// inserted and [`BootError::CoreInitFailed`] when the external core
    /// rejects it. Both are status values for the shell, not panics.
    pub fn boot(&mut self) -> Result<(), BootError> {
        let cartridge = self.cartridge.clone().ok_or(BootError::CartridgeMissing)?;
        // The previous handle goes away before the next one is created.
        self.shutdown();

        let save_file = self.save_path(&cartridge);
        let core = self
            .loader
            .create(&cartridge, &save_file)
            .ok_or(BootError::CoreInitFailed)?;

        let mut pump = RenderPump::new(core);
        if let Some(sink) = &self.sink {
            pump.attach_sink(sink.clone());
        }
        tracing::info!(
            "{} session booted: {}",
            C::FAMILY.name(),
            cartridge.display()
        );
        self.state = State::Booted(pump);
        Ok(())
    }

    /// Tear down the running core, if any.
    ///
    /// The display sink keeps its last published frame; the shell clears
    /// it explicitly if it wants a blank screen.
    pub fn shutdown(&mut self) {
        if self.is_booted() {
            tracing::info!("{} session shut down", C::FAMILY.name());
        }
        self.state = State::Uninitialized;
    }

    /// Pixel layout of the booted core's frames; `None` until booted.
    #[must_use]
    pub fn frame_format(&self) -> Option<FrameFormat> {
        match &self.state {
            State::Booted(pump) => Some(pump.format()),
            State::Uninitialized => None,
        }
    }

    /// Run one render tick. Does nothing unless booted.
    pub fn tick(&mut self) {
        if let State::Booted(pump) = &mut self.state {
            pump.tick();
        }
    }

    /// Attach the display sink; re-attached automatically across boots.
    pub fn set_display_sink<S: DisplaySink + 'static>(&mut self, sink: &Rc<RefCell<S>>) {
        let rc: Rc<RefCell<dyn DisplaySink>> = sink.clone();
        let weak: Weak<RefCell<dyn DisplaySink>> = Rc::downgrade(&rc);
        self.sink = Some(weak.clone());
        if let State::Booted(pump) = &mut self.state {
            pump.attach_sink(weak);
        }
    }

    /// Bind a host key to a native button for the keyboard path.
    pub fn bind_key(&mut self, key: KeyCode, button: C::Button) {
        self.key_map.insert(key, button);
    }

    /// Press a native button for a player.
    ///
    /// No-op unless booted and `slot` is within `1..=max_players` for this
    /// family — out-of-range slots are ignored, not errors.
    pub fn press_button(&mut self, button: C::Button, slot: u8) {
        if !Self::slot_in_range(slot) {
            return;
        }
        if let State::Booted(pump) = &mut self.state {
            pump.press_button(C::button_code(button), slot);
        }
    }

    /// Release a native button for a player. Same slot rules as presses.
    pub fn release_button(&mut self, button: C::Button, slot: u8) {
        if !Self::slot_in_range(slot) {
            return;
        }
        if let State::Booted(pump) = &mut self.state {
            pump.release_button(C::button_code(button), slot);
        }
    }

    fn slot_in_range(slot: u8) -> bool {
        (1..=C::FAMILY.max_players()).contains(&slot)
    }

    fn save_path(&self, cartridge: &Path) -> PathBuf {
        match &self.config.save_dir {
            Some(dir) => {
                let name = cartridge.file_name().unwrap_or_else(|| OsStr::new("cartridge"));
                dir.join(name).with_extension("sav")
            }
            None => cartridge.with_extension("sav"),
        }
    }
}

impl<C: Console> InputReceiver for ConsoleSession<C> {
    fn button_pressed(&mut self, button: LogicalButton, slot: u8) {
        if let Some(native) = C::translate(button) {
            self.press_button(native, slot);
        }
    }

    fn button_unpressed(&mut self, button: LogicalButton, slot: u8) {
        if let Some(native) = C::translate(button) {
            self.release_button(native, slot);
        }
    }
}

impl<C: Console> KeyboardReceiver for ConsoleSession<C> {
    fn key_pressed(&mut self, key: KeyCode) {
        if let Some(&native) = self.key_map.get(&key) {
            self.press_button(native, 1);
        }
    }

    fn key_unpressed(&mut self, key: KeyCode) {
        if let Some(&native) = self.key_map.get(&key) {
            self.release_button(native, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ConsoleFamily, EmulatorCore, FrameFormat, RenderImage};
    use std::cell::Cell;

    /// Minimal console family: two mapped buttons, the rest dropped.
    struct TestPad;

    impl Console for TestPad {
        type Button = u8;

        const FAMILY: ConsoleFamily = ConsoleFamily::Nes;

        fn translate(button: LogicalButton) -> Option<Self::Button> {
            match button {
                LogicalButton::A => Some(0),
                LogicalButton::B => Some(1),
                _ => None,
            }
        }

        fn button_code(button: Self::Button) -> u32 {
            u32::from(button)
        }

        fn default_key_map() -> Vec<(KeyCode, Self::Button)> {
            vec![(KeyCode::KeyZ, 0)]
        }
    }

    #[derive(Clone, Default)]
    struct Probe {
        created: Rc<RefCell<Vec<(PathBuf, PathBuf)>>>,
        presses: Rc<RefCell<Vec<(u32, u8)>>>,
        releases: Rc<RefCell<Vec<(u32, u8)>>>,
        advances: Rc<Cell<u32>>,
        drops: Rc<Cell<u32>>,
    }

    struct FakeCore {
        probe: Probe,
    }

    impl EmulatorCore for FakeCore {
        fn frame_format(&self) -> FrameFormat {
            FrameFormat {
                width: 4,
                height: 4,
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

    impl Drop for FakeCore {
        fn drop(&mut self) {
            self.probe.drops.set(self.probe.drops.get() + 1);
        }
    }

    struct FakeLoader {
        probe: Probe,
        accept: bool,
    }

    impl CoreLoader for FakeLoader {
        fn create(&self, cartridge: &Path, save_file: &Path) -> Option<Box<dyn EmulatorCore>> {
            self.probe
                .created
                .borrow_mut()
                .push((cartridge.to_path_buf(), save_file.to_path_buf()));
            self.accept.then(|| {
                Box::new(FakeCore {
                    probe: self.probe.clone(),
                }) as Box<dyn EmulatorCore>
            })
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

    fn session(probe: &Probe) -> ConsoleSession<TestPad> {
        ConsoleSession::new(Box::new(FakeLoader {
            probe: probe.clone(),
            accept: true,
        }))
    }

    #[test]
    fn boot_without_cartridge_fails_before_the_loader() {
        let probe = Probe::default();
        let mut session = session(&probe);
        assert_eq!(session.boot(), Err(BootError::CartridgeMissing));
        assert!(probe.created.borrow().is_empty());
        assert!(!session.is_booted());
    }

    #[test]
    fn rejected_cartridge_surfaces_core_init_failure() {
        let probe = Probe::default();
        let mut session: ConsoleSession<TestPad> = ConsoleSession::new(Box::new(FakeLoader {
            probe: probe.clone(),
            accept: false,
        }));
        assert_eq!(
            session.insert_cartridge("broken.nes"),
            Err(BootError::CoreInitFailed)
        );
        assert!(!session.is_booted());
    }

    #[test]
    fn save_file_lands_next_to_the_cartridge() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session
            .insert_cartridge("roms/game.nes")
            .expect("boot succeeds");
        assert_eq!(
            probe.created.borrow()[0],
            (
                PathBuf::from("roms/game.nes"),
                PathBuf::from("roms/game.sav")
            )
        );
    }

    #[test]
    fn save_dir_overrides_save_location() {
        let probe = Probe::default();
        let mut session: ConsoleSession<TestPad> = ConsoleSession::with_config(
            Box::new(FakeLoader {
                probe: probe.clone(),
                accept: true,
            }),
            SessionConfig {
                auto_boot: true,
                save_dir: Some(PathBuf::from("saves")),
            },
        );
        session
            .insert_cartridge("roms/game.nes")
            .expect("boot succeeds");
        assert_eq!(probe.created.borrow()[0].1, PathBuf::from("saves/game.sav"));
    }

    #[test]
    fn replacing_the_cartridge_destroys_the_old_core_once() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("first boot");
        session.insert_cartridge("b.nes").expect("second boot");

        assert_eq!(probe.drops.get(), 1);
        assert_eq!(probe.created.borrow().len(), 2);
        assert!(session.is_booted());
    }

    #[test]
    fn insert_without_auto_boot_stays_uninitialized() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.set_auto_boot(false);
        session.insert_cartridge("a.nes").expect("no boot attempted");
        assert!(!session.is_booted());
        assert!(probe.created.borrow().is_empty());

        session.boot().expect("manual boot");
        assert!(session.is_booted());
    }

    #[test]
    fn shutdown_releases_the_core_exactly_once_and_stops_frames() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("boot");
        session.tick();
        assert_eq!(probe.advances.get(), 1);
        assert!(session.frame_format().is_some());

        session.shutdown();
        session.shutdown();
        assert_eq!(probe.drops.get(), 1);
        assert_eq!(session.frame_format(), None);

        // A tick that was already scheduled finds no pump.
        session.tick();
        assert_eq!(probe.advances.get(), 1);
    }

    #[test]
    fn buttons_before_boot_are_dropped() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.press_button(0, 1);
        assert!(probe.presses.borrow().is_empty());
    }

    #[test]
    fn logical_buttons_translate_and_forward() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("boot");

        session.button_pressed(LogicalButton::A, 1);
        session.button_unpressed(LogicalButton::A, 1);
        assert_eq!(*probe.presses.borrow(), vec![(0, 1)]);
        assert_eq!(*probe.releases.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn unmapped_logical_buttons_never_reach_the_core() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("boot");

        session.button_pressed(LogicalButton::X, 1);
        session.button_pressed(LogicalButton::X, 1);
        session.button_unpressed(LogicalButton::LeftShoulder, 1);
        assert!(probe.presses.borrow().is_empty());
        assert!(probe.releases.borrow().is_empty());
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("boot");

        session.press_button(0, 0);
        session.press_button(0, 5);
        session.button_pressed(LogicalButton::A, 7);
        assert!(probe.presses.borrow().is_empty());

        session.press_button(0, 4);
        assert_eq!(*probe.presses.borrow(), vec![(0, 4)]);
    }

    #[test]
    fn keyboard_keys_drive_player_one() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("boot");

        session.key_pressed(KeyCode::KeyZ);
        session.key_unpressed(KeyCode::KeyZ);
        session.key_pressed(KeyCode::KeyQ);
        assert_eq!(*probe.presses.borrow(), vec![(0, 1)]);
        assert_eq!(*probe.releases.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn bound_keys_extend_the_key_map() {
        let probe = Probe::default();
        let mut session = session(&probe);
        session.insert_cartridge("a.nes").expect("boot");

        session.bind_key(KeyCode::Space, 1);
        session.key_pressed(KeyCode::Space);
        assert_eq!(*probe.presses.borrow(), vec![(1, 1)]);
    }

    #[test]
    fn sink_attached_before_boot_receives_frames() {
        let probe = Probe::default();
        let mut session = session(&probe);
        let sink = Rc::new(RefCell::new(CollectSink::default()));
        session.set_display_sink(&sink);

        session.insert_cartridge("a.nes").expect("boot");
        session.tick();
        session.tick();
        assert_eq!(sink.borrow().images.len(), 2);
    }

    #[test]
    fn sink_survives_reboot_and_keeps_last_frame_after_shutdown() {
        let probe = Probe::default();
        let mut session = session(&probe);
        let sink = Rc::new(RefCell::new(CollectSink::default()));
        session.set_display_sink(&sink);

        session.insert_cartridge("a.nes").expect("boot");
        session.tick();
        session.insert_cartridge("b.nes").expect("reboot");
        session.tick();
        assert_eq!(sink.borrow().images.len(), 2);

        session.shutdown();
        session.tick();
        // Teardown publishes nothing further and clears nothing.
        assert_eq!(sink.borrow().images.len(), 2);
    }
}
