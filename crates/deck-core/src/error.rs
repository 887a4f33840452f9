//! Session boot errors.

use thiserror::Error;

/// Why a session failed to boot.
///
/// Boot failures are ordinary status values the shell checks; nothing here
/// is fatal. Per-frame failures (image conversion) are absorbed by the
/// render pump and never surface as a `BootError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BootError {
    /// `boot` was called with no cartridge inserted.
    #[error("no cartridge inserted")]
    CartridgeMissing,
    /// The emulator core rejected the cartridge or save path.
    #[error("emulator core rejected the cartridge")]
    CoreInitFailed,
}
