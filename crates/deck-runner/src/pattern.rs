//! Built-in test-pattern core.
//!
//! Renders a scrolling gradient in the SNES frame format so the shell can
//! be exercised end to end without a native core. Button presses flood the
//! blue channel, making input visible on screen.

use std::path::Path;

use deck_core::{CoreLoader, EmulatorCore, FrameFormat};

const FORMAT: FrameFormat = FrameFormat {
    width: 256,
    height: 224,
    bytes_per_pixel: 2,
};

/// Loader that accepts any cartridge path and produces a pattern core.
pub struct PatternLoader;

impl CoreLoader for PatternLoader {
    fn create(&self, cartridge: &Path, save_file: &Path) -> Option<Box<dyn EmulatorCore>> {
        tracing::info!(
            "pattern core standing in for {} (saves would land at {})",
            cartridge.display(),
            save_file.display()
        );
        Some(Box::new(PatternCore { frame: 0, held: 0 }))
    }
}

/// Scrolling-gradient core in big-endian RGB565.
struct PatternCore {
    frame: u32,
    held: u32,
}

impl EmulatorCore for PatternCore {
    fn frame_format(&self) -> FrameFormat {
        FORMAT
    }

    fn advance_frame_into(&mut self, buffer: &mut [u8]) {
        let width = FORMAT.width;
        for (i, pixel) in buffer.chunks_exact_mut(2).enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            let r = ((x + self.frame) & 0x1F) as u16;
            let g = ((y + self.frame / 2) & 0x3F) as u16;
            let b = if self.held > 0 {
                0x1F
            } else {
                ((x + y) & 0x1F) as u16
            };
            let value = (r << 11) | (g << 5) | b;
            pixel.copy_from_slice(&value.to_be_bytes());
        }
        self.frame = self.frame.wrapping_add(1);
    }

    fn press_button(&mut self, button: u32, player: u8) {
        self.held += 1;
        tracing::debug!("button {button} pressed for player {player}");
    }

    fn release_button(&mut self, button: u32, player: u8) {
        self.held = self.held.saturating_sub(1);
        tracing::debug!("button {button} released for player {player}");
    }
}
