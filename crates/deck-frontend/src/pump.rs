//! The render pump.
//!
//! One pump per booted session. Each tick it asks the core for exactly one
//! frame, converts the raw bytes into an RGBA image, and hands that image
//! to the display sink. The frame buffer is allocated once and reused; the
//! pixel layout is queried once at construction and fixed thereafter.

use std::cell::RefCell;
use std::rc::Weak;

use deck_core::{DisplaySink, EmulatorCore, FrameFormat, RenderImage};

/// Pulls frames from an emulator core and publishes them.
///
/// The pump owns the core handle; dropping the pump releases it. The sink
/// is held weakly and looked up at publish time, so the shell may replace
/// or drop its presentation layer without touching the pump.
pub struct RenderPump {
    core: Box<dyn EmulatorCore>,
    format: FrameFormat,
    buffer: Vec<u8>,
    sink: Option<Weak<RefCell<dyn DisplaySink>>>,
    rendering: bool,
}

impl RenderPump {
    /// Build a pump around a freshly created core handle.
    #[must_use]
    pub fn new(core: Box<dyn EmulatorCore>) -> Self {
        let format = core.frame_format();
        Self {
            buffer: vec![0; format.buffer_len()],
            core,
            format,
            sink: None,
            rendering: false,
        }
    }

    /// Pixel layout the core declared at construction.
    #[must_use]
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Attach the display sink frames are published to.
    pub fn attach_sink(&mut self, sink: Weak<RefCell<dyn DisplaySink>>) {
        self.sink = Some(sink);
    }

    /// Run one frame: advance the core, convert, publish.
    ///
    /// At most one frame render is in flight at a time; a tick that arrives
    /// while one is running is skipped, never queued. A frame that fails to
    /// convert is skipped too — the sink keeps its previous image and the
    /// cadence continues.
    pub fn tick(&mut self) {
        if self.rendering {
            return;
        }
        self.rendering = true;

        assert_eq!(
            self.buffer.len(),
            self.format.buffer_len(),
            "frame buffer does not match the core's declared format"
        );
        self.core.advance_frame_into(&mut self.buffer);

        match convert_frame(self.format, &self.buffer) {
            Some(image) => self.publish(image),
            None => tracing::warn!(
                "failed to convert {}x{} frame ({} bytes/pixel); keeping previous image",
                self.format.width,
                self.format.height,
                self.format.bytes_per_pixel
            ),
        }

        self.rendering = false;
    }

    pub(crate) fn press_button(&mut self, button: u32, player: u8) {
        self.core.press_button(button, player);
    }

    pub(crate) fn release_button(&mut self, button: u32, player: u8) {
        self.core.release_button(button, player);
    }

    fn publish(&self, image: RenderImage) {
        let Some(sink) = self.sink.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        sink.borrow_mut().present(image);
    }
}

/// Convert one raw frame into a displayable RGBA image.
///
/// Frame bytes are big-endian with no alpha channel; `bytes_per_pixel`
/// selects the layout: 2 = RGB565, 3 = RGB888, 4 = XRGB8888. Returns
/// `None` for any other stride or a buffer that does not match the format.
#[must_use]
pub fn convert_frame(format: FrameFormat, bytes: &[u8]) -> Option<RenderImage> {
    if bytes.len() != format.buffer_len() {
        return None;
    }

    let mut rgba = Vec::with_capacity((format.width * format.height * 4) as usize);
    match format.bytes_per_pixel {
        2 => {
            for pixel in bytes.chunks_exact(2) {
                let value = u16::from_be_bytes([pixel[0], pixel[1]]);
                let r = ((value >> 11) & 0x1F) as u8;
                let g = ((value >> 5) & 0x3F) as u8;
                let b = (value & 0x1F) as u8;
                // Expand 5/6-bit channels to 8 bits by replicating high bits
                rgba.extend_from_slice(&[
                    (r << 3) | (r >> 2),
                    (g << 2) | (g >> 4),
                    (b << 3) | (b >> 2),
                    0xFF,
                ]);
            }
        }
        3 => {
            for pixel in bytes.chunks_exact(3) {
                rgba.extend_from_slice(&[pixel[0], pixel[1], pixel[2], 0xFF]);
            }
        }
        4 => {
            for pixel in bytes.chunks_exact(4) {
                rgba.extend_from_slice(&[pixel[1], pixel[2], pixel[3], 0xFF]);
            }
        }
        _ => return None,
    }

    RenderImage::from_rgba(format.width, format.height, rgba)
}
