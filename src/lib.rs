#![cfg_attr(not(feature = "std"), no_std)]

pub mod channel;
pub mod color;
pub mod drip;
pub mod event;
pub mod filter;
pub mod frame_scheduler;
pub mod math8;
pub mod renderer;

#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod control;
#[cfg(feature = "std")]
pub mod message;
#[cfg(feature = "std")]
pub mod relay;
#[cfg(feature = "std")]
pub mod runtime;
#[cfg(feature = "std")]
pub mod sink;

pub use drip::{DripAnimator, DripConfig, DripConfigError, DripState, TickOutcome};
pub use event::{
    DripEvent, EventChannel, EventProcessor, EventReceiver, EventSender, TRIGGER_CHANNEL_SIZE,
};
pub use filter::BrightnessFilter;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use renderer::{IdleBehavior, RenderedFrame, Renderer, RendererConfig};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Maximum number of LEDs a renderer can drive.
pub const MAX_LEDS: usize = 300;

/// Addressable LED output device
///
/// Pixels are staged with [`set`](PixelSink::set) and become visible on the
/// strip only after [`show`](PixelSink::show). Implement this trait to support
/// a new LED controller.
pub trait PixelSink {
    /// Error reported when a frame cannot be committed.
    type Error: core::fmt::Debug;

    /// Number of pixels on the strip.
    fn len(&self) -> usize;

    /// Returns `true` if the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage a pixel color. Indices outside the strip are ignored.
    fn set(&mut self, index: usize, color: Rgb);

    /// Commit all staged pixels to the device.
    fn show(&mut self) -> Result<(), Self::Error>;

    /// Stage a whole frame and commit it.
    fn write(&mut self, frame: &[Rgb]) -> Result<(), Self::Error> {
        let count = self.len().min(frame.len());
        for (index, color) in frame.iter().take(count).enumerate() {
            self.set(index, *color);
        }
        self.show()
    }

    /// Turn every pixel off and commit.
    fn clear(&mut self) -> Result<(), Self::Error> {
        for index in 0..self.len() {
            self.set(index, color::BLACK);
        }
        self.show()
    }
}
