//! Pixel sink adapters for host builds.

mod memory;
mod spi;
mod terminal;

pub use memory::MemorySink;
pub use spi::{DEFAULT_SPEED_HZ, SpiDevice, Ws2812Spi, encode_frame, encoded_len};
pub use terminal::TerminalSink;
