//! WS2812 strips driven through a SPI MOSI line.
//!
//! Every LED data bit is stretched to four SPI bits (`1000` for zero, `1110`
//! for one), so one color byte becomes four SPI bytes. At a 3.2 MHz SPI clock
//! that yields the 800 kHz WS2812 bit rate. The frame ends with a run of zero
//! bytes that holds the line low long enough to latch the colors.

use std::io::{self, Write};
use std::path::Path;

use crate::PixelSink;
use crate::color::{BLACK, Rgb};

/// SPI clock that maps four SPI bits onto one 800 kHz WS2812 bit.
pub const DEFAULT_SPEED_HZ: u32 = 3_200_000;

const COLOR_CMD_LEN: usize = 12;
/// 300 µs of low level at 3.2 MHz.
const RESET_LEN: usize = 120;
const PATTERNS: [u8; 4] = [0b1000_1000, 0b1000_1110, 0b1110_1000, 0b1110_1110];

/// Number of SPI bytes needed for `pixels` LEDs.
pub const fn encoded_len(pixels: usize) -> usize {
    COLOR_CMD_LEN * pixels + RESET_LEN
}

/// Encode a frame into the SPI bit stream, in the GRB order the LEDs expect.
pub fn encode_frame(pixels: &[Rgb], out: &mut Vec<u8>) {
    out.clear();
    out.reserve(encoded_len(pixels.len()));
    for pixel in pixels {
        for mut channel in [pixel.g, pixel.r, pixel.b] {
            for _ in 0..4 {
                let pattern = usize::from((channel & 0b1100_0000) >> 6);
                out.push(PATTERNS[pattern]);
                channel <<= 2;
            }
        }
    }
    out.resize(out.len() + RESET_LEN, 0);
}

/// Device handle used by [`Ws2812Spi::open`].
#[cfg(feature = "spidev")]
pub type SpiDevice = spidev::Spidev;

/// Device handle used by [`Ws2812Spi::open`].
#[cfg(not(feature = "spidev"))]
pub type SpiDevice = std::fs::File;

/// WS2812 strip behind any byte writer
pub struct Ws2812Spi<W> {
    writer: W,
    pixels: Vec<Rgb>,
    buffer: Vec<u8>,
}

impl<W: Write> Ws2812Spi<W> {
    pub fn new(writer: W, len: usize) -> Self {
        Self {
            writer,
            pixels: vec![BLACK; len],
            buffer: Vec::with_capacity(encoded_len(len)),
        }
    }

    /// Staged pixel colors.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Ws2812Spi<SpiDevice> {
    /// Open a spidev node (e.g. `/dev/spidev0.0`) and configure its clock.
    #[cfg(feature = "spidev")]
    pub fn open(path: impl AsRef<Path>, len: usize, speed_hz: u32) -> io::Result<Self> {
        use spidev::{SpiModeFlags, Spidev, SpidevOptions};

        let mut device = Spidev::open(path.as_ref())?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        device.configure(&options)?;
        log::info!(
            "opened {} at {speed_hz} Hz for {len} pixels",
            path.as_ref().display()
        );
        Ok(Self::new(device, len))
    }

    /// Open a spidev node (e.g. `/dev/spidev0.0`) as a plain file.
    ///
    /// The clock cannot be set without the `spidev` feature; the node must
    /// already be configured for `speed_hz`.
    #[cfg(not(feature = "spidev"))]
    pub fn open(path: impl AsRef<Path>, len: usize, speed_hz: u32) -> io::Result<Self> {
        let device = std::fs::OpenOptions::new().write(true).open(path.as_ref())?;
        log::warn!(
            "opened {} without clock configuration, expecting {speed_hz} Hz",
            path.as_ref().display()
        );
        Ok(Self::new(device, len))
    }
}

impl<W: Write> PixelSink for Ws2812Spi<W> {
    type Error = io::Error;

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        encode_frame(&self.pixels, &mut self.buffer);
        self.writer.write_all(&self.buffer)?;
        self.writer.flush()
    }
}
