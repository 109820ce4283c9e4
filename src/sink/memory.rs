use core::convert::Infallible;

use crate::PixelSink;
use crate::color::{BLACK, Rgb};

/// In-memory strip
///
/// Optionally records every committed frame.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pixels: Vec<Rgb>,
    frames: Vec<Vec<Rgb>>,
    shown: Vec<Rgb>,
    record: bool,
}

impl MemorySink {
    /// Strip that keeps the history of committed frames.
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![BLACK; len],
            frames: Vec::new(),
            shown: vec![BLACK; len],
            record: true,
        }
    }

    /// Strip that only keeps the visible frame.
    pub fn headless(len: usize) -> Self {
        Self {
            record: false,
            ..Self::new(len)
        }
    }

    /// Staged pixels, including changes not yet shown.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Committed frames, oldest first. Empty for a headless sink.
    pub fn frames(&self) -> &[Vec<Rgb>] {
        &self.frames
    }

    /// The frame currently visible on the strip.
    pub fn shown(&self) -> &[Rgb] {
        &self.shown
    }
}

impl PixelSink for MemorySink {
    type Error = Infallible;

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        self.shown.clone_from(&self.pixels);
        if self.record {
            self.frames.push(self.pixels.clone());
        }
        Ok(())
    }
}
