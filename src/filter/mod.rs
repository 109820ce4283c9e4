//! Post-processing applied to rendered frames before they reach the sink.

use crate::color::{BLACK, Rgb, scale_color};

/// Global brightness scaling
///
/// Mirrors the fixed brightness the hardware drivers apply on top of the
/// rendered colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessFilter {
    /// Scale factor (0-255 = 0.0-1.0)
    brightness: u8,
}

impl Default for BrightnessFilter {
    fn default() -> Self {
        Self::new(u8::MAX)
    }
}

impl BrightnessFilter {
    pub const fn new(brightness: u8) -> Self {
        Self { brightness }
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Scale every pixel of `frame`.
    pub fn apply(&self, frame: &mut [Rgb]) {
        match self.brightness {
            u8::MAX => {}
            0 => frame.fill(BLACK),
            scale => {
                for pixel in frame.iter_mut() {
                    *pixel = scale_color(*pixel, scale);
                }
            }
        }
    }
}
