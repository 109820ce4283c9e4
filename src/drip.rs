//! Gravity drip animation
//!
//! A single drop travels from the first pixel to the last one. Its step size
//! follows a quadratic ease-in curve, so it leaves slowly and speeds up
//! towards the end of the strip like a falling drop. Two dimmer pixels trail
//! behind it.

use displaydoc::Display;

use crate::MAX_LEDS;
use crate::color::{BLACK, DROP_COLOR, Rgb, trail_color};
use crate::math8::ease_in_quad;

const DEFAULT_TRAIL_LENGTH: usize = 2;
const DEFAULT_VELOCITY_BASE: f32 = 0.25;
const DEFAULT_ACCELERATION: f32 = 2.0;
const DEFAULT_TRAIL_BRIGHTNESS: u8 = 150;
const DEFAULT_TRAIL_FALLOFF: u8 = 30;

/// Invalid drip parameters.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum DripConfigError {
    /// strip needs at least 2 pixels, got {0}
    TooShort(usize),
    /// strip of {0} pixels exceeds the limit of {1}
    TooLong(usize, usize),
    /// velocity base must be a positive number, got {0}
    Velocity(f32),
    /// acceleration must be a non-negative number, got {0}
    Acceleration(f32),
}

#[cfg(feature = "std")]
impl std::error::Error for DripConfigError {}

/// Drip animation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DripConfig {
    len: usize,
    trail_length: usize,
    velocity_base: f32,
    acceleration: f32,
    drop_color: Rgb,
    trail_brightness: u8,
    trail_falloff: u8,
}

impl DripConfig {
    /// Default parameters for a strip of `len` pixels.
    pub const fn new(len: usize) -> Result<Self, DripConfigError> {
        if len < 2 {
            return Err(DripConfigError::TooShort(len));
        }
        if len > MAX_LEDS {
            return Err(DripConfigError::TooLong(len, MAX_LEDS));
        }
        Ok(Self {
            len,
            trail_length: DEFAULT_TRAIL_LENGTH,
            velocity_base: DEFAULT_VELOCITY_BASE,
            acceleration: DEFAULT_ACCELERATION,
            drop_color: DROP_COLOR,
            trail_brightness: DEFAULT_TRAIL_BRIGHTNESS,
            trail_falloff: DEFAULT_TRAIL_FALLOFF,
        })
    }

    /// Set the per-tick base step and the coefficient of the eased part.
    pub fn with_motion(
        mut self,
        velocity_base: f32,
        acceleration: f32,
    ) -> Result<Self, DripConfigError> {
        if !(velocity_base.is_finite() && velocity_base > 0.0) {
            return Err(DripConfigError::Velocity(velocity_base));
        }
        if !(acceleration.is_finite() && acceleration >= 0.0) {
            return Err(DripConfigError::Acceleration(acceleration));
        }
        self.velocity_base = velocity_base;
        self.acceleration = acceleration;
        Ok(self)
    }

    /// Set the number of pixels drawn behind the drop
    #[must_use]
    pub const fn with_trail_length(mut self, trail_length: usize) -> Self {
        self.trail_length = trail_length;
        self
    }

    /// Set the brightness of the tail at lag zero and its drop per pixel
    #[must_use]
    pub const fn with_trail_brightness(mut self, start: u8, falloff: u8) -> Self {
        self.trail_brightness = start;
        self.trail_falloff = falloff;
        self
    }

    /// Set the color of the leading pixel
    #[must_use]
    pub const fn with_drop_color(mut self, color: Rgb) -> Self {
        self.drop_color = color;
        self
    }

    /// Number of pixels on the strip.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a config covers at least two pixels.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn trail_length(&self) -> usize {
        self.trail_length
    }

    /// Index of the last pixel, where a drip ends.
    #[allow(clippy::cast_precision_loss)]
    pub const fn end(&self) -> f32 {
        (self.len - 1) as f32
    }

    /// Brightness of the tail pixel `lag` steps behind the drop.
    ///
    /// `None` once the falloff reaches zero.
    pub fn trail_brightness(&self, lag: usize) -> Option<u8> {
        let drop = i32::from(self.trail_falloff).saturating_mul(i32::try_from(lag).ok()?);
        let brightness = i32::from(self.trail_brightness) - drop;
        if brightness > 0 {
            u8::try_from(brightness).ok()
        } else {
            None
        }
    }
}

/// Position of the drop along the strip
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DripState {
    /// Fractional pixel index in `[0, len - 1]`
    pub position: f32,
    /// Whether a drip is in flight
    pub active: bool,
}

/// Result of advancing the animation by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No drip in flight; nothing was rendered.
    Idle,
    /// The drop moved and a frame was rendered.
    Running,
    /// The drop reached the last pixel on this tick. Reported once per drip.
    Completed,
}

/// Drip state machine
#[derive(Debug, Clone)]
pub struct DripAnimator {
    config: DripConfig,
    state: DripState,
}

impl DripAnimator {
    /// Create an idle animator.
    pub const fn new(config: DripConfig) -> Self {
        Self {
            config,
            state: DripState {
                position: 0.0,
                active: false,
            },
        }
    }

    pub const fn config(&self) -> &DripConfig {
        &self.config
    }

    pub const fn state(&self) -> DripState {
        self.state
    }

    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    /// Start a drip from the first pixel.
    ///
    /// Ignored while a drip is already in flight. Returns whether a new drip
    /// started.
    pub fn trigger(&mut self) -> bool {
        if self.state.active {
            return false;
        }
        self.state = DripState {
            position: 0.0,
            active: true,
        };
        true
    }

    /// Advance the drop and render it into `leds`.
    ///
    /// Leaves `leds` untouched while idle.
    pub fn tick(&mut self, leds: &mut [Rgb]) -> TickOutcome {
        if !self.state.active {
            return TickOutcome::Idle;
        }

        let end = self.config.end();
        let progress = self.state.position / end;
        let eased = ease_in_quad(progress);
        self.state.position += self.config.velocity_base + eased * self.config.acceleration;

        let outcome = if self.state.position >= end {
            self.state.position = end;
            self.state.active = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Running
        };

        self.render(leds);
        outcome
    }

    /// Draw the drop at its current position.
    ///
    /// Only the first `len` pixels of `leds` belong to the strip; all of them
    /// are overwritten.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(&self, leds: &mut [Rgb]) {
        let strip_len = self.config.len.min(leds.len());
        let strip = &mut leds[..strip_len];
        strip.fill(BLACK);

        let main = libm::floorf(self.state.position) as usize;
        if let Some(pixel) = strip.get_mut(main) {
            *pixel = self.config.drop_color;
        }

        for lag in 1..=self.config.trail_length {
            let Some(index) = main.checked_sub(lag) else {
                break;
            };
            if let Some(brightness) = self.config.trail_brightness(lag) {
                if let Some(pixel) = strip.get_mut(index) {
                    *pixel = trail_color(brightness);
                }
            }
        }
    }
}
