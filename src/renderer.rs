use crate::MAX_LEDS;
use crate::color::{BLACK, Rgb};
use crate::drip::{DripAnimator, DripConfig, TickOutcome};
use crate::event::{EventProcessor, EventReceiver};
use crate::filter::BrightnessFilter;

/// What the strip shows between drips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum IdleBehavior {
    /// Keep the last rendered frame on the strip.
    #[default]
    Hold,
    /// Write a blank frame on every idle tick.
    Clear,
}

/// Configuration for the renderer
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    pub drip: DripConfig,
    pub brightness: u8,
    pub idle: IdleBehavior,
}

impl RendererConfig {
    /// Full brightness, holding the last frame when idle.
    pub const fn new(drip: DripConfig) -> Self {
        Self {
            drip,
            brightness: u8::MAX,
            idle: IdleBehavior::Hold,
        }
    }
}

/// Frame produced by one renderer step
#[derive(Debug)]
pub struct RenderedFrame<'a> {
    /// Pixels of the whole strip
    pub pixels: &'a [Rgb],
    /// The drip reached the end of the strip on this frame
    pub completed: bool,
}

/// Renderer - turns queued events and ticks into frames
pub struct Renderer<'a, const EVENT_CHANNEL_SIZE: usize> {
    events: EventProcessor<'a, EVENT_CHANNEL_SIZE>,
    idle: IdleBehavior,

    animator: DripAnimator,
    frame_buffer: [Rgb; MAX_LEDS],

    brightness: BrightnessFilter,
}

impl<'a, const EVENT_CHANNEL_SIZE: usize> Renderer<'a, EVENT_CHANNEL_SIZE> {
    pub fn new(events: EventReceiver<'a, EVENT_CHANNEL_SIZE>, config: &RendererConfig) -> Self {
        Self {
            events: EventProcessor::new(events),
            idle: config.idle,
            animator: DripAnimator::new(config.drip),
            frame_buffer: [BLACK; MAX_LEDS],
            brightness: BrightnessFilter::new(config.brightness),
        }
    }

    /// Process one frame
    ///
    /// Applies pending events, advances the drip and returns the frame to
    /// write, or `None` when the strip should be left as it is.
    pub fn render(&mut self) -> Option<RenderedFrame<'_>> {
        self.events.process_pending(&mut self.animator);

        let len = self.animator.config().len();
        let frame = &mut self.frame_buffer[..len];
        let outcome = self.animator.tick(frame);

        match outcome {
            TickOutcome::Idle => match self.idle {
                IdleBehavior::Hold => return None,
                IdleBehavior::Clear => frame.fill(BLACK),
            },
            TickOutcome::Completed => log::info!("drip complete"),
            TickOutcome::Running => {}
        }

        self.brightness.apply(frame);
        Some(RenderedFrame {
            pixels: frame,
            completed: outcome == TickOutcome::Completed,
        })
    }

    pub fn animator(&self) -> &DripAnimator {
        &self.animator
    }

    pub fn brightness(&self) -> &BrightnessFilter {
        &self.brightness
    }
}
