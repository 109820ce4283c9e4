//! Fixed-rate drip ticks.
//!
//! The scheduler only computes deadlines; the caller owns the clock and does
//! the sleeping, so the same code paces a tokio task or a bare-metal loop.

use embassy_time::{Duration, Instant};

use crate::{PixelSink, Renderer};

/// Default drip tick period (20 FPS).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(50);

/// Outcome of one scheduled tick
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the next tick is due.
    pub next_deadline: Instant,
    /// Time left until `next_deadline`, zero when already late.
    pub sleep_duration: Duration,
    /// A drip finished on this frame.
    pub completed: bool,
}

/// Drives a [`Renderer`] at a fixed period and pushes its frames to a sink.
///
/// Falling more than two periods behind resets the schedule to `now` rather
/// than replaying the missed ticks. A failed write only loses that frame.
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, sink);
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     if result.completed {
///         notify_drip_end();
///     }
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O: PixelSink, const EVENT_CHANNEL_SIZE: usize> {
    output: O,
    renderer: Renderer<'a, EVENT_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: PixelSink, const EVENT_CHANNEL_SIZE: usize> FrameScheduler<'a, O, EVENT_CHANNEL_SIZE> {
    /// Scheduler ticking every [`DEFAULT_FRAME_DURATION`].
    pub fn new(renderer: Renderer<'a, EVENT_CHANNEL_SIZE>, sink: O) -> Self {
        Self::with_frame_duration(renderer, sink, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        renderer: Renderer<'a, EVENT_CHANNEL_SIZE>,
        sink: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: sink,
            renderer,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Run one drip tick at `now` and write the frame, if any.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_lag = self.frame_duration * 2;
        if now > self.next_frame + max_lag {
            self.next_frame = now;
        }

        let mut completed = false;
        if let Some(frame) = self.renderer.render() {
            completed = frame.completed;
            if let Err(err) = self.output.write(frame.pixels) {
                log::warn!("failed to write frame: {err:?}");
            }
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            completed,
        }
    }

    /// Turn the strip off (best-effort).
    pub fn blank(&mut self) {
        if let Err(err) = self.output.clear() {
            log::warn!("failed to blank the strip: {err:?}");
        }
    }

    pub fn renderer(&self) -> &Renderer<'a, EVENT_CHANNEL_SIZE> {
        &self.renderer
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Release the pixel sink.
    pub fn into_output(self) -> O {
        self.output
    }
}
