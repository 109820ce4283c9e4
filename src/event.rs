//! Drip events
//!
//! The control link pushes events into a bounded channel; the renderer drains
//! them at the start of every frame, before the animation advances.

use crate::channel::{Channel, Receiver, Sender};
use crate::drip::DripAnimator;

/// Capacity of the trigger queue.
///
/// One slot is enough: a start that arrives while another one is pending
/// would be ignored by the animator anyway.
pub const TRIGGER_CHANNEL_SIZE: usize = 1;

/// Request coming from the control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DripEvent {
    /// Start a drip unless one is in flight
    Start,
}

/// Type alias for event sender
pub type EventSender<'a, const SIZE: usize> = Sender<'a, DripEvent, SIZE>;

/// Type alias for event receiver
pub type EventReceiver<'a, const SIZE: usize> = Receiver<'a, DripEvent, SIZE>;

/// Type alias for the event channel
pub type EventChannel<const SIZE: usize> = Channel<DripEvent, SIZE>;

/// Applies queued events to an animator
pub struct EventProcessor<'a, const SIZE: usize> {
    events: EventReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> EventProcessor<'a, SIZE> {
    pub const fn new(events: EventReceiver<'a, SIZE>) -> Self {
        Self { events }
    }

    /// Drain all pending events (non-blocking)
    ///
    /// Returns the number of drips that actually started.
    pub fn process_pending(&mut self, animator: &mut DripAnimator) -> usize {
        let mut started = 0;
        for event in self.events.drain() {
            match event {
                DripEvent::Start => {
                    if animator.trigger() {
                        log::debug!("drip started");
                        started += 1;
                    } else {
                        log::trace!("start ignored, drip already in flight");
                    }
                }
            }
        }
        started
    }
}
