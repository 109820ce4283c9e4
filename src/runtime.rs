//! Service loop
//!
//! Runs the control link and the frame ticker side by side in one task. The
//! link feeds starts into the single-slot trigger queue; the ticker drains it
//! before every frame and queues a `DRIP_END` when a drip completes.

use std::future::Future;

use embassy_time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::PixelSink;
use crate::control::{Backoff, ControlLink};
use crate::event::{EventChannel, TRIGGER_CHANNEL_SIZE};
use crate::frame_scheduler::{DEFAULT_FRAME_DURATION, FrameScheduler};
use crate::message::ControlMessage;
use crate::renderer::{Renderer, RendererConfig};

/// Everything the service needs besides the pixel sink
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Control server URL, e.g. `ws://localhost:3000`
    pub url: String,
    pub renderer: RendererConfig,
    /// Animation tick period
    pub tick: Duration,
    pub backoff: Backoff,
}

impl RuntimeConfig {
    pub fn new(url: impl Into<String>, renderer: RendererConfig) -> Self {
        Self {
            url: url.into(),
            renderer,
            tick: DEFAULT_FRAME_DURATION,
            backoff: Backoff::default(),
        }
    }
}

/// Run the service until `shutdown` resolves.
///
/// The strip is blanked on start and again on the way out; the sink is handed
/// back afterwards.
pub async fn run<S, F>(config: &RuntimeConfig, sink: S, shutdown: F) -> S
where
    S: PixelSink,
    F: Future<Output = ()>,
{
    let events = EventChannel::<TRIGGER_CHANNEL_SIZE>::new();
    let (notifications, mut outbound) = mpsc::unbounded_channel();

    let renderer = Renderer::new(events.receiver(), &config.renderer);
    let mut scheduler = FrameScheduler::with_frame_duration(renderer, sink, config.tick);
    scheduler.blank();

    let link = ControlLink::new(config.url.clone(), config.backoff);
    log::info!("LED service ready, connecting to {}", link.url());

    tokio::select! {
        () = link.run(events.sender(), &mut outbound) => log::warn!("control link stopped"),
        () = drive(&mut scheduler, &notifications) => {}
        () = shutdown => log::info!("shutting down"),
    }

    scheduler.blank();
    scheduler.into_output()
}

async fn drive<S: PixelSink, const SIZE: usize>(
    scheduler: &mut FrameScheduler<'_, S, SIZE>,
    notifications: &UnboundedSender<ControlMessage>,
) {
    let start = tokio::time::Instant::now();
    loop {
        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        let result = scheduler.tick(Instant::from_micros(elapsed));

        if result.completed && notifications.send(ControlMessage::DripEnd).is_err() {
            log::warn!("notification queue closed, DRIP_END lost");
        }

        let sleep = std::time::Duration::from_micros(result.sleep_duration.as_micros());
        tokio::time::sleep(sleep).await;
    }
}
