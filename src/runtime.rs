//! Channel-driven event loop for the face.
//!
//! Host callbacks (timer, battery, radio, companion messages) become
//! [`Event`]s pushed into one channel. A single task drains it and hands each
//! event to the [`DisplayController`], so handlers never overlap.
//!
//! # Example
//!
//! ```rust,ignore
//! use yaswf::runtime::{spawn_minute_ticker, FaceRuntime};
//!
//! let (runtime, events) = FaceRuntime::new(DisplayController::new(host, store));
//! spawn_minute_ticker(events.clone(), SystemClock::new(true));
//!
//! events.send(Event::BluetoothChanged(false))?;
//! let face = runtime.run().await;
//! ```

use std::time::Duration;

use chrono::Timelike;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::{DisplayController, Event};
use crate::host::{ClockSource, Host, KeyValueStore};
use crate::Error;

/// Extra delay after the minute boundary so the clock has rolled over
const TICK_MARGIN: Duration = Duration::from_millis(10);

/// Cloneable handle for pushing events to a running face.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Queue an event. Fails once the face has shut down.
    pub fn send(&self, event: Event) -> Result<(), Error> {
        self.tx
            .send(event)
            .map_err(|e| Error::Channel(format!("face stopped, dropped {:?}", e.0)))
    }

    /// Whether the face has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns a face and the receiving end of its event channel.
pub struct FaceRuntime<H, S> {
    face: DisplayController<H, S>,
    events: mpsc::UnboundedReceiver<Event>,
}

impl<H: Host, S: KeyValueStore> FaceRuntime<H, S> {
    /// Wrap a face that has not been started yet.
    pub fn new(face: DisplayController<H, S>) -> (Self, EventSender) {
        let (tx, events) = mpsc::unbounded_channel();
        (Self { face, events }, EventSender { tx })
    }

    /// Start the face and handle events until shutdown.
    ///
    /// Returns when [`Event::Shutdown`] arrives or every sender is dropped.
    /// The face is stopped before it is returned.
    pub async fn run(mut self) -> DisplayController<H, S> {
        self.face.start();

        while let Some(event) = self.events.recv().await {
            let shutdown = matches!(event, Event::Shutdown);
            self.face.handle(event);
            if shutdown {
                tracing::info!("Shutdown requested");
                break;
            }
        }

        self.events.close();
        self.face.stop();
        self.face
    }
}

/// Time until the next wall-clock minute boundary.
fn until_next_minute<T: Timelike>(now: &T) -> Duration {
    // Leap seconds report nanosecond() >= 1e9
    let nanos = u64::from(now.nanosecond().min(999_999_999));
    let secs = 60 - u64::from(now.second().min(59));
    Duration::from_secs(secs) - Duration::from_nanos(nanos) + TICK_MARGIN
}

/// Send [`Event::Tick`] at every minute boundary until the face stops.
pub fn spawn_minute_ticker<C>(events: EventSender, clock: C) -> JoinHandle<()>
where
    C: ClockSource + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let wait = until_next_minute(&clock.now());
            tokio::time::sleep(wait).await;

            if let Err(e) = events.send(Event::Tick(clock.now())) {
                tracing::debug!("Minute ticker stopping: {}", e);
                break;
            }
        }
    })
}
