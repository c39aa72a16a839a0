use futures::{FutureExt, StreamExt};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_stream::wrappers::UnboundedReceiverStream;

use lmind_relay::LinkEvent;

use crate::LedMinderError;

/// Everything the control loop can be woken up for. Link events and
/// timer ticks land in one queue so their relative order is explicit:
/// a command that arrived before a tick is applied before that tick's
/// telemetry publish.
#[derive(Debug)]
pub enum Event {
    /// Milliseconds since the loop started
    Tick(u64),
    Link(LinkEvent),
}

#[allow(dead_code)]
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
    handler: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// The tick rate here is the loop's poll granularity, not the
    /// telemetry cadence; the [`Scheduler`](`crate::scheduler::Scheduler`)
    /// decides when a tick actually publishes.
    pub fn new(tick_rate_millis: u64, link_rx: UnboundedReceiver<LinkEvent>) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_millis);
        let (sender, receiver) = mpsc::unbounded_channel();
        let _sender = sender.clone();

        let mut link_stream = UnboundedReceiverStream::new(link_rx);

        let handler = tokio::spawn(async move {
            let start = Instant::now();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                let tick_delay = tick.tick();
                let link_event = link_stream.next().fuse();

                tokio::select! {
                  _ = _sender.closed() => {
                    break;
                  }
                  _ = tick_delay => {
                    _sender.send(Event::Tick(start.elapsed().as_millis() as u64)).unwrap();
                  }
                  Some(evt) = link_event => {
                    log::debug!("link event {evt:?}");
                    _sender.send(Event::Link(evt)).unwrap();
                  }
                };
            }
        });
        Self {
            sender,
            receiver,
            handler,
        }
    }

    pub async fn next(&mut self) -> Result<Event, LedMinderError> {
        self.receiver
            .recv()
            .await
            .ok_or(LedMinderError::EventError)
    }
}
