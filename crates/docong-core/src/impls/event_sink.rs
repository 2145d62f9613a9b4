//! EventSink の実装

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::DomainEvent;
use crate::ports::EventSink;

/// Forwards events to the host's state loop over an unbounded channel.
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
}

impl ChannelEventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DomainEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: DomainEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            warn!(event = name, "event dropped: receiver closed");
            return;
        }
        debug!(event = name, "event emitted");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, event: DomainEvent) {
        debug!(event = event.name(), "event ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelEventSink::channel();
        sink.emit(DomainEvent::TimerSelectionChanged(None));
        sink.emit(DomainEvent::TimerSelectionChanged(None));
        drop(sink);

        let mut received = Vec::new();
        while let Some(event) = rx.recv().await {
            received.push(event);
        }
        assert_eq!(received.len(), 2);
    }

    #[test]
    fn closed_receiver_does_not_panic() {
        let (sink, rx) = ChannelEventSink::channel();
        drop(rx);
        sink.emit(DomainEvent::TimerSelectionChanged(None));
    }
}
