//! In-memory stand-in for the event stream between the generators and the pipeline
//!
//! A bounded channel: publishing waits while the stream is full, and the consumer
//! receives messages in batches of at most `max_batch`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::trace;

use crate::Error;
use crate::output::OutboundMessage;

/// Creates a stream holding up to `capacity` undelivered messages.
pub fn memory_stream(
    topic: impl Into<String>,
    capacity: usize,
    max_batch: usize,
) -> (StreamProducer, StreamConsumer) {
    let topic: Arc<str> = Arc::from(topic.into());
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        StreamProducer {
            topic: Arc::clone(&topic),
            sender,
        },
        StreamConsumer {
            topic,
            receiver,
            max_batch: max_batch.max(1),
        },
    )
}

#[derive(Debug, Clone)]
pub struct StreamProducer {
    topic: Arc<str>,
    sender: mpsc::Sender<OutboundMessage>,
}

impl StreamProducer {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub async fn publish(&self, message: OutboundMessage) -> Result<(), Error> {
        trace!(topic = %self.topic, "publishing message");
        self.sender
            .send(message)
            .await
            .map_err(|_| Error::Transport(format!("topic {} has no consumer", self.topic)))
    }
}

#[derive(Debug)]
pub struct StreamConsumer {
    topic: Arc<str>,
    receiver: mpsc::Receiver<OutboundMessage>,
    max_batch: usize,
}

impl StreamConsumer {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Waits for the next message, then takes whatever else is already queued, up to
    /// `max_batch` messages. Returns `None` once every producer is gone and the stream
    /// is drained.
    pub async fn next_batch(&mut self) -> Option<Vec<OutboundMessage>> {
        let first = self.receiver.recv().await?;
        let mut batch = Vec::with_capacity(self.max_batch);
        batch.push(first);
        while batch.len() < self.max_batch {
            match self.receiver.try_recv() {
                Ok(message) => batch.push(message),
                Err(_) => break,
            }
        }
        trace!(topic = %self.topic, size = batch.len(), "received batch");
        Some(batch)
    }
}
