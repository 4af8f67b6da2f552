//! In-process event channel for live review updates
//!
//! Single broadcast bus; delivery is at-most-once to whatever subscribers
//! are attached at publish time. No buffering for late joiners and no
//! cross-process fan-out.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::db::ReviewRecord;

/// Buffered events per subscriber before the oldest are dropped
const CHANNEL_CAPACITY: usize = 100;

/// Snapshot of the full review list for the place that was just reviewed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvaliationAddedEvent {
    pub place_id: String,
    pub reviews: Vec<ReviewRecord>,
}

/// Broadcast bus for review events
#[derive(Clone)]
pub struct ReviewEvents {
    tx: broadcast::Sender<AvaliationAddedEvent>,
}

impl ReviewEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to review events from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<AvaliationAddedEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all current subscribers.
    ///
    /// Send errors mean no subscriber is attached, which is not a failure.
    pub fn publish(&self, event: AvaliationAddedEvent) {
        let receivers = self.tx.receiver_count();
        if self.tx.send(event).is_ok() {
            tracing::debug!(receivers, "Published review event");
        }
    }
}

impl Default for ReviewEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> AvaliationAddedEvent {
        AvaliationAddedEvent {
            place_id: "place-1".to_string(),
            reviews: vec![ReviewRecord {
                place_id: "place-1".to_string(),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                profile_img: "https://s.gravatar.com/avatar/x".to_string(),
                rating: 4.0,
                comment: "Bom".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let events = ReviewEvents::new();
        let mut rx = events.subscribe();

        events.publish(sample_event());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.place_id, "place-1");
        assert_eq!(event.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_noop() {
        let events = ReviewEvents::new();
        events.publish(sample_event());
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let events = ReviewEvents::new();
        events.publish(sample_event());

        let mut rx = events.subscribe();
        assert!(rx.try_recv().is_err());
    }
}
