//! Customer notification dispatch
//!
//! Status transitions enqueue a [`StatusNotification`] on a bounded mpsc
//! channel; a background worker consumes it and hands it to the configured
//! [`NotificationSink`] (a messaging provider in production, a recording fake
//! in tests).
//!
//! Dispatch is fire-and-forget relative to the transition that triggers it:
//! `enqueue` never blocks, a full queue drops the message with a warning, and
//! sink failures are logged and swallowed. The business fact of "ready" or
//! "delivered" is authoritative regardless of whether the customer was
//! informed.

use async_trait::async_trait;
use shared::order::{CustomerInfo, OrderStatus};
use tokio::sync::mpsc;

/// One customer-facing status message
#[derive(Debug, Clone, PartialEq)]
pub struct StatusNotification {
    pub order_id: String,
    pub order_number: i64,
    pub customer: CustomerInfo,
    pub new_status: OrderStatus,
}

/// Outbound messaging seam
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: &StatusNotification) -> anyhow::Result<()>;
}

/// Default sink: logs the message instead of sending it.
///
/// The real messaging transport is an external collaborator; an edge
/// deployment without one configured still gets an audit trail in the log.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, n: &StatusNotification) -> anyhow::Result<()> {
        tracing::info!(
            order_number = n.order_number,
            customer = %n.customer.name,
            status = ?n.new_status,
            "Customer notification"
        );
        Ok(())
    }
}

/// Handle held by the engine; cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<StatusNotification>,
}

impl Notifier {
    /// Spawn the dispatch worker and return the enqueue handle.
    pub fn spawn(sink: impl NotificationSink + 'static, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(run_worker(sink, rx));
        Self { tx }
    }

    /// Queue a notification without waiting. Never fails the caller: a full
    /// or closed channel drops the message with a log line.
    pub fn enqueue(&self, notification: StatusNotification) {
        if let Err(e) = self.tx.try_send(notification) {
            tracing::warn!(error = %e, "Notification queue unavailable, dropping message");
        }
    }
}

/// Consume notifications until the channel closes.
async fn run_worker(
    sink: impl NotificationSink + 'static,
    mut rx: mpsc::Receiver<StatusNotification>,
) {
    tracing::info!("Notification worker started");

    while let Some(notification) = rx.recv().await {
        if let Err(e) = sink.notify(&notification).await {
            // Never surfaced to the staff caller: food delivery does not
            // depend on a message being delivered.
            tracing::warn!(
                order_id = %notification.order_id,
                error = %e,
                "Notification dispatch failed"
            );
        }
    }

    tracing::info!("Notification channel closed, worker stopping");
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    fn notification(order_number: i64) -> StatusNotification {
        StatusNotification {
            order_id: format!("o{}", order_number),
            order_number,
            customer: CustomerInfo {
                name: "Ana".to_string(),
                phone: Some("+55 11 99999-0000".to_string()),
                address: None,
            },
            new_status: OrderStatus::Ready,
        }
    }

    #[tokio::test]
    async fn test_notifications_reach_sink() {
        let sink = RecordingSink::new();
        let notifier = Notifier::spawn(sink.clone(), 16);

        notifier.enqueue(notification(1));
        notifier.enqueue(notification(2));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let received = sink.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].order_number, 1);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let mut sink = RecordingSink::new();
        sink.fail = true;
        let notifier = Notifier::spawn(sink.clone(), 16);

        notifier.enqueue(notification(1));
        notifier.enqueue(notification(2));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        // Worker keeps draining after a failure.
        assert_eq!(sink.received().len(), 2);
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let sink = RecordingSink::new();
        let notifier = Notifier::spawn(sink, 1);

        // No await between enqueues: the worker may not have drained yet, and
        // enqueue must still return immediately.
        for i in 0..50 {
            notifier.enqueue(notification(i));
        }
    }
}
