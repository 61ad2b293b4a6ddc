//! Asynchronous audit log writer.
//!
//! Consumes [`RealmEvent`]s from the bounded channel and persists them via
//! [`AuditLogRepository`]. Transient insert failures are retried with
//! exponential backoff; an event that still fails after the last attempt is
//! dropped with a warning so the worker never wedges the queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;

use crate::domain::realm_event::RealmEvent;
use crate::domain::repositories::AuditLogRepository;

/// Insert attempts per event, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Runs until the sending side of the channel is dropped.
pub async fn run_event_worker(
    mut rx: mpsc::Receiver<RealmEvent>,
    repository: Arc<dyn AuditLogRepository>,
) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(2))
            .take(MAX_ATTEMPTS - 1);

        match Retry::spawn(strategy, || repository.record(&event)).await {
            Ok(()) => {
                metrics::counter!("realm_events_recorded_total").increment(1);
            }
            Err(e) => {
                metrics::counter!("realm_events_dropped_total").increment(1);
                tracing::warn!(
                    realm_id = event.realm_id,
                    event_type = event.event_type.as_str(),
                    error = %e,
                    "dropping audit event after {MAX_ATTEMPTS} failed attempts"
                );
            }
        }
    }

    tracing::info!("event worker stopped: channel closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Playground;
    use crate::domain::repositories::MockAuditLogRepository;
    use crate::error::AppError;
    use chrono::Utc;
    use mockall::Sequence;

    fn sample_event() -> RealmEvent {
        let playground = Playground::new(
            1,
            1,
            "Python playground".to_string(),
            "Python".to_string(),
            "https://python.example.com".to_string(),
            None,
            Utc::now(),
        );
        RealmEvent::playground_added(1, &playground)
    }

    #[tokio::test]
    async fn test_event_is_recorded() {
        let mut mock_repo = MockAuditLogRepository::new();
        mock_repo.expect_record().times(1).returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_event_worker(rx, Arc::new(mock_repo)));

        tx.send(sample_event()).await.unwrap();
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let mut mock_repo = MockAuditLogRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_record()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("connection reset")));
        mock_repo
            .expect_record()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_event_worker(rx, Arc::new(mock_repo)));

        tx.send(sample_event()).await.unwrap();
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_event_dropped_after_exhausted_retries() {
        let mut mock_repo = MockAuditLogRepository::new();

        mock_repo
            .expect_record()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(AppError::internal("database gone")));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_event_worker(rx, Arc::new(mock_repo)));

        tx.send(sample_event()).await.unwrap();
        drop(tx);

        // Worker survives the poison event and exits cleanly on close.
        worker.await.unwrap();
    }
}
