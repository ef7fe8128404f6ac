use crate::{
    error::StoreError,
    record::{MessageRecord, RecordId},
    store::RecordStore,
};
use aws_lambda_events::sqs::{BatchItemFailure, SqsBatchResponse, SqsEvent, SqsMessage};
use futures::future::join_all;

/// What the handler tells SQS after a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureReporting {
    /// Acknowledge every message, whatever happened to its write.
    #[default]
    Swallow,
    /// List the messages whose write failed so SQS redelivers only those.
    /// Needs `ReportBatchItemFailures` on the event source mapping.
    ReportBatchItemFailures,
}

/// Result of writing a single message.
#[derive(Debug)]
pub struct WriteOutcome {
    pub message_id: Option<String>,
    pub record_id: RecordId,
    pub result: Result<(), StoreError>,
}

/// Outcomes of a batch, in the order the messages were received.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<WriteOutcome>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed messages that carry a message id SQS can redeliver by.
    pub fn batch_item_failures(&self) -> Vec<BatchItemFailure> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .filter_map(|o| o.message_id.clone())
            .map(|item_identifier| BatchItemFailure { item_identifier })
            .collect()
    }
}

/// Stores every message of an SQS batch under a freshly generated id.
#[derive(Debug)]
pub struct IngestionHandler<S> {
    store: S,
    failure_reporting: FailureReporting,
}

impl<S: RecordStore> IngestionHandler<S> {
    pub fn new(store: S, failure_reporting: FailureReporting) -> Self {
        Self {
            store,
            failure_reporting,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn failure_reporting(&self) -> FailureReporting {
        self.failure_reporting
    }

    /// # Processes an SQS event
    ///
    /// Writes every record and builds the response for the event source
    /// mapping. In [`FailureReporting::Swallow`] mode the response is always
    /// empty, so SQS deletes the whole batch even if some writes failed.
    pub async fn handle_event(&self, event: SqsEvent) -> SqsBatchResponse {
        let outcome = self.handle_batch(&event.records).await;

        let batch_item_failures = match self.failure_reporting {
            FailureReporting::Swallow => {
                if outcome.failed() > 0 {
                    tracing::warn!(
                        failed = outcome.failed(),
                        "Acknowledging batch with failed writes, they will not be redelivered"
                    );
                }
                Vec::new()
            }
            FailureReporting::ReportBatchItemFailures => {
                let failures = outcome.batch_item_failures();
                if failures.len() < outcome.failed() {
                    tracing::warn!(
                        unreported = outcome.failed() - failures.len(),
                        "Failed messages without a message id cannot be redelivered"
                    );
                }
                failures
            }
        };

        SqsBatchResponse {
            batch_item_failures,
        }
    }

    /// # Writes a batch of messages
    ///
    /// One write per message, all issued at once and awaited together. A
    /// failed write is logged and recorded in the outcome; it never stops the
    /// other writes.
    pub async fn handle_batch(&self, messages: &[SqsMessage]) -> BatchOutcome {
        tracing::info!(records = messages.len(), "Writing batch");

        let outcomes = join_all(messages.iter().map(|message| self.write_message(message))).await;
        let outcome = BatchOutcome { outcomes };

        tracing::info!(
            succeeded = outcome.succeeded(),
            failed = outcome.failed(),
            "Batch written"
        );
        outcome
    }

    async fn write_message(&self, message: &SqsMessage) -> WriteOutcome {
        let message_id = message.message_id.clone();
        // A message without a body is stored with an empty payload.
        let record = MessageRecord::new(message.body.clone().unwrap_or_default());
        tracing::debug!(
            message_id = ?message_id,
            record_id = %record.id,
            body = %record.payload,
            "Received message"
        );

        let result = self.store.put_record(&record).await;
        match &result {
            Ok(()) => tracing::info!(
                message_id = ?message_id,
                record_id = %record.id,
                "Stored message"
            ),
            Err(err) => tracing::error!(
                message_id = ?message_id,
                record_id = %record.id,
                error = %err,
                "Failed to store message"
            ),
        }

        WriteOutcome {
            message_id,
            record_id: record.id,
            result,
        }
    }
}
