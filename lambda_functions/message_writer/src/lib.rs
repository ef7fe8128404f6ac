//! # SQS message writer
//!
//! Lambda that stores every message of an SQS batch in a DynamoDB table.
//!
//! Given an SQS event, for each record the handler will:
//! * Generate a random 128-bit id, rendered as 32 lowercase hex characters
//! * Put an item `{"Id": <id>, "message": <body>}` into the configured table
//! * Log the outcome of the write
//!
//! All writes of a batch run concurrently and are awaited before the
//! invocation returns. Failed writes are logged and, unless
//! `MESSAGE_WRITER__REPORT_BATCH_ITEM_FAILURES` is set, acknowledged anyway.
pub mod error;
pub mod handler;
pub mod record;
pub mod settings;
pub mod store;
pub mod telemetry;

pub use error::{SettingsError, StoreError};
pub use handler::{BatchOutcome, FailureReporting, IngestionHandler, WriteOutcome};
pub use record::{MessageRecord, RecordId};
pub use settings::Settings;
pub use store::{DynamoDbStore, RecordStore};
