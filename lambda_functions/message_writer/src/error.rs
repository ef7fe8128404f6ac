use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Table name must not be empty")]
    EmptyTableName,
}

/// A write that the store did not accept.
///
/// The SDK error is rendered eagerly, including its source chain, so the
/// outcome can be logged and inspected after the request has been dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("PutItem on table {table} failed: {message}")]
    PutItem { table: String, message: String },
}
