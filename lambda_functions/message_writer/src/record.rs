use std::fmt;
use uuid::Uuid;

/// Identifier of a stored message: 128 random bits, rendered as 32 lowercase hex characters.
///
/// The bytes are used as-is, without the version and variant bits a v4 uuid would overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::from_bytes(rand::random()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A message body paired with the identifier it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: RecordId,
    pub payload: String,
}

impl MessageRecord {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            payload: payload.into(),
        }
    }
}
