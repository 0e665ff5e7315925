// Record source trait for dashboard data access
use crate::domain::record::Record;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Server error: {status}")]
    Server { status: u16 },

    #[error("expected an array of records")]
    Shape,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the full record collection. Nothing is cached between calls.
    async fn fetch_records(&self) -> Result<Vec<Record>, FetchError>;
}

/// Interpret a decoded payload as a sequence of records.
pub fn records_from_payload(payload: Value) -> Result<Vec<Record>, FetchError> {
    if !payload.is_array() {
        return Err(FetchError::Shape);
    }
    serde_json::from_value(payload).map_err(|_| FetchError::Shape)
}
