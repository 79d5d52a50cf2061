use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("postal code must be exactly 5 characters, got {length}")]
    InvalidCode { length: usize },

    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup service returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("invalid lookup response: {0}")]
    Parse(#[from] serde_json::Error),
}
