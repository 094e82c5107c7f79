//! Error types for the Ripple API client

use thiserror::Error;

/// Main error type for the Ripple API client
#[derive(Error, Debug)]
pub enum RippleError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A field required by the declared transaction type was never set.
    /// Raised locally, before anything is sent to the signer.
    #[error("Incomplete transaction: missing {field}")]
    IncompleteTransaction { field: &'static str },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The remote signer answered with a non-success status.
    #[error("Signing failed: {status} - {message}")]
    SigningFailed { status: String, message: String },

    /// `submit` was called without a successfully signed transaction pending.
    #[error("No signed transaction to submit")]
    NoSignedTransaction,

    #[error("Transaction was not sent: empty response from {0}")]
    TransactionNotSent(String),

    #[error("No WSS node configured for delegated submission")]
    MissingWssNode,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl RippleError {
    /// Whether the caller can fix its input and retry without any change on
    /// the network side.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            RippleError::IncompleteTransaction { .. }
                | RippleError::InvalidAmount(_)
                | RippleError::NoSignedTransaction
                | RippleError::MissingWssNode
                | RippleError::InvalidMethod(_)
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RippleError>;
