//! Interpretation of rippled `sign` responses

use serde_json::Value;

use crate::error::{Result, RippleError};

const SUCCESS_STATUS: &str = "success";

/// Outcome of a remote signing call.
///
/// The signed blob only exists on [`SigningResult::Signed`], so it cannot be
/// read from a rejected signature.
#[derive(Debug, Clone, PartialEq)]
pub enum SigningResult {
    Signed {
        /// Hex-encoded signed transaction, ready for `submit`
        tx_blob: String,
        hash: Option<String>,
    },
    Rejected {
        status: String,
        error: Option<String>,
        message: String,
    },
}

impl SigningResult {
    /// Parse `{"result": {"status": ..., "tx_blob": ...}}`.
    ///
    /// A response with no `result` object, or a success without a usable
    /// `tx_blob`, is malformed rather than rejected.
    pub fn from_response(response: &Value) -> Result<Self> {
        let result = response
            .get("result")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                RippleError::MalformedResponse("sign response has no result object".to_string())
            })?;

        let status = result
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        if status != SUCCESS_STATUS {
            let error = result
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string);
            let message = result
                .get("error_message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| error.clone())
                .unwrap_or_else(|| "signer returned no message".to_string());

            return Ok(SigningResult::Rejected {
                status: status.to_string(),
                error,
                message,
            });
        }

        let tx_blob = result
            .get("tx_blob")
            .and_then(Value::as_str)
            .filter(|blob| !blob.is_empty())
            .ok_or_else(|| {
                RippleError::MalformedResponse("successful sign without tx_blob".to_string())
            })?;
        hex::decode(tx_blob)
            .map_err(|e| RippleError::MalformedResponse(format!("tx_blob is not hex: {e}")))?;

        let hash = result
            .get("tx_json")
            .and_then(|tx| tx.get("hash"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(SigningResult::Signed {
            tx_blob: tx_blob.to_string(),
            hash,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SigningResult::Signed { .. })
    }

    /// The signed blob, or `SigningFailed` carrying the remote status.
    pub fn into_blob(self) -> Result<String> {
        match self {
            SigningResult::Signed { tx_blob, .. } => Ok(tx_blob),
            SigningResult::Rejected {
                status, message, ..
            } => Err(RippleError::SigningFailed { status, message }),
        }
    }
}
