//! Caller-facing `{success, data?, error?}` envelope.
//!
//! Hosts that expose the engine over some transport can convert any
//! `Result<T>` into an [`Outcome<T>`] and serialize it as-is.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

/// Success/failure envelope carrying either data or an error message.
///
/// `error` holds the exact human-readable message; branch on `error_kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error category on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
                error_kind: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.to_string()),
                error_kind: Some(err.kind()),
            },
        }
    }
}
