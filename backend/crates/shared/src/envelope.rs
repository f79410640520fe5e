//! Response Envelope
//!
//! Every platform endpoint answers with `{ code, message, data }` where a
//! non-zero `code` signals failure and `message` carries the reason.
//! [`ApiEnvelope`] is the single decoding contract for all of them.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Response code, sent either as a number or as a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiCode {
    Number(i64),
    Text(String),
}

impl ApiCode {
    /// Numeric value of the code; non-numeric text maps to `-1`
    pub fn value(&self) -> i64 {
        match self {
            ApiCode::Number(n) => *n,
            ApiCode::Text(s) => s.trim().parse().unwrap_or(-1),
        }
    }

    pub fn is_success(&self) -> bool {
        self.value() == 0
    }
}

impl Default for ApiCode {
    fn default() -> Self {
        ApiCode::Number(0)
    }
}

/// Envelope decoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The server answered with a non-zero code
    #[error("API rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// Success code but no usable `data`
    #[error("API response is missing data: {0}")]
    MissingData(String),
}

/// `{ code, message, data }` wrapper
///
/// Some endpoints send the reason as `msg`, some as `message`, some both.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: ApiCode,
    pub message: Option<String>,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the server reported success
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Server-provided reason, preferring a non-empty `message` over `msg`
    pub fn reason(&self) -> &str {
        [&self.message, &self.msg]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    /// Unwrap `data`, failing on a non-zero code or missing payload
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        let reason = self.reason().to_string();
        if !self.is_success() {
            return Err(EnvelopeError::Rejected {
                code: self.code.value(),
                message: reason,
            });
        }

        self.data.ok_or(EnvelopeError::MissingData(reason))
    }
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Decode an envelope from raw response text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
