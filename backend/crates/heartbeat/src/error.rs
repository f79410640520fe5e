//! Heartbeat Error Types
//!
//! This module provides heartbeat-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::envelope::EnvelopeError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::RoomId;
use platform::retry::Retryable;
use thiserror::Error;

/// Heartbeat-specific result type alias
pub type HeartbeatResult<T> = Result<T, HeartbeatError>;

/// Heartbeat-specific error variants
#[derive(Debug, Error)]
pub enum HeartbeatError {
    /// Cookie string has no `LIVE_BUVID` device identity
    #[error("LIVE_BUVID cookie is missing")]
    MissingDeviceIdentity,

    /// Cookie string has no `bili_jct` CSRF token
    #[error("bili_jct cookie is missing")]
    MissingCsrfToken,

    /// Room info lookup failed
    #[error("Room {room_id} lookup failed: {reason}")]
    RoomResolutionFailed { room_id: RoomId, reason: String },

    /// Beacon endpoint answered with a non-zero code
    #[error("Beacon rejected (code {code}): {message}")]
    BeaconRejected { code: i64, message: String },

    /// Response was missing fields the protocol requires
    #[error("Protocol desync: {0}")]
    ProtocolDesync(String),

    /// Network / HTTP failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HeartbeatError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeartbeatError::MissingDeviceIdentity | HeartbeatError::MissingCsrfToken => {
                ErrorKind::Configuration
            }
            HeartbeatError::RoomResolutionFailed { .. }
            | HeartbeatError::BeaconRejected { .. }
            | HeartbeatError::Transport(_)
            | HeartbeatError::Internal(_) => ErrorKind::TransientUpstream,
            HeartbeatError::ProtocolDesync(_) => ErrorKind::ProtocolDesync,
        }
    }

    /// Wrap a failed room lookup
    pub fn room_resolution(room_id: RoomId, cause: impl std::fmt::Display) -> Self {
        HeartbeatError::RoomResolutionFailed {
            room_id,
            reason: cause.to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            HeartbeatError::MissingDeviceIdentity | HeartbeatError::MissingCsrfToken => {
                tracing::error!(error = %self, "Heartbeat configuration error");
            }
            HeartbeatError::ProtocolDesync(msg) => {
                tracing::warn!(message = %msg, "Heartbeat protocol desync");
            }
            HeartbeatError::Transport(e) => {
                tracing::warn!(error = %e, "Heartbeat transport error");
            }
            _ => {
                tracing::debug!(error = %self, "Heartbeat error");
            }
        }
    }
}

/// Configuration errors never get another attempt
impl Retryable for HeartbeatError {
    fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

/// Beacon envelopes: a non-zero code is a rejection
impl From<EnvelopeError> for HeartbeatError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected { code, message } => {
                HeartbeatError::BeaconRejected { code, message }
            }
            EnvelopeError::MissingData(message) => HeartbeatError::ProtocolDesync(format!(
                "response has no data ({})",
                message
            )),
        }
    }
}

impl From<serde_json::Error> for HeartbeatError {
    fn from(err: serde_json::Error) -> Self {
        HeartbeatError::ProtocolDesync(format!("malformed response: {}", err))
    }
}

impl From<HeartbeatError> for AppError {
    fn from(err: HeartbeatError) -> Self {
        let kind = err.kind();
        let app_err = match &err {
            HeartbeatError::BeaconRejected { code, .. } => {
                AppError::new(kind, err.to_string()).with_code(*code)
            }
            _ => AppError::new(kind, err.to_string()),
        };
        app_err.with_source(err)
    }
}
