use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

use crate::transport::TransportError;

/// Failure half of a gateway [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayFailure {
    /// The service answered with an envelope describing the failure.
    /// `http_message` is set when the envelope came with a non-2xx status.
    #[error("chart service rejected the request: {error}")]
    Rejected {
        error: ApiError,
        http_message: Option<String>,
    },
    /// No usable envelope came back.
    #[error("{message}")]
    Transport { message: String },
}

/// Generic texts used when neither the service nor the transport gave one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackMessages {
    pub rejected: &'static str,
    pub unreachable: &'static str,
    /// Whether joined field messages take precedence over the server error.
    /// Off for views whose requests carry no user input.
    pub field_errors: bool,
}

impl GatewayFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn is_field_validation(&self) -> bool {
        matches!(
            self,
            Self::Rejected { error, .. } if error.code == ErrorCode::Validation
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Message shown in the error panel: joined field messages (when the
    /// fallbacks allow them), then the server error string, then the
    /// transport message, then the fallback.
    pub fn display_message(&self, fallbacks: &FallbackMessages) -> String {
        match self {
            Self::Rejected {
                error,
                http_message,
            } => fallbacks
                .field_errors
                .then(|| error.joined_field_messages())
                .flatten()
                .or_else(|| error.message.clone())
                .or_else(|| http_message.clone().filter(|message| !message.is_empty()))
                .unwrap_or_else(|| fallbacks.rejected.to_string()),
            Self::Transport { message } if !message.is_empty() => message.clone(),
            Self::Transport { .. } => fallbacks.unreachable.to_string(),
        }
    }
}

impl From<TransportError> for GatewayFailure {
    fn from(value: TransportError) -> Self {
        Self::transport(value.to_string())
    }
}
