use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The service rejected the input field by field.
    Validation,
    /// The service answered `success: false` with a general message, or none.
    Rejected,
    /// The service answered `success: true` without a payload.
    MissingData,
}

/// Failure carried inside a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {}", self.summary())]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: Option<String>,
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn from_envelope(error: Option<String>, errors: Option<Vec<FieldError>>) -> Self {
        let field_errors = errors.unwrap_or_default();
        let code = if field_errors.is_empty() {
            ErrorCode::Rejected
        } else {
            ErrorCode::Validation
        };
        Self {
            code,
            message: error.filter(|message| !message.is_empty()),
            field_errors,
        }
    }

    pub fn missing_data() -> Self {
        Self {
            code: ErrorCode::MissingData,
            message: None,
            field_errors: Vec::new(),
        }
    }

    /// Field messages joined for display, `None` when there are none.
    pub fn joined_field_messages(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .field_errors
            .iter()
            .map(FieldError::text)
            .filter(|text| !text.is_empty())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join(", "))
        }
    }

    fn summary(&self) -> String {
        self.joined_field_messages()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "no message".to_string())
    }
}
