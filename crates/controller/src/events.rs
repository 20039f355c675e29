//! Backend completions and error modeling for the chart views.

use std::time::Duration;

use client_core::{FallbackMessages, GatewayFailure, Outcome};
use shared::{domain::Chart, protocol::ChartPage};

use crate::commands::RequestId;

pub const SCROLL_TO_RESULT_DELAY: Duration = Duration::from_millis(100);

/// Completion of one backend command. Every dispatched command yields exactly one.
#[derive(Debug)]
pub enum UiEvent {
    ChartsLoaded {
        request: RequestId,
        outcome: Outcome<ChartPage>,
    },
    ChartCalculated {
        request: RequestId,
        outcome: Outcome<Chart>,
    },
}

impl UiEvent {
    pub fn request(&self) -> RequestId {
        match self {
            Self::ChartsLoaded { request, .. } | Self::ChartCalculated { request, .. } => *request,
        }
    }
}

/// Presentation side effects requested after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    ScrollToResult { delay: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Server,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    LoadCharts,
    CalculateChart,
}

impl UiErrorContext {
    pub fn fallbacks(self) -> FallbackMessages {
        match self {
            Self::LoadCharts => FallbackMessages {
                rejected: "Failed to load charts",
                unreachable: "Failed to load charts. Please try again.",
                field_errors: false,
            },
            Self::CalculateChart => FallbackMessages {
                rejected: "Failed to calculate chart",
                unreachable: "Failed to calculate chart. Please try again.",
                field_errors: true,
            },
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::LoadCharts => "Error Loading Charts",
            Self::CalculateChart => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Re-issue the same request.
    Retry,
    /// The input is user-correctable; nothing to re-issue as is.
    EditAndResubmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_failure(context: UiErrorContext, failure: &GatewayFailure) -> Self {
        let fallbacks = context.fallbacks();
        let category = if fallbacks.field_errors && failure.is_field_validation() {
            UiErrorCategory::Validation
        } else if failure.is_transport() {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Server
        };

        Self {
            category,
            context,
            message: failure.display_message(&fallbacks),
        }
    }

    pub fn recovery(&self) -> Recovery {
        match self.context {
            UiErrorContext::LoadCharts => Recovery::Retry,
            UiErrorContext::CalculateChart => Recovery::EditAndResubmit,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
