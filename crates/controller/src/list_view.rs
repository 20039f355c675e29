//! Chart list lifecycle: idle, loading, success, error.

use client_core::Outcome;
use shared::{domain::Chart, protocol::ChartPage};
use tracing::{debug, info, warn};

use crate::{
    commands::{BackendCommand, RequestCounter, RequestId},
    events::{UiError, UiErrorContext},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// The single branch the list view renders.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Idle,
    Loading,
    Failed(&'a UiError),
    Empty,
    Charts(&'a [Chart]),
}

#[derive(Debug)]
pub struct ListViewController {
    phase: ListPhase,
    page: Option<ChartPage>,
    error: Option<UiError>,
    in_flight: Option<RequestId>,
    requests: RequestCounter,
}

impl Default for ListViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListViewController {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Idle,
            page: None,
            error: None,
            in_flight: None,
            requests: RequestCounter::default(),
        }
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    /// Starts the first fetch. Only valid from idle.
    pub fn activate(&mut self) -> Option<BackendCommand> {
        if self.phase != ListPhase::Idle {
            debug!(phase = ?self.phase, "list activation ignored");
            return None;
        }
        Some(self.begin_fetch())
    }

    pub fn retry(&mut self) -> Option<BackendCommand> {
        if self.phase != ListPhase::Error {
            debug!(phase = ?self.phase, "list retry ignored");
            return None;
        }
        Some(self.begin_fetch())
    }

    pub fn refresh(&mut self) -> Option<BackendCommand> {
        if self.phase != ListPhase::Success {
            debug!(phase = ?self.phase, "list refresh ignored");
            return None;
        }
        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> BackendCommand {
        let request = self.requests.issue();
        self.phase = ListPhase::Loading;
        self.error = None;
        self.in_flight = Some(request);
        info!(%request, "loading charts");
        BackendCommand::FetchCharts { request }
    }

    pub fn on_fetch_complete(&mut self, request: RequestId, outcome: Outcome<ChartPage>) {
        if self.phase != ListPhase::Loading {
            warn!(%request, phase = ?self.phase, "chart list completion without a fetch in flight");
            return;
        }
        if self.in_flight != Some(request) {
            debug!(%request, in_flight = ?self.in_flight, "applying completion of an earlier fetch");
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                info!(%request, count = page.charts.len(), "charts loaded");
                self.page = Some(page);
                self.phase = ListPhase::Success;
            }
            Err(failure) => {
                let error = UiError::from_failure(UiErrorContext::LoadCharts, &failure);
                warn!(%request, "loading charts failed: {}", error.message());
                self.error = Some(error);
                self.phase = ListPhase::Error;
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn can_retry(&self) -> bool {
        self.phase == ListPhase::Error
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    /// Last successfully loaded page; kept untouched by failed fetches.
    pub fn page(&self) -> Option<&ChartPage> {
        self.page.as_ref()
    }

    pub fn view(&self) -> ListView<'_> {
        match self.phase {
            ListPhase::Idle => ListView::Idle,
            ListPhase::Loading => ListView::Loading,
            ListPhase::Error => match &self.error {
                Some(error) => ListView::Failed(error),
                None => ListView::Idle,
            },
            ListPhase::Success => match &self.page {
                Some(page) if !page.is_empty() => ListView::Charts(&page.charts),
                _ => ListView::Empty,
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
