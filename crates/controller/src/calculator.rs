//! Birth chart calculator: form editing plus the submit lifecycle.

use client_core::Outcome;
use shared::domain::Chart;
use tracing::{debug, info, warn};

use crate::{
    commands::{BackendCommand, RequestCounter, RequestId},
    events::{UiError, UiErrorContext, ViewEffect, SCROLL_TO_RESULT_DELAY},
    form::{BirthField, FormState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Local validation failed; every field is now touched and nothing was sent.
    Rejected(Vec<(BirthField, &'static str)>),
    /// A submission is already in flight.
    Ignored,
    Issued(BackendCommand),
}

/// The result region of the calculator view.
#[derive(Debug, PartialEq)]
pub enum ResultView<'a> {
    Hidden,
    Calculating,
    Failed(&'a UiError),
    Chart(&'a Chart),
}

#[derive(Debug)]
pub struct FormSubmissionController {
    form: FormState,
    phase: SubmitPhase,
    result: Option<Chart>,
    error: Option<UiError>,
    in_flight: Option<RequestId>,
    requests: RequestCounter,
}

impl Default for FormSubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSubmissionController {
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            phase: SubmitPhase::Editing,
            result: None,
            error: None,
            in_flight: None,
            requests: RequestCounter::default(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&Chart> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Records user input. Ignored while a submission is in flight.
    pub fn edit(&mut self, field: BirthField, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.form.set_value(field, value);
        self.phase = SubmitPhase::Editing;
        true
    }

    /// Records that a field lost focus.
    pub fn blur(&mut self, field: BirthField) {
        self.form.touch(field);
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.form.is_valid()
    }

    pub fn can_reset(&self) -> bool {
        !self.is_submitting()
    }

    pub fn submit(&mut self) -> SubmitDecision {
        if self.is_submitting() {
            debug!("submit ignored while a calculation is in flight");
            return SubmitDecision::Ignored;
        }

        if !self.form.is_valid() {
            self.form.mark_all_touched();
            let errors = self.form.visible_errors();
            debug!(errors = errors.len(), "submit rejected by local validation");
            return SubmitDecision::Rejected(errors);
        }

        let request = self.requests.issue();
        self.phase = SubmitPhase::Submitting;
        self.result = None;
        self.error = None;
        self.in_flight = Some(request);
        info!(%request, "calculating chart");
        SubmitDecision::Issued(BackendCommand::CalculateChart {
            request,
            input: self.form.to_request(),
        })
    }

    /// Applies the completion of a calculation. A scroll effect is returned
    /// after a successful transition.
    pub fn on_submit_complete(
        &mut self,
        request: RequestId,
        outcome: Outcome<Chart>,
    ) -> Option<ViewEffect> {
        if !self.is_submitting() {
            warn!(%request, phase = ?self.phase, "calculation completion without a submission in flight");
            return None;
        }
        if self.in_flight != Some(request) {
            debug!(%request, in_flight = ?self.in_flight, "applying completion of an earlier submission");
        }
        self.in_flight = None;

        match outcome {
            Ok(chart) => {
                info!(%request, sun = %chart.sun_sign, "chart calculated");
                self.result = Some(chart);
                self.form.reset();
                self.phase = SubmitPhase::Succeeded;
                Some(ViewEffect::ScrollToResult {
                    delay: SCROLL_TO_RESULT_DELAY,
                })
            }
            Err(failure) => {
                let error = UiError::from_failure(UiErrorContext::CalculateChart, &failure);
                warn!(%request, "chart calculation failed: {}", error.message());
                self.error = Some(error);
                self.phase = SubmitPhase::Failed;
                None
            }
        }
    }

    /// Clears the fields together with any error or result.
    pub fn reset_form(&mut self) -> bool {
        if !self.can_reset() {
            debug!("reset ignored while a calculation is in flight");
            return false;
        }
        self.form.reset();
        self.error = None;
        self.result = None;
        self.phase = SubmitPhase::Editing;
        true
    }

    /// Dismisses the shown result, leaving the fields alone.
    pub fn clear_result(&mut self) {
        self.result = None;
        if self.phase == SubmitPhase::Succeeded {
            self.phase = SubmitPhase::Editing;
        }
    }

    pub fn result_view(&self) -> ResultView<'_> {
        if self.is_submitting() {
            return ResultView::Calculating;
        }
        if let Some(error) = &self.error {
            return ResultView::Failed(error);
        }
        match &self.result {
            Some(chart) => ResultView::Chart(chart),
            None => ResultView::Hidden,
        }
    }
}

#[cfg(test)]
#[path = "tests/calculator_tests.rs"]
mod tests;
