//! Controller layer: list and calculator state machines, presentation
//! derivations, and the runtime that carries their requests to the gateway.

pub mod calculator;
pub mod commands;
pub mod events;
pub mod form;
pub mod list_view;
pub mod orchestration;
pub mod presenter;
pub mod runtime;

pub use calculator::{FormSubmissionController, ResultView, SubmitDecision, SubmitPhase};
pub use commands::{BackendCommand, RequestId};
pub use events::{Recovery, UiError, UiErrorCategory, UiErrorContext, UiEvent, ViewEffect};
pub use form::{BirthField, FieldStatus, FormState};
pub use list_view::{ListPhase, ListView, ListViewController};
pub use runtime::{Applied, ChartApp};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
