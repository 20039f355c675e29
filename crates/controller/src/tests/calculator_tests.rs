use super::*;
use crate::{
    events::{Recovery, UiErrorCategory},
    fixtures::{chart, server_error, validation_error},
    form::FieldStatus,
};
use client_core::GatewayFailure;

fn filled() -> FormSubmissionController {
    let mut calc = FormSubmissionController::new();
    calc.edit(BirthField::Date, "1990-01-05");
    calc.edit(BirthField::Time, "14:30");
    calc.edit(BirthField::Location, "London, UK");
    calc
}

fn submitted(calc: &mut FormSubmissionController) -> RequestId {
    match calc.submit() {
        SubmitDecision::Issued(cmd) => cmd.request(),
        other => panic!("expected an issued command, got {other:?}"),
    }
}

#[test]
fn invalid_submit_touches_every_field_and_sends_nothing() {
    let mut calc = FormSubmissionController::new();
    calc.edit(BirthField::Location, "L");

    let SubmitDecision::Rejected(errors) = calc.submit() else {
        panic!("expected local rejection");
    };
    assert_eq!(
        errors,
        vec![
            (BirthField::Date, "Birth date is required"),
            (BirthField::Time, "Birth time is required"),
            (BirthField::Location, "Location must be at least 2 characters"),
        ]
    );
    for field in BirthField::ALL {
        assert!(calc.form().field(field).is_interacted());
    }
    assert_eq!(calc.phase(), SubmitPhase::Editing);
    assert_eq!(calc.result_view(), ResultView::Hidden);
}

#[test]
fn valid_submit_issues_camel_case_payload_from_form() {
    let mut calc = filled();
    assert!(calc.can_submit());

    let SubmitDecision::Issued(BackendCommand::CalculateChart { request, input }) = calc.submit()
    else {
        panic!("expected calculate command");
    };
    assert_eq!(request, RequestId(1));
    assert_eq!(input.birth_date, "1990-01-05");
    assert_eq!(input.birth_time, "14:30");
    assert_eq!(input.birth_location, "London, UK");
    assert!(calc.is_submitting());
    assert_eq!(calc.result_view(), ResultView::Calculating);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut calc = filled();
    submitted(&mut calc);

    assert_eq!(calc.submit(), SubmitDecision::Ignored);
    assert!(!calc.can_submit());
}

#[test]
fn edits_and_reset_are_blocked_while_submitting() {
    let mut calc = filled();
    submitted(&mut calc);

    assert!(!calc.can_reset());
    assert!(!calc.reset_form());
    assert!(!calc.edit(BirthField::Location, "Paris"));
    assert_eq!(calc.form().field(BirthField::Location).value(), "London, UK");
}

#[test]
fn success_shows_chart_clears_form_and_requests_scroll() {
    let mut calc = filled();
    let request = submitted(&mut calc);

    let effect = calc.on_submit_complete(request, Ok(chart("Ada")));

    assert_eq!(
        effect,
        Some(ViewEffect::ScrollToResult {
            delay: SCROLL_TO_RESULT_DELAY
        })
    );
    assert_eq!(calc.phase(), SubmitPhase::Succeeded);
    assert!(calc.form().is_empty());
    assert_eq!(
        calc.form().field(BirthField::Date).status(),
        FieldStatus::Untouched
    );
    assert!(calc.error().is_none());
    assert_eq!(calc.result_view(), ResultView::Chart(&chart("Ada")));
}

#[test]
fn validation_failure_joins_field_messages() {
    let mut calc = filled();
    let request = submitted(&mut calc);

    let effect = calc.on_submit_complete(
        request,
        Err(validation_error(&[
            ("Invalid date", "birthDate"),
            ("Invalid time", "birthTime"),
        ])),
    );

    assert!(effect.is_none());
    let ResultView::Failed(error) = calc.result_view() else {
        panic!("expected error panel");
    };
    assert_eq!(error.message(), "Invalid date, Invalid time");
    assert_eq!(error.category(), UiErrorCategory::Validation);
    assert_eq!(error.recovery(), Recovery::EditAndResubmit);
    assert!(calc.result().is_none());
    assert_eq!(calc.form().field(BirthField::Time).value(), "14:30");
}

#[test]
fn server_failure_message_is_shown_verbatim() {
    let mut calc = filled();
    let request = submitted(&mut calc);
    calc.on_submit_complete(request, Err(server_error("Ephemeris unavailable")));

    assert_eq!(calc.phase(), SubmitPhase::Failed);
    assert_eq!(
        calc.error().map(|error| error.message()),
        Some("Ephemeris unavailable")
    );
}

#[test]
fn transport_failure_without_message_falls_back() {
    let mut calc = filled();
    let request = submitted(&mut calc);
    calc.on_submit_complete(request, Err(GatewayFailure::transport("")));

    assert_eq!(
        calc.error().map(|error| error.message()),
        Some("Failed to calculate chart. Please try again.")
    );
}

#[test]
fn edit_after_failure_keeps_error_until_next_submit() {
    let mut calc = filled();
    let request = submitted(&mut calc);
    calc.on_submit_complete(request, Err(server_error("boom")));

    assert!(calc.edit(BirthField::Location, "Paris"));
    assert_eq!(calc.phase(), SubmitPhase::Editing);
    assert!(calc.error().is_some());

    submitted(&mut calc);
    assert!(calc.error().is_none());
}

#[test]
fn resubmit_clears_previous_result() {
    let mut calc = filled();
    let request = submitted(&mut calc);
    calc.on_submit_complete(request, Ok(chart("Ada")));

    calc.edit(BirthField::Date, "2000-02-29");
    calc.edit(BirthField::Time, "06:00");
    calc.edit(BirthField::Location, "Oslo");
    let second = submitted(&mut calc);

    assert_eq!(second, RequestId(2));
    assert!(calc.result().is_none());
}

#[test]
fn reset_clears_fields_error_and_result() {
    let mut calc = filled();
    let request = submitted(&mut calc);
    calc.on_submit_complete(request, Err(server_error("boom")));

    assert!(calc.reset_form());
    assert!(calc.form().is_empty());
    assert!(calc.error().is_none());
    assert_eq!(calc.result_view(), ResultView::Hidden);
    assert_eq!(calc.phase(), SubmitPhase::Editing);
}

#[test]
fn clear_result_only_dismisses_the_chart() {
    let mut calc = filled();
    let request = submitted(&mut calc);
    calc.on_submit_complete(request, Ok(chart("Ada")));
    calc.edit(BirthField::Location, "Rome");

    calc.clear_result();

    assert!(calc.result().is_none());
    assert_eq!(calc.form().field(BirthField::Location).value(), "Rome");
}

#[test]
fn completion_without_submission_in_flight_is_ignored() {
    let mut calc = filled();
    let effect = calc.on_submit_complete(RequestId(7), Ok(chart("Ghost")));

    assert!(effect.is_none());
    assert!(calc.result().is_none());
    assert_eq!(calc.phase(), SubmitPhase::Editing);
}

#[test]
fn blur_reveals_required_error_on_pristine_field() {
    let mut calc = FormSubmissionController::new();
    assert!(calc.form().visible_error(BirthField::Time).is_none());

    calc.blur(BirthField::Time);
    assert_eq!(
        calc.form().visible_error(BirthField::Time),
        Some("Birth time is required")
    );
}
