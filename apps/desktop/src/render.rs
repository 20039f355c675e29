//! Plain-text rendering of the controller view branches.

use std::fmt::Write;

use controller::{
    presenter::{format_birth_date, key_signs, planet_rows},
    BirthField, ListView, Recovery, ResultView, UiError,
};
use shared::domain::Chart;

pub fn render_list(view: ListView<'_>) -> String {
    match view {
        ListView::Idle => String::new(),
        ListView::Loading => "Loading charts...".to_string(),
        ListView::Failed(error) => render_error(error),
        ListView::Empty => "No charts available".to_string(),
        ListView::Charts(charts) => {
            let mut out = String::new();
            for chart in charts {
                let _ = writeln!(
                    out,
                    "{}  (born {}, {})  Sun {} / Moon {} / Rising {}",
                    chart.display_name(),
                    format_birth_date(&chart.birth_date),
                    chart.birth_location,
                    chart.sun_sign,
                    chart.moon_sign,
                    chart.rising_sign,
                );
            }
            out
        }
    }
}

pub fn render_result(view: ResultView<'_>) -> String {
    match view {
        ResultView::Hidden => String::new(),
        ResultView::Calculating => "Calculating...".to_string(),
        ResultView::Failed(error) => render_error(error),
        ResultView::Chart(chart) => render_chart(chart),
    }
}

pub fn render_form_errors(errors: &[(BirthField, &str)]) -> String {
    let mut out = String::new();
    for (field, message) in errors {
        let _ = writeln!(out, "{}: {message}", field.label());
    }
    out
}

fn render_error(error: &UiError) -> String {
    let action = match error.recovery() {
        Recovery::Retry => "Retry",
        Recovery::EditAndResubmit => "Edit the form and resubmit",
    };
    format!("{}\n{}\n[{action}]", error.context().title(), error.message())
}

fn render_chart(chart: &Chart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.display_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "Birth Information");
    let _ = writeln!(out, "  Date: {}", format_birth_date(&chart.birth_date));
    let _ = writeln!(out, "  Time: {}", chart.birth_time);
    let _ = writeln!(out, "  Location: {}", chart.birth_location);
    let _ = writeln!(out);
    let _ = writeln!(out, "Key Signs");
    for (label, sign) in key_signs(chart) {
        let _ = writeln!(out, "  {label}: {sign}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Planets");
    for row in planet_rows(&chart.planets) {
        let _ = writeln!(out, "  {}: {}", row.name, row.position_label());
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
