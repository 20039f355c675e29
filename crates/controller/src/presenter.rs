//! Pure display derivations for a chart.

use chrono::{DateTime, NaiveDate};
use shared::domain::{Chart, PlanetName, PlanetPositions};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRow {
    pub name: &'static str,
    pub sign: String,
    pub degree: f64,
}

impl PlanetRow {
    pub fn position_label(&self) -> String {
        format!("{} {}°", self.sign, self.degree)
    }
}

/// Planet entries in display order (Sun, Moon, Mercury, Venus, Mars),
/// independent of the order the positions were decoded in.
pub fn planet_rows(planets: &PlanetPositions) -> [PlanetRow; 5] {
    PlanetName::DISPLAY_ORDER.map(|planet| {
        let position = planets.get(planet);
        PlanetRow {
            name: planet.label(),
            sign: position.sign.clone(),
            degree: position.degree,
        }
    })
}

pub fn key_signs(chart: &Chart) -> [(&'static str, &str); 3] {
    [
        ("Sun", chart.sun_sign.as_str()),
        ("Moon", chart.moon_sign.as_str()),
        ("Rising", chart.rising_sign.as_str()),
    ]
}

/// Long US date ("January 5, 1990") for a plain ISO date or an RFC 3339 timestamp.
pub fn format_birth_date(raw: &str) -> String {
    if raw.is_empty() {
        return "N/A".to_string();
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()));

    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
