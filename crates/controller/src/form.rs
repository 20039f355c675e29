//! Birth-data form: field values, interaction status and local validation.

use shared::protocol::CalculateChartRequest;

pub const MIN_LOCATION_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BirthField {
    Date,
    Time,
    Location,
}

impl BirthField {
    pub const ALL: [BirthField; 3] = [BirthField::Date, BirthField::Time, BirthField::Location];

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Birth Date",
            Self::Time => "Birth Time",
            Self::Location => "Birth Location",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Untouched,
    /// Focused and left without an edit.
    Touched,
    /// Edited at least once since the last reset.
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    MinLength(usize),
}

impl FieldRule {
    fn message(self, field: BirthField) -> &'static str {
        match (self, field) {
            (Self::Required, BirthField::Date) => "Birth date is required",
            (Self::Required, BirthField::Time) => "Birth time is required",
            (Self::Required, BirthField::Location) => "Birth location is required",
            (Self::MinLength(_), _) => "Location must be at least 2 characters",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    status: FieldStatus,
}

impl FieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn status(&self) -> FieldStatus {
        self.status
    }

    pub fn is_interacted(&self) -> bool {
        self.status != FieldStatus::Untouched
    }
}

/// Editable draft of the three birth fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    date: FieldState,
    time: FieldState,
    location: FieldState,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: BirthField) -> &FieldState {
        match field {
            BirthField::Date => &self.date,
            BirthField::Time => &self.time,
            BirthField::Location => &self.location,
        }
    }

    fn field_mut(&mut self, field: BirthField) -> &mut FieldState {
        match field {
            BirthField::Date => &mut self.date,
            BirthField::Time => &mut self.time,
            BirthField::Location => &mut self.location,
        }
    }

    pub fn set_value(&mut self, field: BirthField, value: impl Into<String>) {
        let state = self.field_mut(field);
        state.value = value.into();
        state.status = FieldStatus::Dirty;
    }

    pub fn touch(&mut self, field: BirthField) {
        let state = self.field_mut(field);
        if state.status == FieldStatus::Untouched {
            state.status = FieldStatus::Touched;
        }
    }

    pub fn mark_all_touched(&mut self) {
        for field in BirthField::ALL {
            self.touch(field);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// First failing rule of a field, regardless of interaction status.
    pub fn violation(&self, field: BirthField) -> Option<FieldRule> {
        let value = self.field(field).value();
        if value.is_empty() {
            return Some(FieldRule::Required);
        }
        // Raw length in UTF-16 code units, no trimming.
        if field == BirthField::Location && value.encode_utf16().count() < MIN_LOCATION_LEN {
            return Some(FieldRule::MinLength(MIN_LOCATION_LEN));
        }
        None
    }

    pub fn is_valid(&self) -> bool {
        BirthField::ALL
            .iter()
            .all(|field| self.violation(*field).is_none())
    }

    /// Error text to show next to a field; pristine fields never show one.
    pub fn visible_error(&self, field: BirthField) -> Option<&'static str> {
        if !self.field(field).is_interacted() {
            return None;
        }
        self.violation(field).map(|rule| rule.message(field))
    }

    pub fn visible_errors(&self) -> Vec<(BirthField, &'static str)> {
        BirthField::ALL
            .into_iter()
            .filter_map(|field| self.visible_error(field).map(|message| (field, message)))
            .collect()
    }

    pub fn to_request(&self) -> CalculateChartRequest {
        CalculateChartRequest {
            birth_date: self.date.value.clone(),
            birth_time: self.time.value.clone(),
            birth_location: self.location.value.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        BirthField::ALL
            .iter()
            .all(|field| self.field(*field).value().is_empty())
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
