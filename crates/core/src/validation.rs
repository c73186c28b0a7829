//! Field validation rules shared by request payloads.
//!
//! Rules on an absent or blank field are skipped once `required` has reported
//! it, so each field contributes at most one "is required" message.

use crate::error::{DomainResult, ValidationErrors};

/// Maximum length of short string columns (names, titles, emails).
pub const MAX_STRING_LEN: usize = 255;

/// Accumulates validation messages for one payload.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed value when present and non-blank, recording a
    /// "required" message otherwise.
    pub fn required<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.errors
                    .add(field, format!("The {field} field is required."));
                None
            }
        }
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> bool {
        if value.chars().count() > max {
            self.errors.add(
                field,
                format!("The {field} field must not be greater than {max} characters."),
            );
            return false;
        }
        true
    }

    pub fn email(&mut self, field: &str, value: &str) -> bool {
        if !is_valid_email(value) {
            self.errors
                .add(field, format!("The {field} field must be a valid email address."));
            return false;
        }
        true
    }

    /// `value` must equal its `{field}_confirmation` companion.
    pub fn confirmed(&mut self, field: &str, value: &str, confirmation: Option<&str>) -> bool {
        if confirmation != Some(value) {
            self.errors
                .add(field, format!("The {field} field confirmation does not match."));
            return false;
        }
        true
    }

    /// Record a rule failure that was decided elsewhere (e.g. a uniqueness lookup).
    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn finish(self) -> DomainResult<()> {
        self.errors.into_result()
    }
}

/// Pragmatic address check: one `@`, a non-empty local part, and a dotted or
/// bare host without whitespace or empty labels.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
