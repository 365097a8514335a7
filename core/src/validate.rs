//! Client-side validation of tutorial drafts.
//!
//! Runs before a form is submitted. A draft that fails here never reaches
//! `TutorialClient`.

use std::fmt;

use crate::types::TutorialDraft;

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 70;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// A draft field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Description => write!(f, "description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field-level failure found in one draft, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tutorial: {}", summary(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The message to show next to `field`, if it failed.
    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check `draft` against the title and description limits.
pub fn validate(draft: &TutorialDraft) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if let Some(message) = check_text(
        &draft.title,
        TITLE_MAX_LEN,
        "Title is required",
        "Title must be less than 70 characters",
    ) {
        errors.push(FieldError {
            field: Field::Title,
            message,
        });
    }

    if let Some(message) = check_text(
        &draft.description,
        DESCRIPTION_MAX_LEN,
        "Description is required",
        "Description must be less than 200 characters",
    ) {
        errors.push(FieldError {
            field: Field::Description,
            message,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn check_text(
    value: &str,
    max: usize,
    required: &'static str,
    too_long: &'static str,
) -> Option<&'static str> {
    if value.is_empty() {
        return Some(required);
    }
    if value.chars().count() > max {
        return Some(too_long);
    }
    None
}
