//! Field-level validation for caregiver submissions.
//!
//! Validation failures are reported as values so the presentation layer can
//! mark the offending field; they are never sent to the backend and never
//! raised as panics.

use super::entities::{CaregiverInputDraft, PatientData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single invalid or missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the inputs of a case submission, collecting every problem rather
/// than stopping at the first.
pub fn validate_submission(patient: &PatientData, draft: &CaregiverInputDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if patient.patient_id.trim().is_empty() {
        errors.push(FieldError::new("patient_id", "patient id must not be empty"));
    }
    if draft.primary_concern.trim().is_empty() {
        errors.push(FieldError::new(
            "primary_concern",
            "primary concern is required",
        ));
    }

    errors
}
