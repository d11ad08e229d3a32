//! Case request builder
//!
//! Converts a selected patient record plus the caregiver's draft into the
//! canonical payload consumed by every backend endpoint. Pure transform:
//! validation problems come back as field-level errors for the
//! presentation layer to mark, never as panics.

use careroute_domain::{
    validate_submission, CaregiverInput, CaregiverInputDraft, CaseRequest, FieldError, PatientData,
};

pub struct CaseRequestBuilder;

impl CaseRequestBuilder {
    /// Build the routing/agent request payload.
    ///
    /// The concern is trimmed, and the free-text requested services are
    /// split on commas with empty tokens dropped.
    pub fn build(
        patient: &PatientData,
        draft: &CaregiverInputDraft,
    ) -> Result<CaseRequest, Vec<FieldError>> {
        let errors = validate_submission(patient, draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        let caregiver_input = CaregiverInput {
            patient_id: patient.patient_id.clone(),
            urgency_level: draft.urgency_level,
            primary_concern: draft.primary_concern.trim().to_string(),
            requested_services: draft.parsed_services(),
            additional_notes: draft
                .additional_notes
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };

        Ok(CaseRequest {
            patient_data: patient.clone(),
            caregiver_input,
        })
    }
}
