//! Case entities: the patient record and the caregiver's submission.
//!
//! A workflow run starts from an immutable [`PatientData`] selected out of
//! the external patient directory, plus a [`CaregiverInputDraft`] typed in
//! by the caregiver. The two are combined into the canonical
//! [`CaseRequest`] payload consumed by every backend endpoint.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient record as sourced from the patient directory.
///
/// Immutable once selected for a workflow run. The primary diagnosis is
/// serialized under the backend's historical wire name
/// `primary_icu_diagnosis` while still accepting `primary_diagnosis` from
/// roster responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientData {
    pub patient_id: String,
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "primary_icu_diagnosis", alias = "primary_diagnosis")]
    pub primary_diagnosis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_diagnoses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(alias = "phone", skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescriber_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npi_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skilled_nursing_needed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_needed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_coverage_status: Option<String>,
}

impl PatientData {
    /// Create a patient record with the required identity fields.
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        primary_diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            gender: String::new(),
            primary_diagnosis: primary_diagnosis.into(),
            secondary_diagnoses: None,
            date_of_birth: None,
            age: None,
            mrn: None,
            address: None,
            contact_number: None,
            allergies: None,
            medication: None,
            prescriber_name: None,
            npi_number: None,
            skilled_nursing_needed: None,
            equipment_needed: None,
            insurance_coverage_status: None,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_equipment_needed(mut self, equipment: impl Into<String>) -> Self {
        self.equipment_needed = Some(equipment.into());
        self
    }

    pub fn with_medication(mut self, medication: impl Into<String>) -> Self {
        self.medication = Some(medication.into());
        self
    }
}

/// Urgency communicated by the caregiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(UrgencyLevel::Low),
            "medium" => Ok(UrgencyLevel::Medium),
            "high" => Ok(UrgencyLevel::High),
            other => Err(DomainError::InvalidUrgency(other.to_string())),
        }
    }
}

/// Raw caregiver entry before validation.
///
/// `requested_services` is free text as typed; the case builder splits it
/// on commas and drops empty tokens.
#[derive(Debug, Clone, Default)]
pub struct CaregiverInputDraft {
    pub urgency_level: UrgencyLevel,
    pub primary_concern: String,
    pub requested_services: String,
    pub additional_notes: Option<String>,
}

impl CaregiverInputDraft {
    pub fn new(primary_concern: impl Into<String>) -> Self {
        Self {
            primary_concern: primary_concern.into(),
            ..Default::default()
        }
    }

    pub fn with_urgency(mut self, urgency: UrgencyLevel) -> Self {
        self.urgency_level = urgency;
        self
    }

    pub fn with_services(mut self, services: impl Into<String>) -> Self {
        self.requested_services = services.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.additional_notes = Some(notes.into());
        self
    }

    /// Split the requested-services text on commas, trimming each token and
    /// dropping empties.
    pub fn parsed_services(&self) -> Vec<String> {
        self.requested_services
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Validated caregiver input, created fresh per submission and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaregiverInput {
    pub patient_id: String,
    pub urgency_level: UrgencyLevel,
    pub primary_concern: String,
    #[serde(default)]
    pub requested_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

/// The canonical request payload sent to every routing and agent endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRequest {
    pub patient_data: PatientData,
    pub caregiver_input: CaregiverInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_services_drops_empty_tokens() {
        let draft = CaregiverInputDraft::new("bed").with_services("dme, , nursing ,,pharmacy");
        assert_eq!(draft.parsed_services(), vec!["dme", "nursing", "pharmacy"]);
    }

    #[test]
    fn parsed_services_empty_input() {
        let draft = CaregiverInputDraft::new("bed");
        assert!(draft.parsed_services().is_empty());
    }

    #[test]
    fn urgency_parses_and_defaults() {
        assert_eq!("HIGH".parse::<UrgencyLevel>().unwrap(), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::default(), UrgencyLevel::Medium);
        assert!("urgent".parse::<UrgencyLevel>().is_err());
    }

    #[test]
    fn patient_serializes_diagnosis_under_wire_name() {
        let patient = PatientData::new("P1", "Jane Doe", "CHF");
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["primary_icu_diagnosis"], "CHF");
        assert!(json.get("primary_diagnosis").is_none());
    }

    #[test]
    fn patient_accepts_roster_field_name() {
        let patient: PatientData = serde_json::from_value(serde_json::json!({
            "patient_id": "P2",
            "name": "Gary Jones",
            "primary_diagnosis": "COPD Exacerbation",
            "phone": "(555) 456-7890"
        }))
        .unwrap();
        assert_eq!(patient.primary_diagnosis, "COPD Exacerbation");
        assert_eq!(patient.contact_number.as_deref(), Some("(555) 456-7890"));
    }
}
