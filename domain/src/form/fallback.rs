//! Deterministic autofill fallback for order forms.
//!
//! When an agent call fails, times out, or omits `form_autofill`, the
//! order-form page still has to render a complete, editable form. This
//! module generates a full field set for the target agent type from
//! whatever patient context is available.
//!
//! The output is placeholder data for the caregiver to review and edit,
//! not a clinical recommendation. Generation is pure: the same
//! `(AgentType, PatientData)` pair always yields the same field map, and
//! no clocks are read (scheduling fields carry fixed placeholder text).

use crate::case::agent::AgentType;
use crate::case::entities::PatientData;
use super::state::FieldMap;

/// Fixed literals used when the patient record is missing identity fields.
const UNKNOWN_NAME: &str = "Unknown Patient";
const UNKNOWN_PHONE: &str = "(555) 123-4567";
const UNKNOWN_ADDRESS: &str = "123 Main Street, Anytown, ST 12345";
const UNKNOWN_DOB: &str = "1965-07-22";
const DEFAULT_PHYSICIAN: &str = "Dr. Sherry Chung";
const DEFAULT_NPI: &str = "3662871596";
const DEFAULT_PHYSICIAN_PHONE: &str = "(067) 318-5308";

/// Generate a complete, internally consistent field map for the given
/// agent's order form.
pub fn synthesize(agent: AgentType, patient: &PatientData) -> FieldMap {
    let mut fields = FieldMap::new();
    identity_fields(&mut fields, patient);
    fields.insert("concern".into(), agent.autofill_concern().into());

    match agent {
        AgentType::Dme => dme_fields(&mut fields, patient),
        AgentType::Pharmacy => pharmacy_fields(&mut fields, patient),
        AgentType::Nursing => nursing_fields(&mut fields, patient),
        AgentType::State => state_fields(&mut fields, patient),
    }

    fields
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn opt_or(value: &Option<String>, fallback: &str) -> String {
    non_empty_or(value.as_deref().unwrap_or(""), fallback)
}

fn identity_fields(fields: &mut FieldMap, patient: &PatientData) {
    let name = non_empty_or(&patient.name, UNKNOWN_NAME);
    let mrn = match &patient.mrn {
        Some(mrn) if !mrn.trim().is_empty() => mrn.trim().to_string(),
        _ if !patient.patient_id.trim().is_empty() => format!("MRN-{}", patient.patient_id.trim()),
        _ => "MRN-UNKNOWN".to_string(),
    };

    fields.insert("patientName".into(), name);
    fields.insert("mrn".into(), mrn);
    fields.insert("dateOfBirth".into(), opt_or(&patient.date_of_birth, UNKNOWN_DOB));
    fields.insert("phoneNumber".into(), opt_or(&patient.contact_number, UNKNOWN_PHONE));
    fields.insert("patientAddress".into(), opt_or(&patient.address, UNKNOWN_ADDRESS));
    fields.insert(
        "prescribingPhysician".into(),
        opt_or(&patient.prescriber_name, DEFAULT_PHYSICIAN),
    );
    fields.insert("physicianNPI".into(), opt_or(&patient.npi_number, DEFAULT_NPI));
    fields.insert("physicianPhone".into(), DEFAULT_PHYSICIAN_PHONE.into());
    fields.insert(
        "primaryDiagnosis".into(),
        icd10_label(&patient.primary_diagnosis),
    );
    fields.insert(
        "secondaryDiagnoses".into(),
        opt_or(&patient.secondary_diagnoses, ""),
    );
}

/// Map the handful of diagnoses the sample data uses onto coded labels;
/// anything else passes through verbatim.
fn icd10_label(diagnosis: &str) -> String {
    let lower = diagnosis.to_ascii_lowercase();
    if lower.contains("heart failure") || lower.contains("chf") {
        "I50.9 - Heart failure, unspecified".to_string()
    } else if lower.contains("copd") {
        "J44.1 - Chronic obstructive pulmonary disease with acute exacerbation".to_string()
    } else if lower.contains("pancreatitis") {
        "K85.9 - Acute pancreatitis, unspecified".to_string()
    } else {
        diagnosis.to_string()
    }
}

fn dme_fields(fields: &mut FieldMap, patient: &PatientData) {
    let equipment = patient
        .equipment_needed
        .as_deref()
        .unwrap_or("")
        .to_ascii_lowercase();
    let diagnosis = patient.primary_diagnosis.to_ascii_lowercase();

    let (equipment_type, model, necessity) = if equipment.contains("bed")
        || diagnosis.contains("heart failure")
        || diagnosis.contains("chf")
    {
        (
            "hospital-bed",
            "Hill-Rom Advance Series Hospital Bed",
            "requires a hospital bed for safe positioning; elevated head positioning reduces cardiac workload and prevents respiratory complications",
        )
    } else if equipment.contains("oxygen")
        || diagnosis.contains("copd")
        || diagnosis.contains("respiratory")
    {
        (
            "oxygen",
            "Invacare Platinum 10L Oxygen Concentrator",
            "requires home oxygen therapy for respiratory support and maintaining adequate oxygen saturation",
        )
    } else if equipment.contains("wheelchair") || equipment.contains("mobility") {
        (
            "wheelchair",
            "Drive Medical Lightweight Wheelchair",
            "requires a wheelchair for safe mobility and transportation due to limited ambulatory capacity",
        )
    } else {
        (
            "walker",
            "Drive Medical Deluxe Folding Walker",
            "requires a mobility assistance device for safe ambulation and fall prevention",
        )
    };

    fields.insert("equipmentType".into(), equipment_type.into());
    fields.insert("equipmentModel".into(), model.into());
    fields.insert("quantity".into(), "1".into());
    fields.insert("rentalPurchase".into(), "rental".into());
    fields.insert(
        "deliveryDate".into(),
        "2-3 business days after discharge".into(),
    );
    fields.insert(
        "medicalNecessity".into(),
        format!(
            "Patient with {} {}.",
            non_empty_or(&patient.primary_diagnosis, "the documented diagnosis"),
            necessity
        ),
    );
    fields.insert(
        "physicianOrders".into(),
        format!("{model} with appropriate accessories for home use. Duration: 30 days with potential for extension based on recovery progress."),
    );
    fields.insert("primaryInsurance".into(), "Medicare Part B".into());
    fields.insert(
        "coverageStatus".into(),
        opt_or(&patient.insurance_coverage_status, "pending"),
    );
    fields.insert("priorAuthNumber".into(), String::new());
    fields.insert("setupRequired".into(), "yes".into());
    fields.insert("trainingNeeded".into(), "yes".into());
    fields.insert("emergencyContactName".into(), "Emergency Contact".into());
    fields.insert("emergencyContactPhone".into(), "(555) 000-0000".into());
    fields.insert(
        "notes".into(),
        format!(
            "Patient requires {} for {} management. Coordinate delivery timing with discharge planning.",
            equipment_type.replace('-', " "),
            non_empty_or(&patient.primary_diagnosis, "ongoing condition")
        ),
    );
}

fn pharmacy_fields(fields: &mut FieldMap, patient: &PatientData) {
    let medication = patient
        .medication
        .as_deref()
        .unwrap_or("")
        .to_ascii_lowercase();

    let (name, strength, duration) = if medication.contains("daptomycin") {
        ("Daptomycin (Cubicin)", "500mg/10mL", "10 days")
    } else if medication.contains("cefepime") {
        ("Cefepime (Maxipime)", "2g/50mL", "7 days")
    } else {
        // Ceftriaxone is both the explicit match and the default regimen.
        ("Ceftriaxone (Rocephin)", "1g/10mL", "7 days")
    };

    fields.insert("medicationName".into(), name.into());
    fields.insert("strength".into(), strength.into());
    fields.insert("dosageForm".into(), "injection".into());
    fields.insert("route".into(), "IV".into());
    fields.insert("frequency".into(), "once-daily".into());
    fields.insert("duration".into(), duration.into());
    fields.insert("startDate".into(), "upon discharge".into());
    fields.insert("infusionType".into(), "antibiotic".into());
    fields.insert("vascularAccess".into(), "picc".into());
    fields.insert("infusionRate".into(), "50 mL/hr".into());
    fields.insert("infusionDuration".into(), "30 minutes".into());
    fields.insert(
        "specialHandling".into(),
        "Refrigerate until use, protect from light".into(),
    );
    fields.insert(
        "allergies".into(),
        opt_or(&patient.allergies, "NKDA (No Known Drug Allergies)"),
    );
    fields.insert(
        "currentMedications".into(),
        opt_or(&patient.medication, "See current medication list"),
    );
    fields.insert("practiceName".into(), "Regional Medical Center".into());
    fields.insert("primaryInsurance".into(), "Medicare Part B".into());
    fields.insert("priorAuthNumber".into(), String::new());
    fields.insert(
        "notes".into(),
        "Patient requires home infusion therapy. Coordinate PICC line maintenance and medication delivery with discharge planning.".into(),
    );
}

fn nursing_fields(fields: &mut FieldMap, patient: &PatientData) {
    fields.insert("careType".into(), "Skilled nursing assessment".into());
    fields.insert(
        "visitFrequency".into(),
        opt_or(&patient.skilled_nursing_needed, "3x weekly"),
    );
    fields.insert(
        "firstVisitTarget".into(),
        "within 24 hours of discharge".into(),
    );
    fields.insert("nurseAgency".into(), "Regional Home Health".into());
    fields.insert(
        "emergencyProcedure".into(),
        "Call agency triage line; escalate to 911 for acute events".into(),
    );
    fields.insert(
        "notes".into(),
        format!(
            "Skilled nursing follow-up for {}. Review medication adherence and wound/line care at first visit.",
            non_empty_or(&patient.primary_diagnosis, "post-ICU recovery")
        ),
    );
}

fn state_fields(fields: &mut FieldMap, patient: &PatientData) {
    fields.insert(
        "authorizationType".into(),
        "Prior authorization - home health services".into(),
    );
    fields.insert(
        "coverageStatus".into(),
        opt_or(&patient.insurance_coverage_status, "pending"),
    );
    fields.insert(
        "medicaidProgram".into(),
        "Home and Community Based Services waiver".into(),
    );
    fields.insert("authorizationTimeline".into(), "3-5 business days".into());
    fields.insert("priorAuthNumber".into(), String::new());
    fields.insert("appealsAvailable".into(), "yes".into());
    fields.insert(
        "notes".into(),
        "Verify coverage for prescribed DME and home health before discharge. Submit waiver application if eligible.".into(),
    );
}
