//! Typed handoff contract between workflow pages.
//!
//! Models the navigation state carried from the results page to the order
//! forms as an explicit value, so downstream forms can be driven and
//! tested without a real router.

use crate::case::entities::PatientData;
use crate::case::routing::CompleteCase;
use serde::{Deserialize, Serialize};

/// Everything an order-form page needs to mount without re-fetching.
///
/// Invariant: `results` was produced from `patient_data`, so the form can
/// re-request autofill without re-prompting the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFormHandoff {
    pub results: CompleteCase,
    pub patient_data: PatientData,
}

impl OrderFormHandoff {
    pub fn new(results: CompleteCase, patient_data: PatientData) -> Self {
        Self {
            results,
            patient_data,
        }
    }
}
