//! Case domain: patients, caregiver input, routing, and aggregation.

pub mod agent;
pub mod entities;
pub mod routing;
pub mod validation;

pub use agent::{AgentType, QuickActionProfile};
pub use entities::{CaregiverInput, CaregiverInputDraft, CaseRequest, PatientData, UrgencyLevel};
pub use routing::{
    AgentFormData, AgentResponse, CaseStatistics, CompleteCase, NurseCandidate,
    NurseRecommendations, RoutingDecision,
};
pub use validation::{validate_submission, FieldError};
