//! Domain layer for careroute
//!
//! This crate contains the discharge-planning entities, value objects, and
//! pure core logic. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Case
//!
//! A workflow run combines an immutable patient record with a caregiver's
//! submission, gets a routing decision from the backend classifier, and
//! collects structured replies from the specialized agents (nursing, DME,
//! pharmacy, state).
//!
//! ## Order forms
//!
//! Each agent domain has an order form driven by a per-instance state
//! machine. Forms start from backend autofill when available and from the
//! deterministic fallback synthesizer when not; the caregiver edits and
//! resubmits until the form reaches its terminal submitted state.

pub mod case;
pub mod core;
pub mod form;
pub mod handoff;
pub mod session;

// Re-export commonly used types
pub use case::{
    validate_submission, AgentFormData, AgentResponse, AgentType, CaregiverInput,
    CaregiverInputDraft, CaseRequest, CaseStatistics, CompleteCase, FieldError, NurseCandidate,
    NurseRecommendations, PatientData, QuickActionProfile, RoutingDecision, UrgencyLevel,
};
pub use core::error::DomainError;
pub use form::{
    fallback, Applied, FieldMap, FieldSource, FormError, FormPhase, OrderFormState, SubmitAction,
};
pub use handoff::OrderFormHandoff;
pub use session::Session;
