//! Application layer for careroute
//!
//! Use cases for the discharge-planning workflow and the ports they talk
//! through. Adapters for the ports live in the infrastructure layer; this
//! crate depends only on the domain.
//!
//! # Workflow
//!
//! 1. [`CaseRequestBuilder`] turns a patient record plus caregiver entry
//!    into the canonical request payload.
//! 2. [`RouteCaseUseCase`] obtains a routing decision, or the complete
//!    case with server-side agent fan-out.
//! 3. [`QuickActionUseCase`] dispatches one agent directly and wraps the
//!    reply into the complete-case shape.
//! 4. [`OrderFormController`] drives one order form through autofill,
//!    editing, and submission, falling back to synthesized field values
//!    whenever the backend cannot provide them.

pub mod ports;
pub mod use_cases;

pub use ports::{
    CaseProgress, DataStatus, DirectoryError, DirectoryReport, DischargeGateway, FileInfo,
    GatewayError, NoProgress, PatientDirectory,
};
pub use use_cases::{
    AutofillOutcome, AutofillTicket, CaseRequestBuilder, OrderFormController, QuickActionError,
    QuickActionUseCase, RouteCaseError, RouteCaseUseCase, SubmitOutcome,
};
