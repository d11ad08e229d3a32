//! Application use cases.

pub mod build_case;
pub mod order_form;
pub mod quick_action;
pub mod route_case;

pub use build_case::CaseRequestBuilder;
pub use order_form::{
    AutofillOutcome, AutofillTicket, OrderFormController, SubmitOutcome,
};
pub use quick_action::{QuickActionError, QuickActionUseCase};
pub use route_case::{RouteCaseError, RouteCaseUseCase};
