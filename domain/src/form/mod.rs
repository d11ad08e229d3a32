//! Order-form state machine and fallback autofill synthesis.

pub mod fallback;
pub mod state;

pub use state::{Applied, FieldMap, FieldSource, FormError, FormPhase, OrderFormState, SubmitAction};
