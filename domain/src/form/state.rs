//! Per-instance order-form state machine.
//!
//! One [`OrderFormState`] exists per agent-specific order form (DME,
//! pharmacy, nursing, state authorization). It tracks the field map, the
//! processing phase, and where the current values came from. Phases only
//! move forward (`Loading -> Autofilled/Error -> Editing -> Submitting ->
//! Submitted`) except for an explicit regenerate, which returns to
//! `Loading` under a new epoch.
//!
//! The epoch counter is the stale-result guard: every autofill or submit
//! completion carries the epoch it was started under, and completions from
//! a superseded epoch are discarded without touching state.

use crate::case::agent::AgentType;
use crate::case::routing::AgentResponse;
use crate::case::validation::FieldError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Order-form field values keyed by field name.
///
/// `BTreeMap` keeps iteration order deterministic for rendering and tests.
pub type FieldMap = BTreeMap<String, String>;

/// Processing phase of an order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Loading,
    Autofilled,
    Error,
    Editing,
    Submitting,
    Submitted,
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormPhase::Loading => "loading",
            FormPhase::Autofilled => "autofilled",
            FormPhase::Error => "error",
            FormPhase::Editing => "editing",
            FormPhase::Submitting => "submitting",
            FormPhase::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}

/// Provenance of the current field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    BackendAutofill,
    FallbackSynthetic,
    UserOverride,
}

/// Errors surfaced by form transitions.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("form is read-only after submission")]
    ReadOnly,

    #[error("missing required fields: {}", .0.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<FieldError>),

    #[error("cannot {action} while {phase}")]
    Phase {
        action: &'static str,
        phase: FormPhase,
    },
}

/// Whether a completion was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The completion belonged to a superseded epoch and was ignored.
    Discarded,
}

impl Applied {
    pub fn is_applied(&self) -> bool {
        matches!(self, Applied::Applied)
    }
}

/// Outcome of a submit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    /// The form moved to `Submitting`; the caller should dispatch.
    Proceed,
    /// The form was already submitted; submitting again is a no-op.
    AlreadySubmitted,
}

/// State of one order-form instance.
///
/// Created when an order-form page mounts; destroyed on navigation. Never
/// persisted.
#[derive(Debug, Clone)]
pub struct OrderFormState {
    agent: AgentType,
    fields: FieldMap,
    phase: FormPhase,
    source: FieldSource,
    epoch: u64,
    message: Option<String>,
    result: Option<AgentResponse>,
}

impl OrderFormState {
    /// Fields that must be non-empty before submission, per agent type.
    pub fn required_fields(agent: AgentType) -> &'static [&'static str] {
        match agent {
            AgentType::Nursing => &["concern", "careType"],
            AgentType::Dme => &["concern", "equipmentType"],
            AgentType::Pharmacy => &["concern", "medicationName"],
            AgentType::State => &["concern", "authorizationType"],
        }
    }

    /// New form in `Loading`, waiting for its first autofill.
    pub fn new(agent: AgentType) -> Self {
        Self {
            agent,
            fields: FieldMap::new(),
            phase: FormPhase::Loading,
            source: FieldSource::FallbackSynthetic,
            epoch: 0,
            message: None,
            result: None,
        }
    }

    pub fn agent(&self) -> AgentType {
        self.agent
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn source(&self) -> FieldSource {
        self.source
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Last user-visible message (submit failure, load error).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Agent reply from a successful submission.
    pub fn result(&self) -> Option<&AgentResponse> {
        self.result.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    /// Apply autofill values started under `epoch`.
    ///
    /// Stale epochs are discarded silently (last writer wins); a matching
    /// epoch replaces the field map wholesale and moves `Loading ->
    /// Autofilled`.
    pub fn apply_autofill(&mut self, epoch: u64, fields: FieldMap, source: FieldSource) -> Applied {
        if epoch != self.epoch || self.phase != FormPhase::Loading {
            return Applied::Discarded;
        }
        self.fields = fields;
        self.source = source;
        self.phase = FormPhase::Autofilled;
        self.message = None;
        Applied::Applied
    }

    /// Record a load failure started under `epoch`.
    pub fn apply_load_error(&mut self, epoch: u64, message: impl Into<String>) -> Applied {
        if epoch != self.epoch || self.phase != FormPhase::Loading {
            return Applied::Discarded;
        }
        self.phase = FormPhase::Error;
        self.message = Some(message.into());
        Applied::Applied
    }

    /// Edit a single field. Moves `Autofilled`/`Error` to `Editing` and
    /// marks the values as user-overridden.
    pub fn edit(&mut self, field: impl Into<String>, value: impl Into<String>) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Submitted => return Err(FormError::ReadOnly),
            FormPhase::Loading | FormPhase::Submitting => {
                return Err(FormError::Phase {
                    action: "edit",
                    phase: self.phase,
                });
            }
            FormPhase::Autofilled | FormPhase::Error | FormPhase::Editing => {}
        }
        self.fields.insert(field.into(), value.into());
        self.source = FieldSource::UserOverride;
        self.phase = FormPhase::Editing;
        Ok(())
    }

    /// Request submission.
    ///
    /// Validates the required-field set; on success the form enters
    /// `Submitting` and the caller dispatches the request. A second submit
    /// after success is a no-op.
    pub fn begin_submit(&mut self) -> Result<SubmitAction, FormError> {
        match self.phase {
            FormPhase::Submitted => return Ok(SubmitAction::AlreadySubmitted),
            FormPhase::Autofilled | FormPhase::Editing => {}
            FormPhase::Loading | FormPhase::Error | FormPhase::Submitting => {
                return Err(FormError::Phase {
                    action: "submit",
                    phase: self.phase,
                });
            }
        }

        let missing: Vec<FieldError> = Self::required_fields(self.agent)
            .iter()
            .filter(|name| {
                self.fields
                    .get(**name)
                    .map(|v| v.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|name| FieldError::new(*name, "required field is empty"))
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        self.phase = FormPhase::Submitting;
        self.message = None;
        Ok(SubmitAction::Proceed)
    }

    /// Complete a submission started under `epoch`.
    ///
    /// Success reaches the terminal `Submitted` phase; failure returns to
    /// `Editing` with a surfaced message.
    pub fn complete_submit(
        &mut self,
        epoch: u64,
        outcome: Result<AgentResponse, String>,
    ) -> Applied {
        if epoch != self.epoch || self.phase != FormPhase::Submitting {
            return Applied::Discarded;
        }
        match outcome {
            Ok(response) => {
                self.result = Some(response);
                self.phase = FormPhase::Submitted;
            }
            Err(message) => {
                self.message = Some(message);
                self.phase = FormPhase::Editing;
            }
        }
        Applied::Applied
    }

    /// User-initiated regenerate: back to `Loading` under a fresh epoch,
    /// superseding any in-flight operation. Not available while submitting.
    pub fn begin_regenerate(&mut self) -> Result<u64, FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::Phase {
                action: "regenerate",
                phase: self.phase,
            });
        }
        self.epoch += 1;
        self.phase = FormPhase::Loading;
        self.message = None;
        self.result = None;
        Ok(self.epoch)
    }

    /// Print/export hook for a submitted form. Placeholder: rendering and
    /// export are presentation concerns and intentionally not implemented
    /// here.
    pub fn export_requested(&self) -> bool {
        self.is_read_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn autofilled(agent: AgentType) -> OrderFormState {
        let mut form = OrderFormState::new(agent);
        let mut fields = FieldMap::new();
        for name in OrderFormState::required_fields(agent) {
            fields.insert(name.to_string(), "filled".to_string());
        }
        form.apply_autofill(0, fields, FieldSource::BackendAutofill);
        form
    }

    #[test]
    fn autofill_moves_loading_to_autofilled() {
        let mut form = OrderFormState::new(AgentType::Dme);
        let applied = form.apply_autofill(0, FieldMap::new(), FieldSource::FallbackSynthetic);
        assert!(applied.is_applied());
        assert_eq!(form.phase(), FormPhase::Autofilled);
        assert_eq!(form.source(), FieldSource::FallbackSynthetic);
    }

    #[test]
    fn stale_autofill_is_discarded() {
        let mut form = OrderFormState::new(AgentType::Dme);
        let old_epoch = form.epoch();
        let new_epoch = form.begin_regenerate().unwrap();
        assert_ne!(old_epoch, new_epoch);

        let mut stale = FieldMap::new();
        stale.insert("equipmentType".into(), "stale".into());
        assert_eq!(
            form.apply_autofill(old_epoch, stale, FieldSource::BackendAutofill),
            Applied::Discarded
        );
        assert_eq!(form.phase(), FormPhase::Loading);
        assert!(form.fields().is_empty());

        let mut fresh = FieldMap::new();
        fresh.insert("equipmentType".into(), "walker".into());
        assert!(form
            .apply_autofill(new_epoch, fresh, FieldSource::BackendAutofill)
            .is_applied());
        assert_eq!(form.field("equipmentType"), Some("walker"));
    }

    #[test]
    fn edit_marks_user_override() {
        let mut form = autofilled(AgentType::Pharmacy);
        form.edit("concern", "needs IV antibiotics").unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.source(), FieldSource::UserOverride);
    }

    #[test]
    fn edit_rejected_while_loading() {
        let mut form = OrderFormState::new(AgentType::Nursing);
        assert!(matches!(
            form.edit("concern", "x"),
            Err(FormError::Phase { action: "edit", .. })
        ));
    }

    #[test]
    fn submit_requires_concern() {
        let mut form = OrderFormState::new(AgentType::Dme);
        let mut fields = FieldMap::new();
        fields.insert("equipmentType".into(), "walker".into());
        form.apply_autofill(0, fields, FieldSource::BackendAutofill);

        match form.begin_submit() {
            Err(FormError::MissingFields(missing)) => {
                assert_eq!(missing.len(), 1);
                assert_eq!(missing[0].field, "concern");
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
        assert_eq!(form.phase(), FormPhase::Autofilled);
    }

    #[test]
    fn submit_then_success_is_terminal() {
        let mut form = autofilled(AgentType::Dme);
        assert_eq!(form.begin_submit().unwrap(), SubmitAction::Proceed);
        assert_eq!(form.phase(), FormPhase::Submitting);

        let applied = form.complete_submit(0, Ok(AgentResponse::new(AgentType::Dme)));
        assert!(applied.is_applied());
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert!(form.is_read_only());

        // Second submit without an intervening regenerate/edit: no-op.
        assert_eq!(form.begin_submit().unwrap(), SubmitAction::AlreadySubmitted);
        assert!(matches!(form.edit("concern", "x"), Err(FormError::ReadOnly)));
    }

    #[test]
    fn submit_failure_returns_to_editing_with_message() {
        let mut form = autofilled(AgentType::State);
        form.begin_submit().unwrap();
        form.complete_submit(0, Err("agent endpoint returned 500".to_string()));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.message(), Some("agent endpoint returned 500"));
        // Submitting again is allowed after the failure.
        assert_eq!(form.begin_submit().unwrap(), SubmitAction::Proceed);
    }

    #[test]
    fn regenerate_unavailable_while_submitting() {
        let mut form = autofilled(AgentType::Nursing);
        form.begin_submit().unwrap();
        assert!(form.begin_regenerate().is_err());
    }

    #[test]
    fn regenerate_resets_result_and_message() {
        let mut form = autofilled(AgentType::Dme);
        form.begin_submit().unwrap();
        form.complete_submit(0, Ok(AgentResponse::new(AgentType::Dme)));
        assert!(form.result().is_some());

        let epoch = form.begin_regenerate().unwrap();
        assert_eq!(form.phase(), FormPhase::Loading);
        assert!(form.result().is_none());
        assert_eq!(epoch, 1);
    }
}
