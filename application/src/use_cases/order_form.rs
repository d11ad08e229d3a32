//! Order-form controller
//!
//! Drives one [`OrderFormState`] instance through its lifecycle: mount
//! from the navigation handoff, autofill (backend first, deterministic
//! fallback on any failure), caregiver edits, submission, and regenerate.
//!
//! Stale-result discipline: every autofill runs under an epoch ticket and
//! the controller's cancellation token. A regenerate issued while a fetch
//! is in flight bumps the epoch so the older completion is discarded
//! (last writer wins); detaching the controller cancels the token so
//! nothing is applied after teardown. At most one outstanding operation
//! per form instance is meaningful — superseded ones become no-ops.

use crate::ports::discharge_gateway::DischargeGateway;
use crate::use_cases::build_case::CaseRequestBuilder;
use careroute_domain::{
    fallback, AgentResponse, AgentType, Applied, CaregiverInputDraft, FieldMap, FieldSource,
    FormError, OrderFormHandoff, OrderFormState, PatientData, SubmitAction,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Epoch-tagged handle for one autofill round.
#[derive(Debug)]
pub struct AutofillTicket {
    epoch: u64,
    cancel: CancellationToken,
}

/// Result of one autofill fetch.
#[derive(Debug)]
pub enum AutofillOutcome {
    Fields { fields: FieldMap, source: FieldSource },
    Cancelled,
}

/// Outcome of a submit request.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Terminal: the form is now read-only.
    Submitted,
    /// The agent call failed; the form is back in editing with a message.
    Failed(String),
    /// The form was already submitted; nothing was sent.
    AlreadySubmitted,
    /// Torn down or superseded mid-flight; nothing was applied.
    Cancelled,
}

/// Controller for a single agent-specific order form.
///
/// Owns its state exclusively; independent form instances never interfere
/// with each other.
pub struct OrderFormController<G: DischargeGateway + 'static> {
    gateway: Arc<G>,
    patient: PatientData,
    state: OrderFormState,
    cancel: CancellationToken,
}

impl<G: DischargeGateway + 'static> OrderFormController<G> {
    /// Mount a form from the navigation handoff.
    ///
    /// If the handed-over case already carries `form_autofill` for this
    /// agent, it is applied immediately; otherwise the form stays in
    /// `Loading` until [`refresh`](Self::refresh) runs.
    pub fn mount(gateway: Arc<G>, agent: AgentType, handoff: &OrderFormHandoff) -> Self {
        let mut state = OrderFormState::new(agent);
        if let Some(fields) = handoff
            .results
            .response_for(agent)
            .and_then(|r| r.form_autofill.clone())
        {
            state.apply_autofill(state.epoch(), fields, FieldSource::BackendAutofill);
        }
        Self {
            gateway,
            patient: handoff.patient_data.clone(),
            state,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &OrderFormState {
        &self.state
    }

    pub fn patient(&self) -> &PatientData {
        &self.patient
    }

    /// Whether the form still needs an autofill round.
    pub fn needs_autofill(&self) -> bool {
        self.state.phase() == careroute_domain::FormPhase::Loading
    }

    /// Start an autofill round under the current epoch.
    pub fn begin_autofill(&self) -> AutofillTicket {
        AutofillTicket {
            epoch: self.state.epoch(),
            cancel: self.cancel.clone(),
        }
    }

    /// Fetch autofill data for a ticket.
    ///
    /// Never fails: an agent-call error (or a reply without autofill data)
    /// degrades to the deterministic fallback synthesizer, because the
    /// order-form page must always render a usable form.
    pub async fn fetch_autofill(&self, ticket: &AutofillTicket) -> AutofillOutcome {
        let agent = self.state.agent();
        let draft = CaregiverInputDraft::new(agent.autofill_concern())
            .with_services(agent.as_str());

        let request = match CaseRequestBuilder::build(&self.patient, &draft) {
            Ok(request) => request,
            Err(_) => {
                // Patient record is missing identity fields; the
                // synthesizer substitutes placeholders instead of failing.
                return AutofillOutcome::Fields {
                    fields: fallback::synthesize(agent, &self.patient),
                    source: FieldSource::FallbackSynthetic,
                };
            }
        };

        let result = tokio::select! {
            _ = ticket.cancel.cancelled() => return AutofillOutcome::Cancelled,
            result = self.gateway.process_agent(agent, &request) => result,
        };

        match result {
            Ok(AgentResponse {
                form_autofill: Some(fields),
                ..
            }) => AutofillOutcome::Fields {
                fields,
                source: FieldSource::BackendAutofill,
            },
            Ok(_) => {
                debug!(%agent, "agent reply had no autofill block; synthesizing");
                AutofillOutcome::Fields {
                    fields: fallback::synthesize(agent, &self.patient),
                    source: FieldSource::FallbackSynthetic,
                }
            }
            Err(err) => {
                warn!(%agent, error = %err, "autofill call failed; synthesizing");
                AutofillOutcome::Fields {
                    fields: fallback::synthesize(agent, &self.patient),
                    source: FieldSource::FallbackSynthetic,
                }
            }
        }
    }

    /// Apply a completed autofill round. Stale or torn-down completions are
    /// discarded silently.
    pub fn apply_autofill(&mut self, ticket: AutofillTicket, outcome: AutofillOutcome) -> Applied {
        if ticket.cancel.is_cancelled() {
            debug!("discarding autofill completion after teardown");
            return Applied::Discarded;
        }
        match outcome {
            AutofillOutcome::Cancelled => Applied::Discarded,
            AutofillOutcome::Fields { fields, source } => {
                self.state.apply_autofill(ticket.epoch, fields, source)
            }
        }
    }

    /// Convenience: run one full autofill round.
    pub async fn refresh(&mut self) -> Applied {
        let ticket = self.begin_autofill();
        let outcome = self.fetch_autofill(&ticket).await;
        self.apply_autofill(ticket, outcome)
    }

    /// Edit one field.
    pub fn edit(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.state.edit(field, value)
    }

    /// User-initiated regenerate: supersedes any in-flight autofill and
    /// returns the ticket for the fresh round.
    pub fn regenerate(&mut self) -> Result<AutofillTicket, FormError> {
        self.state.begin_regenerate()?;
        Ok(self.begin_autofill())
    }

    /// Submit the form to its agent endpoint.
    ///
    /// Validation problems come back as [`FormError`]; transport failures
    /// are recorded on the form (editing phase plus message) and reported
    /// as [`SubmitOutcome::Failed`].
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if self.state.begin_submit()? == SubmitAction::AlreadySubmitted {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }
        let epoch = self.state.epoch();
        let agent = self.state.agent();

        let mut draft = CaregiverInputDraft::new(
            self.state.field("concern").unwrap_or_default().to_string(),
        )
        .with_services(agent.as_str());
        if let Some(notes) = self.state.field("notes") {
            draft = draft.with_notes(notes.to_string());
        }

        let request = match CaseRequestBuilder::build(&self.patient, &draft) {
            Ok(request) => request,
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                self.state.complete_submit(epoch, Err(message.clone()));
                return Ok(SubmitOutcome::Failed(message));
            }
        };

        let result = tokio::select! {
            _ = self.cancel.cancelled() => return Ok(SubmitOutcome::Cancelled),
            result = self.gateway.process_agent(agent, &request) => result,
        };

        match result {
            Ok(response) => {
                self.state.complete_submit(epoch, Ok(response));
                Ok(SubmitOutcome::Submitted)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%agent, error = %message, "order form submission failed");
                self.state.complete_submit(epoch, Err(message.clone()));
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Tear the form down: any in-flight completion is discarded.
    pub fn detach(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::discharge_gateway::GatewayError;
    use async_trait::async_trait;
    use careroute_domain::{
        CaseRequest, CompleteCase, FormPhase, RoutingDecision,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    enum Reply {
        Autofill(FieldMap),
        Bare,
        Fail,
    }

    struct MockGateway {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockGateway {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DischargeGateway for MockGateway {
        async fn route_patient(
            &self,
            _request: &CaseRequest,
        ) -> Result<RoutingDecision, GatewayError> {
            unreachable!("order forms never route")
        }

        async fn process_complete_case(
            &self,
            _request: &CaseRequest,
        ) -> Result<CompleteCase, GatewayError> {
            unreachable!("order forms never use the complete-case endpoint")
        }

        async fn process_agent(
            &self,
            agent: AgentType,
            _request: &CaseRequest,
        ) -> Result<AgentResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Fail => Err(GatewayError::Connection("connection refused".to_string())),
                Reply::Bare => Ok(AgentResponse::new(agent)),
                Reply::Autofill(fields) => {
                    let mut response = AgentResponse::new(agent);
                    response.form_autofill = Some(fields.clone());
                    Ok(response)
                }
            }
        }
    }

    fn handoff() -> OrderFormHandoff {
        let patient = PatientData::new("P1", "Jane Doe", "CHF");
        let decision = RoutingDecision::quick_action("P1", AgentType::Dme);
        OrderFormHandoff::new(CompleteCase::routing_only(decision), patient)
    }

    fn backend_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("concern".into(), "hospital bed".into());
        fields.insert("equipmentType".into(), "hospital-bed".into());
        fields.insert("patientName".into(), "Jane Doe".into());
        fields
    }

    #[tokio::test]
    async fn refresh_uses_backend_autofill_when_present() {
        let gateway = Arc::new(MockGateway::new(Reply::Autofill(backend_fields())));
        let mut form = OrderFormController::mount(gateway, AgentType::Dme, &handoff());
        assert!(form.needs_autofill());

        assert!(form.refresh().await.is_applied());
        assert_eq!(form.state().phase(), FormPhase::Autofilled);
        assert_eq!(form.state().source(), FieldSource::BackendAutofill);
        assert_eq!(form.state().field("equipmentType"), Some("hospital-bed"));
    }

    #[tokio::test]
    async fn network_failure_falls_back_to_synthesized_form() {
        let gateway = Arc::new(MockGateway::new(Reply::Fail));
        let mut form = OrderFormController::mount(gateway, AgentType::Dme, &handoff());

        form.refresh().await;
        assert_eq!(form.state().phase(), FormPhase::Autofilled);
        assert_eq!(form.state().source(), FieldSource::FallbackSynthetic);
        // Scenario from the discharge workflow: Jane Doe / CHF / DME.
        assert_eq!(form.state().field("patientName"), Some("Jane Doe"));
        assert!(!form.state().field("equipmentType").unwrap().is_empty());
    }

    #[tokio::test]
    async fn reply_without_autofill_block_synthesizes() {
        let gateway = Arc::new(MockGateway::new(Reply::Bare));
        let mut form = OrderFormController::mount(gateway, AgentType::Pharmacy, &handoff());

        form.refresh().await;
        assert_eq!(form.state().source(), FieldSource::FallbackSynthetic);
        assert!(form.state().field("medicationName").is_some());
    }

    #[tokio::test]
    async fn mount_applies_handoff_autofill_without_a_network_call() {
        let gateway = Arc::new(MockGateway::new(Reply::Fail));
        let mut handoff = handoff();
        let mut response = AgentResponse::new(AgentType::Dme);
        response.form_autofill = Some(backend_fields());
        handoff.results.agent_responses.push(response);

        let form = OrderFormController::mount(gateway.clone(), AgentType::Dme, &handoff);
        assert!(!form.needs_autofill());
        assert_eq!(form.state().source(), FieldSource::BackendAutofill);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_completion_after_detach_is_discarded() {
        let gateway = Arc::new(MockGateway::new(Reply::Autofill(backend_fields())));
        let mut form = OrderFormController::mount(gateway, AgentType::Dme, &handoff());

        let ticket = form.begin_autofill();
        let outcome = form.fetch_autofill(&ticket).await;
        form.detach();

        // The late completion resolves after navigation; nothing mutates.
        assert_eq!(form.apply_autofill(ticket, outcome), Applied::Discarded);
        assert_eq!(form.state().phase(), FormPhase::Loading);
        assert!(form.state().fields().is_empty());
    }

    #[tokio::test]
    async fn regenerate_supersedes_in_flight_autofill() {
        let gateway = Arc::new(MockGateway::new(Reply::Autofill(backend_fields())));
        let mut form = OrderFormController::mount(gateway, AgentType::Dme, &handoff());

        let stale_ticket = form.begin_autofill();
        let stale_outcome = form.fetch_autofill(&stale_ticket).await;

        let fresh_ticket = form.regenerate().unwrap();
        let fresh_outcome = form.fetch_autofill(&fresh_ticket).await;

        assert_eq!(
            form.apply_autofill(stale_ticket, stale_outcome),
            Applied::Discarded
        );
        assert!(form.apply_autofill(fresh_ticket, fresh_outcome).is_applied());
        assert_eq!(form.state().phase(), FormPhase::Autofilled);
    }

    #[tokio::test]
    async fn submit_success_is_terminal_and_resubmit_is_noop() {
        let gateway = Arc::new(MockGateway::new(Reply::Autofill(backend_fields())));
        let mut form = OrderFormController::mount(gateway.clone(), AgentType::Dme, &handoff());
        form.refresh().await;

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Submitted);
        assert!(form.state().is_read_only());
        let calls_after_first = gateway.calls.load(Ordering::SeqCst);

        assert_eq!(
            form.submit().await.unwrap(),
            SubmitOutcome::AlreadySubmitted
        );
        assert_eq!(gateway.calls.load(Ordering::SeqCst), calls_after_first);
    }

    #[tokio::test]
    async fn submit_failure_surfaces_message_and_returns_to_editing() {
        let gateway = Arc::new(MockGateway::new(Reply::Fail));
        let mut form = OrderFormController::mount(gateway, AgentType::Dme, &handoff());
        form.refresh().await; // fallback autofill
        form.edit("concern", "needs hospital bed").unwrap();

        match form.submit().await.unwrap() {
            SubmitOutcome::Failed(message) => assert!(message.contains("connection refused")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(form.state().phase(), FormPhase::Editing);
        assert!(form.state().message().is_some());

        // The caregiver can fix things and submit again.
        assert!(form.submit().await.is_ok());
    }

    #[tokio::test]
    async fn submit_with_empty_concern_is_a_field_error() {
        let gateway = Arc::new(MockGateway::new(Reply::Bare));
        let mut form = OrderFormController::mount(gateway, AgentType::Dme, &handoff());
        form.refresh().await;
        form.edit("concern", "  ").unwrap();

        match form.submit().await {
            Err(FormError::MissingFields(missing)) => {
                assert!(missing.iter().any(|e| e.field == "concern"));
            }
            other => panic!("expected missing concern, got {other:?}"),
        }
    }
}
