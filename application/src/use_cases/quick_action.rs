//! Quick-action agent dispatch
//!
//! The caregiver explicitly invokes exactly one agent from the dashboard.
//! The routing service is not consulted, so the reply is wrapped into the
//! `CompleteCase` shape with a locally synthesized minimal routing
//! decision built from the agent's quick-action profile.
//!
//! Failures here are non-blocking for the page: the caller renders the
//! error as a dismissible message, not an error boundary.

use crate::ports::discharge_gateway::{DischargeGateway, GatewayError};
use crate::ports::progress::CaseProgress;
use crate::use_cases::build_case::CaseRequestBuilder;
use careroute_domain::{
    AgentType, CaregiverInputDraft, CompleteCase, FieldError, PatientData, RoutingDecision,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Concern substituted when the caregiver triggered a quick action without
/// typing one.
const DEFAULT_CONCERN: &str = "Quick action processing";

#[derive(Error, Debug)]
pub enum QuickActionError {
    #[error("Invalid input")]
    Validation(Vec<FieldError>),

    #[error("Request cancelled")]
    Cancelled,

    #[error("{agent} agent call failed: {source}")]
    Agent {
        agent: AgentType,
        source: GatewayError,
    },
}

/// Use case for dispatching a single agent directly.
pub struct QuickActionUseCase<G: DischargeGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: DischargeGateway + 'static> QuickActionUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        agent: AgentType,
        patient: &PatientData,
        draft: &CaregiverInputDraft,
        cancel: &CancellationToken,
        progress: &dyn CaseProgress,
    ) -> Result<CompleteCase, QuickActionError> {
        let mut draft = draft.clone();
        if draft.primary_concern.trim().is_empty() {
            draft.primary_concern = DEFAULT_CONCERN.to_string();
        }
        let request = CaseRequestBuilder::build(patient, &draft)
            .map_err(QuickActionError::Validation)?;

        info!(%agent, patient_id = %patient.patient_id, "quick action dispatch");
        progress.agent_started(agent);

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(QuickActionError::Cancelled),
            result = self.gateway.process_agent(agent, &request) => match result {
                Ok(response) => response,
                Err(source) => {
                    progress.agent_failed(agent, &source.to_string());
                    return Err(QuickActionError::Agent { agent, source });
                }
            },
        };
        progress.agent_completed(agent);

        let decision = RoutingDecision::quick_action(&patient.patient_id, agent);
        Ok(CompleteCase::aggregate(decision, vec![response]))
    }
}
