//! Routing coordinator
//!
//! Fire-once calls to the routing endpoint and the complete-case endpoint.
//! Failures surface verbatim: routing is never guessed locally, because a
//! misrouted case has clinical consequences. Both calls honor a
//! cancellation token so a superseded or torn-down page never applies an
//! in-flight result.

use crate::ports::discharge_gateway::{DischargeGateway, GatewayError};
use crate::ports::progress::CaseProgress;
use careroute_domain::{CaseRequest, CompleteCase, RoutingDecision};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors from the routing coordinator.
#[derive(Error, Debug)]
pub enum RouteCaseError {
    /// The owning page went away or the request was superseded; the result
    /// must be discarded, not rendered.
    #[error("Request cancelled")]
    Cancelled,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Use case for obtaining routing decisions and complete cases.
pub struct RouteCaseUseCase<G: DischargeGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: DischargeGateway + 'static> RouteCaseUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Single call to `POST /route-patient`.
    pub async fn route_only(
        &self,
        request: &CaseRequest,
        cancel: &CancellationToken,
    ) -> Result<RoutingDecision, RouteCaseError> {
        info!(
            patient_id = %request.caregiver_input.patient_id,
            "requesting routing decision"
        );
        let decision = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("routing request cancelled before completion");
                return Err(RouteCaseError::Cancelled);
            }
            result = self.gateway.route_patient(request) => result?,
        };
        info!(
            agents = decision.recommended_agents.len(),
            priority = decision.priority_score,
            "routing decision received"
        );
        Ok(decision)
    }

    /// Single call to `POST /process-complete-case`; the server performs
    /// routing and the full agent fan-out.
    pub async fn process_complete(
        &self,
        request: &CaseRequest,
        cancel: &CancellationToken,
        progress: &dyn CaseProgress,
    ) -> Result<CompleteCase, RouteCaseError> {
        progress.routing_started();
        info!(
            patient_id = %request.caregiver_input.patient_id,
            "processing complete case"
        );
        let case = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("complete-case request cancelled before completion");
                return Err(RouteCaseError::Cancelled);
            }
            result = self.gateway.process_complete_case(request) => result?,
        };
        progress.routing_completed(&case.routing_decision);
        for response in &case.agent_responses {
            progress.agent_completed(response.agent_type);
        }
        info!(
            agents = case.agent_responses.len(),
            "complete case received"
        );
        Ok(case)
    }
}
