//! Discharge backend gateway port
//!
//! Defines how the application layer talks to the routing service and the
//! specialized agents. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use careroute_domain::{AgentResponse, AgentType, CaseRequest, CompleteCase, RoutingDecision};
use thiserror::Error;

/// Errors that can occur during backend calls.
///
/// `Status` and `Schema` cover server failures and boundary validation;
/// both belong to the agent-call error class when raised from a
/// single-agent endpoint and to the routing error class when raised from a
/// routing endpoint; the distinction is made by the calling use case, not
/// here.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Response schema mismatch: {0}")]
    Schema(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the discharge-planning backend.
#[async_trait]
pub trait DischargeGateway: Send + Sync {
    /// `POST /route-patient`: routing decision only.
    async fn route_patient(&self, request: &CaseRequest) -> Result<RoutingDecision, GatewayError>;

    /// `POST /process-complete-case`: routing plus full agent fan-out,
    /// performed server-side in one call.
    async fn process_complete_case(
        &self,
        request: &CaseRequest,
    ) -> Result<CompleteCase, GatewayError>;

    /// `POST /process-{agent}-agent`: one specialized agent.
    async fn process_agent(
        &self,
        agent: AgentType,
        request: &CaseRequest,
    ) -> Result<AgentResponse, GatewayError>;
}
