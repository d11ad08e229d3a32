//! Progress notification port
//!
//! Lets the presentation layer show per-agent processing status while a
//! workflow runs. All callbacks have no-op defaults so use cases can take
//! `&NoProgress` when nothing is listening.

use careroute_domain::{AgentType, RoutingDecision};

/// Observer for workflow progress.
pub trait CaseProgress: Send + Sync {
    fn routing_started(&self) {}

    fn routing_completed(&self, _decision: &RoutingDecision) {}

    fn agent_started(&self, _agent: AgentType) {}

    fn agent_completed(&self, _agent: AgentType) {}

    fn agent_failed(&self, _agent: AgentType, _message: &str) {}
}

/// No-op progress observer.
pub struct NoProgress;

impl CaseProgress for NoProgress {}
