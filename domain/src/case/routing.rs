//! Routing and agent response value objects, plus result aggregation.
//!
//! These types mirror the backend's reply shapes:
//! - [`RoutingDecision`] - which agents the classifier recommends
//! - [`AgentResponse`] - one specialized agent's structured output
//! - [`CompleteCase`] - the aggregate view handed between pages
//! - [`CaseStatistics`] - display reductions over a complete case

use super::agent::AgentType;
use crate::form::FieldMap;
use serde::{Deserialize, Serialize};

/// Routing decision produced once per workflow run by the routing service.
///
/// Read-only to the client; the structure is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub patient_id: String,
    pub recommended_agents: Vec<AgentType>,
    pub reasoning: String,
    pub priority_score: u8,
    pub estimated_timeline: String,
}

impl RoutingDecision {
    /// Minimal decision synthesized locally for a quick action, where the
    /// routing service was not consulted.
    pub fn quick_action(patient_id: impl Into<String>, agent: AgentType) -> Self {
        let profile = agent.quick_profile();
        Self {
            patient_id: patient_id.into(),
            recommended_agents: vec![agent],
            reasoning: profile.reasoning.to_string(),
            priority_score: profile.priority_score,
            estimated_timeline: profile.estimated_timeline.to_string(),
        }
    }
}

/// One ranked caregiver candidate from the nursing agent's retrieval step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurseCandidate {
    /// Full nurse profile as returned by the backend.
    pub nurse: serde_json::Value,
    pub match_score: f64,
    #[serde(default)]
    pub rationale: String,
}

/// Ranked caregiver candidates carried by nursing agent replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurseRecommendations {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recommendations: Vec<NurseCandidate>,
}

/// Agent-specific form payload attached to some replies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentFormData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nurse_recommendations: Option<NurseRecommendations>,
    /// Remaining form fields the client displays but does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Structured output of one specialized agent, keyed by `agent_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent_type: AgentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub external_referrals: Vec<String>,
    /// Named form artifacts, when the agent produced any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forms: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_completion_time: Option<String>,
    /// Ready-to-use order-form field values (DME / pharmacy / state replies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_autofill: Option<FieldMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<AgentFormData>,
}

impl AgentResponse {
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_type,
            patient_id: None,
            recommendations: Vec::new(),
            next_steps: Vec::new(),
            external_referrals: Vec::new(),
            forms: Vec::new(),
            priority_level: None,
            estimated_completion_time: None,
            form_autofill: None,
            form_data: None,
        }
    }
}

/// The aggregate view model: one routing decision plus zero or more agent
/// responses.
///
/// `agent_responses` may be empty (routing-only) or sparse (quick action);
/// consumers must not assume full coverage of `recommended_agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteCase {
    pub routing_decision: RoutingDecision,
    #[serde(default)]
    pub agent_responses: Vec<AgentResponse>,
}

impl CompleteCase {
    /// Pure merge of a routing decision with agent responses.
    ///
    /// Duplicate `agent_type` entries are not deduplicated; for lookups the
    /// last entry for a given type wins. Callers are responsible for not
    /// double-dispatching the same agent within one run.
    pub fn aggregate(decision: RoutingDecision, responses: Vec<AgentResponse>) -> Self {
        Self {
            routing_decision: decision,
            agent_responses: responses,
        }
    }

    /// Routing-only view with no agent output yet.
    pub fn routing_only(decision: RoutingDecision) -> Self {
        Self::aggregate(decision, Vec::new())
    }

    /// Last response for the given agent type, if any.
    pub fn response_for(&self, agent: AgentType) -> Option<&AgentResponse> {
        self.agent_responses
            .iter()
            .rev()
            .find(|r| r.agent_type == agent)
    }

    /// Derived display statistics, computed by reduction on demand.
    pub fn statistics(&self) -> CaseStatistics {
        CaseStatistics {
            recommended_agents: self.routing_decision.recommended_agents.len(),
            processed_agents: self.agent_responses.len(),
            total_recommendations: self
                .agent_responses
                .iter()
                .map(|r| r.recommendations.len())
                .sum(),
            total_next_steps: self.agent_responses.iter().map(|r| r.next_steps.len()).sum(),
        }
    }
}

/// Read-only reductions over a [`CompleteCase`], for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseStatistics {
    pub recommended_agents: usize,
    pub processed_agents: usize,
    pub total_recommendations: usize,
    pub total_next_steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(agent: AgentType, recommendations: &[&str], next_steps: &[&str]) -> AgentResponse {
        let mut r = AgentResponse::new(agent);
        r.recommendations = recommendations.iter().map(|s| s.to_string()).collect();
        r.next_steps = next_steps.iter().map(|s| s.to_string()).collect();
        r
    }

    #[test]
    fn quick_action_decision_uses_agent_profile() {
        let decision = RoutingDecision::quick_action("P1", AgentType::Nursing);
        assert_eq!(decision.recommended_agents, vec![AgentType::Nursing]);
        assert_eq!(decision.priority_score, 7);
        assert_eq!(decision.reasoning, "Direct nursing agent processing");
        assert_eq!(decision.estimated_timeline, "Within 24 hours");
    }

    #[test]
    fn statistics_sum_across_agents() {
        let decision = RoutingDecision::quick_action("P1", AgentType::Dme);
        let case = CompleteCase::aggregate(
            decision,
            vec![
                response(AgentType::Nursing, &["a", "b", "c"], &["s1"]),
                response(AgentType::Dme, &["d"], &["s2", "s3"]),
            ],
        );
        let stats = case.statistics();
        assert_eq!(stats.processed_agents, 2);
        assert_eq!(stats.total_recommendations, 4);
        assert_eq!(stats.total_next_steps, 3);
        assert_eq!(stats.recommended_agents, 1);
    }

    #[test]
    fn response_for_last_entry_wins() {
        let decision = RoutingDecision::quick_action("P1", AgentType::Dme);
        let case = CompleteCase::aggregate(
            decision,
            vec![
                response(AgentType::Dme, &["first"], &[]),
                response(AgentType::Dme, &["second"], &[]),
            ],
        );
        let latest = case.response_for(AgentType::Dme).unwrap();
        assert_eq!(latest.recommendations, vec!["second"]);
    }

    #[test]
    fn complete_case_deserializes_backend_shape() {
        let case: CompleteCase = serde_json::from_value(serde_json::json!({
            "routing_decision": {
                "patient_id": "P1",
                "recommended_agents": ["nursing", "dme"],
                "reasoning": "Needs equipment and home nursing",
                "priority_score": 8,
                "estimated_timeline": "24-48 hours"
            },
            "agent_responses": [{
                "agent_type": "nursing",
                "recommendations": ["Arrange skilled nursing visits"],
                "next_steps": ["Schedule first nursing visit within 24 hours of discharge"],
                "external_referrals": [],
                "form_data": {
                    "nurse_recommendations": {
                        "success": true,
                        "message": "Found 1 suitable nurse recommendations",
                        "recommendations": [{
                            "nurse": {"name": "A. Nurse", "agency": "HomeCare"},
                            "match_score": 95.0,
                            "rationale": "Cardiac specialty"
                        }]
                    },
                    "visit_frequency": "3x weekly"
                }
            }]
        }))
        .unwrap();

        assert_eq!(case.routing_decision.recommended_agents.len(), 2);
        let nursing = case.response_for(AgentType::Nursing).unwrap();
        let block = nursing
            .form_data
            .as_ref()
            .and_then(|f| f.nurse_recommendations.as_ref())
            .unwrap();
        assert!(block.success);
        assert_eq!(block.recommendations[0].match_score, 95.0);
        assert!(nursing
            .form_data
            .as_ref()
            .unwrap()
            .extra
            .contains_key("visit_frequency"));
    }
}
