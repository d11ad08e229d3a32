//! Agent identifiers and their static profiles.
//!
//! The backend exposes one specialized agent per discharge-planning domain.
//! [`AgentType`] is the shared identifier used for dispatch, response
//! keying, and order-form selection.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A specialized backend agent in the discharge-planning workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Home health nursing coordination
    Nursing,
    /// Durable medical equipment orders
    Dme,
    /// Pharmacy / home infusion coordination
    Pharmacy,
    /// Insurance authorization and state programs
    State,
}

/// Defaults used when a quick action synthesizes a routing decision locally.
///
/// These are configuration constants carried over from the deployed system;
/// they make no claim about how the real routing model scores cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickActionProfile {
    pub priority_score: u8,
    pub estimated_timeline: &'static str,
    pub reasoning: &'static str,
}

impl AgentType {
    /// All agent types, in display order.
    pub const ALL: [AgentType; 4] = [
        AgentType::Nursing,
        AgentType::Dme,
        AgentType::Pharmacy,
        AgentType::State,
    ];

    /// Wire identifier used in payloads and endpoint paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Nursing => "nursing",
            AgentType::Dme => "dme",
            AgentType::Pharmacy => "pharmacy",
            AgentType::State => "state",
        }
    }

    /// Human-readable name for console output.
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentType::Nursing => "Home Health Nursing",
            AgentType::Dme => "Durable Medical Equipment",
            AgentType::Pharmacy => "Pharmacy Coordination",
            AgentType::State => "Insurance & State Programs",
        }
    }

    /// Defaults for the locally synthesized routing decision of a quick action.
    pub fn quick_profile(&self) -> QuickActionProfile {
        match self {
            AgentType::Nursing => QuickActionProfile {
                priority_score: 7,
                estimated_timeline: "Within 24 hours",
                reasoning: "Direct nursing agent processing",
            },
            AgentType::Dme => QuickActionProfile {
                priority_score: 6,
                estimated_timeline: "Within 48 hours",
                reasoning: "Direct DME agent processing",
            },
            AgentType::Pharmacy => QuickActionProfile {
                priority_score: 6,
                estimated_timeline: "Within 24 hours",
                reasoning: "Direct pharmacy agent processing",
            },
            AgentType::State => QuickActionProfile {
                priority_score: 5,
                estimated_timeline: "Within 72 hours",
                reasoning: "Direct state agent processing",
            },
        }
    }

    /// Generic concern used when an order form requests autofill before the
    /// caregiver has articulated a specific concern.
    pub fn autofill_concern(&self) -> &'static str {
        match self {
            AgentType::Nursing => "Skilled nursing care needed for discharge planning",
            AgentType::Dme => "Equipment needed for discharge planning",
            AgentType::Pharmacy => "Medication coordination needed for discharge planning",
            AgentType::State => "Insurance authorization needed for discharge planning",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nursing" => Ok(AgentType::Nursing),
            "dme" => Ok(AgentType::Dme),
            "pharmacy" => Ok(AgentType::Pharmacy),
            "state" => Ok(AgentType::State),
            other => Err(DomainError::UnknownAgent(other.to_string())),
        }
    }
}
