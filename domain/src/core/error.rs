//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown agent type: {0}")]
    UnknownAgent(String),

    #[error("Invalid urgency level: {0}")]
    InvalidUrgency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_agent_display() {
        let error = DomainError::UnknownAgent("billing".to_string());
        assert_eq!(error.to_string(), "Unknown agent type: billing");
    }
}
