//! Progress reporting for case processing

use careroute_application::CaseProgress;
use careroute_domain::{AgentType, RoutingDecision};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Shows per-agent processing status with a spinner.
pub struct AgentProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl AgentProgress {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(message);
        pb
    }
}

impl Default for AgentProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseProgress for AgentProgress {
    fn routing_started(&self) {
        let pb = Self::spinner("Routing case...".to_string());
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn routing_completed(&self, decision: &RoutingDecision) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            let agents = decision
                .recommended_agents
                .iter()
                .map(|a| a.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            pb.finish_with_message(format!("{} Routed to: {}", "v".green(), agents));
        }
    }

    fn agent_started(&self, agent: AgentType) {
        let pb = Self::spinner(format!("Processing {}...", agent.display_name()));
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn agent_completed(&self, agent: AgentType) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} {}", "v".green(), agent.display_name()));
        } else {
            println!("  {} {}", "v".green(), agent.display_name());
        }
    }

    fn agent_failed(&self, agent: AgentType, message: &str) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message(format!(
                "{} {} ({})",
                "x".red(),
                agent.display_name(),
                message
            ));
        } else {
            println!("  {} {} ({})", "x".red(), agent.display_name(), message);
        }
    }
}
