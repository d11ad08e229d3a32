//! Colored console rendering for workflow results

use careroute_application::ports::patient_directory::{DataStatus, FileInfo};
use careroute_domain::{
    AgentResponse, CompleteCase, OrderFormState, PatientData, RoutingDecision,
};
use colored::Colorize;

pub fn patients(patients: &[PatientData]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({} patients)\n",
        "Patient roster".bold(),
        patients.len()
    ));
    for patient in patients {
        out.push_str(&format!(
            "  {}  {}  {}\n",
            patient.patient_id.cyan(),
            patient.name,
            patient.primary_diagnosis.dimmed()
        ));
    }
    out
}

pub fn data_status(status: &DataStatus) -> String {
    format!(
        "{}\n  Status:    {}\n  Directory: {}\n  Patients:  {}\n  Files:     {}\n",
        "Data source".bold(),
        status.status,
        status.data_directory,
        status.total_patients,
        status.available_files.len()
    )
}

pub fn files(files: &[FileInfo]) -> String {
    let mut out = format!("{} ({} files)\n", "Available files".bold(), files.len());
    for file in files {
        out.push_str(&format!("  {}", file.filename.cyan()));
        if !file.modified.is_empty() {
            out.push_str(&format!("  {}", file.modified.dimmed()));
        }
        out.push('\n');
    }
    out
}

pub fn routing_decision(decision: &RoutingDecision) -> String {
    let agents = decision
        .recommended_agents
        .iter()
        .map(|a| a.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}\n  Patient:   {}\n  Agents:    {}\n  Priority:  {}\n  Timeline:  {}\n  Reasoning: {}\n",
        "Routing decision".bold(),
        decision.patient_id,
        agents.cyan(),
        decision.priority_score,
        decision.estimated_timeline,
        decision.reasoning
    )
}

fn agent_response(response: &AgentResponse) -> String {
    let mut out = format!("\n{}\n", response.agent_type.display_name().bold().cyan());
    if let Some(priority) = &response.priority_level {
        out.push_str(&format!("  Priority: {priority}\n"));
    }
    if let Some(eta) = &response.estimated_completion_time {
        out.push_str(&format!("  Estimated completion: {eta}\n"));
    }
    if !response.recommendations.is_empty() {
        out.push_str(&format!("  {}\n", "Recommendations:".bold()));
        for item in &response.recommendations {
            out.push_str(&format!("    - {item}\n"));
        }
    }
    if !response.next_steps.is_empty() {
        out.push_str(&format!("  {}\n", "Next steps:".bold()));
        for item in &response.next_steps {
            out.push_str(&format!("    - {item}\n"));
        }
    }
    if !response.external_referrals.is_empty() {
        out.push_str(&format!("  {}\n", "External referrals:".bold()));
        for item in &response.external_referrals {
            out.push_str(&format!("    - {item}\n"));
        }
    }
    if let Some(block) = response
        .form_data
        .as_ref()
        .and_then(|f| f.nurse_recommendations.as_ref())
    {
        out.push_str(&format!("  {}\n", "Nurse candidates:".bold()));
        for candidate in &block.recommendations {
            let name = candidate
                .nurse
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("(unnamed)");
            out.push_str(&format!(
                "    - {} (match {:.0}%)",
                name, candidate.match_score
            ));
            if !candidate.rationale.is_empty() {
                out.push_str(&format!(" - {}", candidate.rationale.dimmed()));
            }
            out.push('\n');
        }
    }
    out
}

pub fn complete_case(case: &CompleteCase) -> String {
    let mut out = routing_decision(&case.routing_decision);
    for response in &case.agent_responses {
        out.push_str(&agent_response(response));
    }
    let stats = case.statistics();
    out.push_str(&format!(
        "\n{}\n  Agents recommended: {}\n  Agents processed:   {}\n  Recommendations:    {}\n  Next steps:         {}\n",
        "Summary".bold(),
        stats.recommended_agents,
        stats.processed_agents,
        stats.total_recommendations,
        stats.total_next_steps
    ));
    out
}

pub fn form(state: &OrderFormState) -> String {
    let mut out = format!(
        "{} ({})\n  Phase:  {}\n  Source: {:?}\n",
        format!("{} order form", state.agent().display_name()).bold(),
        state.agent(),
        state.phase().to_string().cyan(),
        state.source()
    );
    if let Some(message) = state.message() {
        out.push_str(&format!("  {} {}\n", "Message:".bold(), message.yellow()));
    }
    out.push_str(&format!("  {}\n", "Fields:".bold()));
    for (name, value) in state.fields() {
        out.push_str(&format!("    {name}: {value}\n"));
    }
    out
}
