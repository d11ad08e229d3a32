//! CLI entrypoint for careroute
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod progress;
mod render;

use anyhow::{anyhow, bail, Result};
use careroute_application::{
    CaseProgress, CaseRequestBuilder, NoProgress, OrderFormController, PatientDirectory,
    QuickActionUseCase, RouteCaseUseCase,
};
use careroute_domain::{
    AgentType, CaregiverInputDraft, CaseRequest, CompleteCase, FieldError, OrderFormHandoff,
    PatientData, RoutingDecision, Session, UrgencyLevel,
};
use careroute_infrastructure::{
    ApiClient, ConfigLoader, HttpDischargeGateway, HttpPatientDirectory,
};
use clap::Parser;
use commands::{CaseArgs, Cli, Command, DataCommand};
use progress::AgentProgress;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!(e))?
    };

    // Demo sign-in: credentials may be supplied as `user:password` in
    // CAREROUTE_LOGIN; otherwise the configured demo account signs in.
    // The session is issued locally and checked before any command runs.
    let subject = match std::env::var("CAREROUTE_LOGIN") {
        Ok(login) => {
            let (user, password) = login
                .split_once(':')
                .ok_or_else(|| anyhow!("CAREROUTE_LOGIN must be user:password"))?;
            if !config.auth.verify(user, password) {
                bail!("invalid credentials for '{user}'");
            }
            user.to_string()
        }
        Err(_) => config.auth.username.clone(),
    };
    let session = Session::issue(subject, config.session.ttl_secs);
    if session.is_expired() {
        bail!("session expired; sign in again");
    }
    info!(
        subject = %session.subject,
        expires_at = %session.expires_at(),
        "session issued"
    );

    // === Dependency Injection ===
    let client = ApiClient::new(&config.api)?;
    let gateway = Arc::new(HttpDischargeGateway::new(client.clone()));
    let directory = HttpPatientDirectory::new(client);

    let progress: Box<dyn CaseProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(AgentProgress::new())
    };

    match cli.command {
        Command::Patients => {
            let patients = directory.patients().await?;
            print!("{}", render::patients(&patients));
        }
        Command::Status => {
            let status = directory.data_status().await?;
            print!("{}", render::data_status(&status));
        }
        Command::Route { case } => {
            let patient = find_patient(&directory, &case.patient).await?;
            let request = build_request(&patient, &case)?;
            let use_case = RouteCaseUseCase::new(gateway);
            let decision = use_case
                .route_only(&request, &CancellationToken::new())
                .await?;
            print!("{}", render::routing_decision(&decision));
        }
        Command::Process { case } => {
            let patient = find_patient(&directory, &case.patient).await?;
            let request = build_request(&patient, &case)?;
            let use_case = RouteCaseUseCase::new(gateway);
            let complete = use_case
                .process_complete(&request, &CancellationToken::new(), progress.as_ref())
                .await?;
            print!("{}", render::complete_case(&complete));
        }
        Command::Quick {
            agent,
            patient,
            concern,
        } => {
            let agent: AgentType = agent.parse()?;
            let patient = find_patient(&directory, &patient).await?;
            let draft = CaregiverInputDraft::new(concern.unwrap_or_default());
            let use_case = QuickActionUseCase::new(gateway);
            let complete = use_case
                .execute(
                    agent,
                    &patient,
                    &draft,
                    &CancellationToken::new(),
                    progress.as_ref(),
                )
                .await?;
            print!("{}", render::complete_case(&complete));
        }
        Command::Form {
            agent,
            patient,
            concern,
            set,
            submit,
        } => {
            let agent: AgentType = agent.parse()?;
            let patient = find_patient(&directory, &patient).await?;
            run_form(gateway, agent, patient, concern, &set, submit).await?;
        }
        Command::Data(data) => run_data(&directory, data).await?,
    }

    Ok(())
}

/// Look a patient up in the roster by ID.
async fn find_patient(directory: &HttpPatientDirectory, id: &str) -> Result<PatientData> {
    let patients = directory.patients().await?;
    patients
        .into_iter()
        .find(|p| p.patient_id == id)
        .ok_or_else(|| anyhow!("patient '{id}' not found in the roster"))
}

/// Build the canonical case request from the shared routing flags.
fn build_request(patient: &PatientData, case: &CaseArgs) -> Result<CaseRequest> {
    let urgency: UrgencyLevel = case.urgency.parse()?;
    let mut draft = CaregiverInputDraft::new(&case.concern).with_urgency(urgency);
    if let Some(services) = &case.services {
        draft = draft.with_services(services);
    }
    if let Some(notes) = &case.notes {
        draft = draft.with_notes(notes);
    }
    CaseRequestBuilder::build(patient, &draft).map_err(|errors| anyhow!(join_errors(&errors)))
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Mount an order form, apply overrides, optionally submit, and render it.
async fn run_form(
    gateway: Arc<HttpDischargeGateway>,
    agent: AgentType,
    patient: PatientData,
    concern: Option<String>,
    set: &[String],
    submit: bool,
) -> Result<()> {
    let decision = RoutingDecision::quick_action(&patient.patient_id, agent);
    let handoff = OrderFormHandoff::new(CompleteCase::routing_only(decision), patient);
    let mut form = OrderFormController::mount(gateway, agent, &handoff);

    if form.needs_autofill() {
        form.refresh().await;
    }

    if let Some(concern) = concern {
        form.edit("concern", concern)?;
    }
    for pair in set {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{pair}'"))?;
        form.edit(field, value)?;
    }

    if submit {
        use careroute_application::SubmitOutcome;
        match form.submit().await? {
            SubmitOutcome::Submitted => println!("Form submitted."),
            SubmitOutcome::AlreadySubmitted => println!("Form was already submitted."),
            SubmitOutcome::Failed(message) => println!("Submission failed: {message}"),
            SubmitOutcome::Cancelled => println!("Submission cancelled."),
        }
    }

    print!("{}", render::form(form.state()));
    Ok(())
}

async fn run_data(directory: &HttpPatientDirectory, command: DataCommand) -> Result<()> {
    match command {
        DataCommand::Files => {
            let files = directory.available_files().await?;
            print!("{}", render::files(&files));
        }
        DataCommand::Load { filename } => {
            let report = directory.load_file(&filename).await?;
            print_report(&report.message, report.patient_count);
        }
        DataCommand::Refresh => {
            let report = directory.refresh_data().await?;
            print_report(&report.message, report.patient_count);
        }
        DataCommand::SetDir { path } => {
            let report = directory.set_data_directory(&path).await?;
            print_report(&report.message, report.patient_count);
        }
    }
    Ok(())
}

fn print_report(message: &str, patient_count: Option<u64>) {
    match patient_count {
        Some(count) => println!("{message} ({count} patients)"),
        None => println!("{message}"),
    }
}
