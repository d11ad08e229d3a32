//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for careroute
#[derive(Parser, Debug)]
#[command(name = "careroute")]
#[command(author, version, about = "Discharge planning orchestration client")]
#[command(long_about = r#"
Careroute coordinates the multi-step discharge-planning workflow against
the discharge backend: routing decisions, specialized agent dispatch
(nursing, DME, pharmacy, state), and agent-specific order forms with
autofill.

Configuration files are loaded from (in priority order):
1. CAREROUTE_* environment variables
2. --config <path>     Explicit config file
3. ./careroute.toml    Project-level config
4. ~/.config/careroute/config.toml   Global config

Example:
  careroute patients
  careroute route --patient PT-2847 --concern "needs a hospital bed at home"
  careroute quick dme --patient PT-2847
  careroute form dme --patient PT-2847 --set quantity=2 --submit
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

/// Shared caregiver-entry flags for the routing commands.
#[derive(Args, Debug)]
pub struct CaseArgs {
    /// Patient ID from the roster
    #[arg(long, value_name = "ID")]
    pub patient: String,

    /// Primary concern, free text
    #[arg(long, value_name = "TEXT")]
    pub concern: String,

    /// Urgency: low, medium, or high
    #[arg(long, value_name = "LEVEL", default_value = "medium")]
    pub urgency: String,

    /// Requested services, comma-separated
    #[arg(long, value_name = "CSV")]
    pub services: Option<String>,

    /// Additional notes
    #[arg(long, value_name = "TEXT")]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the patient roster
    Patients,

    /// Show data-source status
    Status,

    /// Get a routing decision without dispatching any agent
    Route {
        #[command(flatten)]
        case: CaseArgs,
    },

    /// Process the complete case: routing plus full agent fan-out
    Process {
        #[command(flatten)]
        case: CaseArgs,
    },

    /// Dispatch a single agent directly, skipping the routing service
    Quick {
        /// Agent: nursing, dme, pharmacy, or state
        agent: String,

        /// Patient ID from the roster
        #[arg(long, value_name = "ID")]
        patient: String,

        /// Primary concern (a default is substituted when omitted)
        #[arg(long, value_name = "TEXT")]
        concern: Option<String>,
    },

    /// Mount an agent order form, apply overrides, optionally submit
    Form {
        /// Agent: nursing, dme, pharmacy, or state
        agent: String,

        /// Patient ID from the roster
        #[arg(long, value_name = "ID")]
        patient: String,

        /// Primary concern override
        #[arg(long, value_name = "TEXT")]
        concern: Option<String>,

        /// Field override, `name=value` (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Submit the form after applying overrides
        #[arg(long)]
        submit: bool,
    },

    /// Data-source management
    #[command(subcommand)]
    Data(DataCommand),
}

#[derive(Subcommand, Debug)]
pub enum DataCommand {
    /// List loadable source files
    Files,

    /// Load a specific source file
    Load {
        /// Filename as reported by `data files`
        filename: String,
    },

    /// Re-read the current data source
    Refresh,

    /// Point the data service at a different directory
    SetDir {
        /// Absolute path on the data-service host
        path: String,
    },
}
