//! CLI entry point for polman.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, printing and
//! exit codes. All business logic lives in the `polman-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use polman_app::{LibraryRequest, Outcome, Request};
use polman_settings::Overrides;
use polman_storage::StorageError;
use polman_types::ids::DEFAULT_CONFIG_FILE;
use std::process::ExitCode;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "polman",
    version,
    about = "Versioned policy management backed by a JSON store"
)]
struct Cli {
    /// Path to the policy store file (default: policies.json).
    #[arg(long, global = true)]
    store: Option<Utf8PathBuf>,

    /// Path to polman config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: Utf8PathBuf,

    /// Name recorded as the actor of every change made by this invocation.
    #[arg(long, global = true)]
    actor: Option<String>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new policy.
    Add {
        /// Unique policy identifier.
        policy_id: String,
        /// Policy title.
        title: String,
        /// Policy content.
        content: String,
        /// Home library (default: the configured default library).
        #[arg(long)]
        library: Option<String>,
        /// Owner of the policy.
        #[arg(long)]
        owner: Option<String>,
        /// Initial status (for example Draft or Approved).
        #[arg(long)]
        status: Option<String>,
    },

    /// Edit an existing policy, recording a new version.
    Edit {
        /// Policy identifier to edit.
        policy_id: String,
        /// New policy content.
        content: String,
        /// Replace the title as well.
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete a policy and drop it from every library.
    Delete {
        /// Policy identifier to delete.
        policy_id: String,
    },

    /// View policy details.
    View {
        /// Policy identifier to view.
        policy_id: String,
    },

    /// List all policies.
    List {
        /// Filter policies by home library.
        #[arg(long)]
        library: Option<String>,
    },

    /// Show version history for a policy.
    History {
        /// Policy identifier to inspect.
        policy_id: String,
    },

    /// Revert a policy to a previous version.
    Revert {
        /// Policy identifier to revert.
        policy_id: String,
        /// One-based version number to restore (a new version will be recorded).
        #[arg(allow_negative_numbers = true)]
        version_number: i64,
    },

    /// Show counts of policies per library.
    Stats,

    /// Mark a policy as reviewed now.
    Review {
        /// Policy identifier to review.
        policy_id: String,
    },

    /// Change the owner of a policy.
    Owner {
        policy_id: String,
        owner: String,
    },

    /// Change the status of a policy.
    Status {
        policy_id: String,
        status: String,
    },

    /// Report stale policies and missing change metadata.
    Scan {
        /// Staleness threshold in days (default: config `staleness_days`, else 180).
        #[arg(long)]
        days: Option<u32>,
        /// Evaluate as of this RFC 3339 instant instead of now.
        #[arg(long, value_parser = parse_rfc3339)]
        as_of: Option<OffsetDateTime>,
    },

    /// Manage named policy libraries.
    #[command(subcommand)]
    Library(LibraryCommands),
}

#[derive(Subcommand, Debug)]
enum LibraryCommands {
    /// Create an empty library.
    Create { library_id: String },
    /// Delete a library (its policies are kept).
    Delete { library_id: String },
    /// Add a policy to a library.
    Add { library_id: String, policy_id: String },
    /// Remove a policy from a library.
    Remove { library_id: String, policy_id: String },
    /// Show the policies in a library.
    Show { library_id: String },
    /// List libraries with their sizes.
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "polman starting");

    match run(cli) {
        Ok(outcome) => {
            print!("{}", outcome.stdout);
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Store rejections (unknown id, duplicate, bad version) are user errors: print as-is.
            match err
                .downcast_ref::<StorageError>()
                .and_then(StorageError::as_policy_error)
            {
                Some(policy_err) => eprintln!("{policy_err}"),
                None => eprintln!("polman error: {err:#}"),
            }
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let config_text = read_config(&cli.config)?;
    let staleness_days = match &cli.cmd {
        Commands::Scan { days, .. } => *days,
        _ => None,
    };
    let overrides = Overrides {
        store: cli.store,
        actor: cli.actor,
        staleness_days,
    };
    let cfg = polman_app::load_config(&config_text, overrides)?;
    let mut store = polman_app::open_store(&cfg)?;

    let request = to_request(cli.cmd);
    let outcome = polman_app::execute(&mut store, &cfg, request, OffsetDateTime::now_utc())?;
    Ok(outcome)
}

fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("read config {path}")),
    }
}

fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| format!("invalid RFC 3339 time: {e}"))
}

fn to_request(cmd: Commands) -> Request {
    match cmd {
        Commands::Add {
            policy_id,
            title,
            content,
            library,
            owner,
            status,
        } => Request::Add {
            policy_id,
            title,
            content,
            library,
            owner,
            status,
        },
        Commands::Edit {
            policy_id,
            content,
            title,
        } => Request::Edit {
            policy_id,
            content,
            title,
        },
        Commands::Delete { policy_id } => Request::Delete { policy_id },
        Commands::View { policy_id } => Request::View { policy_id },
        Commands::List { library } => Request::List { library },
        Commands::History { policy_id } => Request::History { policy_id },
        Commands::Revert {
            policy_id,
            version_number,
        } => Request::Revert {
            policy_id,
            version_number,
        },
        Commands::Stats => Request::Stats,
        Commands::Review { policy_id } => Request::Review { policy_id },
        Commands::Owner { policy_id, owner } => Request::Owner { policy_id, owner },
        Commands::Status { policy_id, status } => Request::Status { policy_id, status },
        Commands::Scan { as_of, .. } => Request::Scan { as_of },
        Commands::Library(cmd) => Request::Library(match cmd {
            LibraryCommands::Create { library_id } => LibraryRequest::Create { library_id },
            LibraryCommands::Delete { library_id } => LibraryRequest::Delete { library_id },
            LibraryCommands::Add {
                library_id,
                policy_id,
            } => LibraryRequest::Add {
                library_id,
                policy_id,
            },
            LibraryCommands::Remove {
                library_id,
                policy_id,
            } => LibraryRequest::Remove {
                library_id,
                policy_id,
            },
            LibraryCommands::Show { library_id } => LibraryRequest::Show { library_id },
            LibraryCommands::List => LibraryRequest::List,
        }),
    }
}
