//! CLI entry point for taskdesk.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use taskdesk_app::AppConfig;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt::format::FmtSpan};

mod commands;

/// CRM task desk over an in-memory store.
#[derive(Parser, Debug)]
#[command(
    name = "taskdesk",
    version,
    about = "taskdesk: CRM tasks in an in-memory store with simulated latency"
)]
struct Cli {
    /// Configuration file (defaults to $TASKDESK_CONFIG, then the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

/// Optional task fields shared by `new` and `edit`.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
struct FieldArgs {
    #[arg(long)]
    description: Option<String>,
    /// pending, in-progress or completed.
    #[arg(long)]
    status: Option<String>,
    /// low, medium or high.
    #[arg(long)]
    priority: Option<String>,
    /// Due date as YYYY-MM-DD; an empty value clears it.
    #[arg(long)]
    due: Option<String>,
    #[arg(long)]
    assignee: Option<String>,
    /// Contact id; an empty value clears it.
    #[arg(long)]
    contact: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks, optionally filtered.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },

    /// Print one task as JSON.
    Show {
        #[arg(long)]
        task: String,
    },

    /// Print the tasks linked to a contact as JSON.
    ByContact {
        #[arg(long)]
        contact: String,
    },

    /// Create a task through the task form.
    New {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit a task through the task form; omitted flags keep current values.
    Edit {
        #[arg(long)]
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a task.
    Delete {
        #[arg(long)]
        task: String,
    },
}

fn main() -> Result<()> {
    let Cli { config, cmd } = Cli::parse();
    install_tracing();

    let config = AppConfig::load(config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");
    tokio::runtime::Runtime::new()?.block_on(commands::run(cmd, &config))
}

fn install_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&directives))
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

/// INFO unless `directives` (the `RUST_LOG` value) says otherwise.
fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}
