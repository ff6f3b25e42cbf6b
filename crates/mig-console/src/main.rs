//! MIG Console - interactive reader for MIG actions
//!
//! ## Commands
//!
//! - `action <id>`: enter action reader mode
//! - `command <id>`: print one command
//! - `shell`: top-level prompt (default)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mig_client::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use mig_client::{ApiConfig, MigClient};
use mig_console::{
    init_tracing, level_from_verbosity, open_lines, run_shell, ActionSession, CommandInspector,
    CommandReader, LineSource,
};

#[derive(Parser)]
#[command(name = "mig-console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive reader for MIG actions and commands", long_about = None)]
struct Cli {
    /// Base URL of the MIG API
    #[arg(long, global = true, env = "MIG_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "MIG_API_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Read orders from a file instead of the terminal
    #[arg(long, global = true)]
    script: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter action reader mode for an action
    Action {
        /// Action ID
        id: u64,
    },

    /// Show one command
    Command {
        /// Command ID
        id: u64,
    },

    /// Top-level interactive prompt
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.json, level_from_verbosity(cli.verbose));

    let config = ApiConfig::new(&cli.api_url).with_timeout(cli.timeout);
    let client = MigClient::http(config).context("Failed to set up MIG API client")?;

    let mut out = std::io::stdout();
    let commands = CommandInspector;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Action { id } => {
            let mut lines = open_script_or_editor(cli.script.as_deref())?;
            let mut session = ActionSession::open(client, id)
                .await
                .with_context(|| format!("actionReader() -> failed to load action {id}"))?;
            session
                .run(lines.as_mut(), &commands, &mut out)
                .await
                .context("actionReader()")?;
        }
        Commands::Command { id } => {
            commands
                .enter(&format!("command {id}"), &client, &mut out)
                .await
                .context("commandReader()")?;
        }
        Commands::Shell => {
            let mut lines = open_script_or_editor(cli.script.as_deref())?;
            run_shell(&client, lines.as_mut(), &commands, &mut out).await?;
        }
    }

    Ok(())
}

fn open_script_or_editor(script: Option<&Path>) -> Result<Box<dyn LineSource>> {
    open_lines(script).with_context(|| match script {
        Some(path) => format!("Failed to read script {:?}", path),
        None => "Failed to start line editor".to_string(),
    })
}
