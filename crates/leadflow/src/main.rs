//! Leadflow CRM launcher.
//!
//! Thin CLI over the session and data layers: sign in, pick a workspace,
//! capture and move leads, and read the pipeline dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use leadflow_logging::{init_logging, LogConfig};

mod cli;

#[derive(Parser, Debug)]
#[command(name = "leadflow", about = "Multi-tenant CRM: leads, pipeline, scoring")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record the signed-in user for this machine
    Login(cli::auth::LoginArgs),
    /// Show the signed-in user
    Whoami,
    /// Manage workspaces and the active selection
    Workspace {
        #[command(subcommand)]
        action: cli::workspace::WorkspaceAction,
    },
    /// Capture, list, move and score leads
    Lead {
        #[command(subcommand)]
        action: cli::lead::LeadAction,
    },
    /// Pipeline counts for the active workspace
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let _log_guard = init_logging(LogConfig {
        app_name: "leadflow",
        verbose: args.verbose,
    })?;

    match args.command {
        Commands::Login(login) => cli::auth::run_login(login),
        Commands::Whoami => cli::auth::run_whoami(),
        Commands::Workspace { action } => cli::workspace::run(action).await,
        Commands::Lead { action } => cli::lead::run(action).await,
        Commands::Dashboard => cli::dashboard::run().await,
    }
}
