//! `login` / `whoami` commands.

use anyhow::Result;
use clap::Args;
use leadflow_ids::UserId;

use crate::cli::config::{self, CliConfig, UserConfig};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Existing user id. Omit to mint a fresh one.
    #[arg(long)]
    pub user_id: Option<String>,

    /// Email shown on memberships
    #[arg(long)]
    pub email: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run_login(args: LoginArgs) -> Result<()> {
    let id = match args.user_id {
        Some(raw) => UserId::parse(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid --user-id: {}", e))?,
        None => UserId::new(),
    };

    let mut cfg = config::load().unwrap_or_else(|_| CliConfig::default());
    cfg.user = Some(UserConfig {
        id: id.to_string(),
        email: args.email,
        display_name: args.name,
    });
    config::store(&cfg)?;

    println!("Signed in as {}", id);
    Ok(())
}

pub fn run_whoami() -> Result<()> {
    match config::current_identity()? {
        Some(user) => {
            let label = user
                .display_name
                .or(user.email)
                .unwrap_or_else(|| "unnamed".to_string());
            println!("{} ({})", label, user.id);
        }
        None => {
            println!("Not signed in. Run: leadflow login");
        }
    }
    Ok(())
}
