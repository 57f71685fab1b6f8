//! CLI configuration: the signed-in identity and database location.
//!
//! Identity is stored in `$LEADFLOW_HOME/config.toml`. Auth proper is an
//! external collaborator; this file only mirrors who is signed in on this
//! machine so `getCurrentUser` has an answer.

use anyhow::{Context, Result};
use leadflow_core::UserIdentity;
use leadflow_ids::UserId;
use std::path::PathBuf;

/// Persisted CLI configuration.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub user: Option<UserConfig>,
}

/// The signed-in user.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserConfig {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

fn config_file_path() -> Result<PathBuf> {
    Ok(leadflow_logging::leadflow_home()?.join("config.toml"))
}

/// Database location: `$LEADFLOW_HOME/leadflow.sqlite3`.
pub fn db_path() -> Result<PathBuf> {
    Ok(leadflow_logging::leadflow_home()?.join("leadflow.sqlite3"))
}

/// Load the configuration, defaulting when the file does not exist.
pub fn load() -> Result<CliConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file {}. Delete this file to reset.",
            path.display()
        )
    })
}

/// Write the configuration back.
pub fn store(config: &CliConfig) -> Result<()> {
    let path = config_file_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// The configured identity, or `None` when nobody is signed in.
pub fn current_identity() -> Result<Option<UserIdentity>> {
    let config = load()?;
    let Some(user) = config.user else {
        return Ok(None);
    };
    let id = UserId::parse(&user.id)
        .with_context(|| format!("Configured user id '{}' is not a valid id", user.id))?;
    Ok(Some(UserIdentity {
        id,
        email: user.email,
        display_name: user.display_name,
    }))
}
