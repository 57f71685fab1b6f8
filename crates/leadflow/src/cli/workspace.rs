//! Workspace CLI commands: list, create, switch.

use anyhow::Result;
use clap::Subcommand;
use leadflow_core::Workspace;
use leadflow_session::WorkspaceSession;

#[derive(Subcommand, Debug, Clone)]
pub enum WorkspaceAction {
    /// List available workspaces (newest first)
    List,
    /// Create a new workspace and set it active
    Create {
        /// Workspace name
        name: String,
    },
    /// Set the active workspace (by id, slug or name). Omit to show current.
    Switch {
        workspace: Option<String>,
    },
}

pub async fn run(action: WorkspaceAction) -> Result<()> {
    match action {
        WorkspaceAction::List => list_workspaces().await,
        WorkspaceAction::Create { name } => create_workspace(&name).await,
        WorkspaceAction::Switch { workspace } => switch_workspace(workspace.as_deref()).await,
    }
}

async fn list_workspaces() -> Result<()> {
    let (_, session) = crate::cli::resolve_session().await?;

    if session.workspaces().is_empty() {
        println!("No workspaces found.");
        println!("Create one with: leadflow workspace create <name>");
        return Ok(());
    }

    let active_id = session.active().map(|w| w.id.clone());
    println!("WORKSPACES");
    for workspace in session.workspaces() {
        let marker = if Some(&workspace.id) == active_id.as_ref() {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} [{}] ({})",
            marker, workspace.name, workspace.slug, workspace.id
        );
    }

    Ok(())
}

async fn create_workspace(name: &str) -> Result<()> {
    let (_, mut session) = crate::cli::resolve_session().await?;

    let workspace = session.create_and_select(name).await?;
    println!(
        "Created workspace '{}' [{}] ({})",
        workspace.name, workspace.slug, workspace.id
    );
    println!("Active workspace set to '{}'", workspace.name);
    Ok(())
}

async fn switch_workspace(workspace_ref: Option<&str>) -> Result<()> {
    let (_, mut session) = crate::cli::resolve_session().await?;

    let Some(workspace_ref) = workspace_ref else {
        match session.active() {
            Some(workspace) => {
                println!("Active workspace: '{}' ({})", workspace.name, workspace.id)
            }
            None => println!("No active workspace. Use `leadflow workspace switch <id|slug>`."),
        }
        return Ok(());
    };

    let workspace = resolve_workspace_ref(&session, workspace_ref)?.clone();
    session.switch(&workspace.id)?;
    println!(
        "Active workspace set to '{}' ({})",
        workspace.name, workspace.id
    );
    Ok(())
}

/// Match a user-supplied reference against id, slug, then name.
fn resolve_workspace_ref<'a>(
    session: &'a WorkspaceSession,
    reference: &str,
) -> Result<&'a Workspace> {
    session
        .workspaces()
        .iter()
        .find(|w| w.id.as_str() == reference || w.slug == reference || w.name == reference)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No workspace matches '{}'. Run `leadflow workspace list` to see yours.",
                reference
            )
        })
}
