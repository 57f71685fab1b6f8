//! CLI module for Leadflow.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod lead;
pub mod workspace;

use anyhow::{Context, Result};
use leadflow_db::{CrmDb, CrmDirectory};
use leadflow_session::{CookieJar, FileSelectionStore, WorkspaceSession};
use std::sync::Arc;

/// Open the database, bind the configured identity, and build the
/// per-invocation session. The caller decides whether to initialize.
pub(crate) async fn open_session() -> Result<(Arc<CrmDirectory>, WorkspaceSession)> {
    let identity = config::current_identity()?;

    let db = CrmDb::open(config::db_path()?)
        .await
        .context("Failed to open the Leadflow database")?;

    if let Some(ref user) = identity {
        db.upsert_user(user)
            .await
            .context("Failed to record the signed-in user")?;
    }

    let directory = Arc::new(CrmDirectory::new(db, identity));
    let store = Arc::new(FileSelectionStore::new(FileSelectionStore::default_path()?));
    let cookies = Arc::new(CookieJar::new());
    let session = WorkspaceSession::new(directory.clone(), store, cookies);

    Ok((directory, session))
}

/// Initialize the session, translating the unauthenticated case into a
/// sign-in hint.
pub(crate) async fn resolve_session() -> Result<(Arc<CrmDirectory>, WorkspaceSession)> {
    let (directory, mut session) = open_session().await?;
    match session.initialize().await {
        Ok(()) => {
            if let Some(active) = session.active() {
                tracing::debug!(workspace = %active.id, "Session resolved");
            }
            Ok((directory, session))
        }
        Err(leadflow_session::SessionError::Unauthenticated) => {
            anyhow::bail!("No user is signed in. Run: leadflow login --user-id <id>")
        }
        Err(err) => Err(err).context("Failed to resolve the active workspace"),
    }
}
