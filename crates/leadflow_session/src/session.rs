//! The workspace resolution state machine.
//!
//! Lifecycle: `Uninitialized` -> `Loading` -> `Resolved`, where resolved
//! holds either an active workspace plus the fetched membership list, or
//! no selection and an empty list. One instance exists per session; it is
//! torn down with the session. Operations are awaited by the caller in
//! event order - rapid repeated invocations are not debounced, the last
//! completed write wins.

use std::sync::Arc;

use leadflow_core::{
    unique_slug, DataAccessError, Role, UserIdentity, Workspace, WorkspaceDirectory,
};
use leadflow_ids::WorkspaceId;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cookie::CookieSink;
use crate::store::SelectionStore;

/// Resolution state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Loading,
    Resolved,
}

/// Errors surfaced by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No authenticated user; the caller must gate resolution.
    #[error("no user is signed in")]
    Unauthenticated,

    /// Switch target is not in the current membership list.
    #[error("not a member of workspace {0}")]
    NotAMember(WorkspaceId),

    #[error(transparent)]
    Data(#[from] DataAccessError),
}

/// Per-session active-workspace state.
///
/// The active workspace, when set, is always a member of the most recently
/// fetched list, and the in-memory selection never diverges from the two
/// persisted sinks through this type's own operations.
pub struct WorkspaceSession {
    directory: Arc<dyn WorkspaceDirectory>,
    store: Arc<dyn SelectionStore>,
    cookies: Arc<dyn CookieSink>,
    status: SessionStatus,
    workspaces: Vec<Workspace>,
    active: Option<Workspace>,
    changes: watch::Sender<Option<WorkspaceId>>,
}

impl WorkspaceSession {
    pub fn new(
        directory: Arc<dyn WorkspaceDirectory>,
        store: Arc<dyn SelectionStore>,
        cookies: Arc<dyn CookieSink>,
    ) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            directory,
            store,
            cookies,
            status: SessionStatus::Uninitialized,
            workspaces: Vec::new(),
            active: None,
            changes,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The most recently fetched membership list, newest first.
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.active.as_ref()
    }

    /// Observe selection changes. Workspace-scoped views re-query their
    /// data whenever the received id changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<WorkspaceId>> {
        self.changes.subscribe()
    }

    /// Resolve the session: fetch the membership list and pick the active
    /// workspace. A previously persisted selection wins when still valid;
    /// otherwise the newest workspace is selected and persisted; an empty
    /// list resolves to no selection.
    ///
    /// On fetch failure the session ends `Resolved` with no selection and
    /// an empty list, and the error is returned for the caller to surface.
    /// There is no automatic retry - re-invoking is the retry.
    pub async fn initialize(&mut self) -> Result<(), SessionError> {
        self.status = SessionStatus::Loading;

        let user = match self.directory.current_user().await {
            Ok(user) => user,
            Err(err) => {
                self.fail_resolution();
                return Err(err.into());
            }
        };
        if user.is_none() {
            self.fail_resolution();
            return Err(SessionError::Unauthenticated);
        }

        let list = match self.directory.workspaces_for_current_user().await {
            Ok(list) => list,
            Err(err) => {
                self.fail_resolution();
                return Err(err.into());
            }
        };

        // Reads prefer the durable store; the cookie covers server-rendered
        // paths where the store is unavailable.
        let persisted = self
            .store
            .load()
            .unwrap_or_default()
            .or_else(|| self.cookies.get());

        let selected = persisted
            .as_deref()
            .and_then(|id| list.iter().find(|w| w.id.as_str() == id))
            .or_else(|| list.first())
            .cloned();

        if let Some(ref workspace) = selected {
            debug!(workspace = %workspace.id, "Resolved active workspace");
        }

        self.workspaces = list;
        self.status = SessionStatus::Resolved;
        self.apply_selection(selected)?;
        Ok(())
    }

    /// Make a workspace from the current membership list active.
    pub fn switch(&mut self, id: &WorkspaceId) -> Result<(), SessionError> {
        let workspace = self
            .workspaces
            .iter()
            .find(|w| &w.id == id)
            .cloned()
            .ok_or_else(|| SessionError::NotAMember(id.clone()))?;
        self.apply_selection(Some(workspace))?;
        Ok(())
    }

    /// Create a workspace owned by the current user, grant them the
    /// "owner" membership, refresh the list and switch to it.
    ///
    /// If the membership insert fails, the just-created workspace is
    /// deleted again (best effort) rather than left orphaned.
    pub async fn create_and_select(&mut self, name: &str) -> Result<Workspace, SessionError> {
        let user = self.require_user().await?;
        let slug = unique_slug(name);

        let workspace = self.directory.create_workspace(name, &slug, &user.id).await?;

        if let Err(err) = self
            .directory
            .create_membership(&workspace.id, &user.id, Role::Owner)
            .await
        {
            if let Err(cleanup) = self.directory.delete_workspace(&workspace.id).await {
                warn!(
                    workspace = %workspace.id,
                    error = %cleanup,
                    "Could not remove workspace after membership insert failed; manual cleanup needed"
                );
            }
            return Err(err.into());
        }

        self.workspaces = self.directory.workspaces_for_current_user().await?;
        self.status = SessionStatus::Resolved;
        self.switch(&workspace.id)?;
        Ok(workspace)
    }

    /// Re-fetch the membership list without forcing a selection change,
    /// unless the current selection is gone - then fall back to the
    /// newest workspace, or to none when the list came back empty.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let list = match self.directory.workspaces_for_current_user().await {
            Ok(list) => list,
            Err(err) => {
                self.fail_resolution();
                return Err(err.into());
            }
        };

        self.workspaces = list;
        self.status = SessionStatus::Resolved;

        let still_present = self
            .active
            .as_ref()
            .map(|active| self.workspaces.iter().any(|w| w.id == active.id))
            .unwrap_or(false);

        if !still_present {
            let fallback = self.workspaces.first().cloned();
            self.apply_selection(fallback)?;
        }
        Ok(())
    }

    async fn require_user(&self) -> Result<UserIdentity, SessionError> {
        self.directory
            .current_user()
            .await?
            .ok_or(SessionError::Unauthenticated)
    }

    /// Set the in-memory selection, write it through to both sinks, and
    /// signal observers. Both sinks are attempted even if the first one
    /// fails; the first failure is returned afterwards.
    fn apply_selection(&mut self, workspace: Option<Workspace>) -> Result<(), DataAccessError> {
        let id = workspace.as_ref().map(|w| w.id.clone());
        self.active = workspace;

        let store_result = match id.as_ref() {
            Some(id) => self.store.save(id.as_str()),
            None => self.store.clear(),
        };
        let cookie_result = match id.as_ref() {
            Some(id) => self.cookies.set(id.as_str()),
            None => self.cookies.clear(),
        };

        let _ = self.changes.send(id);

        store_result.and(cookie_result)
    }

    /// Terminal-for-session failure state: resolved with no selection and
    /// an empty list. The persisted sinks are deliberately left alone so a
    /// later re-initialization can still honor the stored choice.
    fn fail_resolution(&mut self) {
        self.workspaces.clear();
        self.active = None;
        self.status = SessionStatus::Resolved;
        let _ = self.changes.send(None);
    }
}
