//! Collaborator contract for workspace and membership data.
//!
//! The session layer consumes the hosted backend through this trait only;
//! `leadflow_db` provides the concrete implementation. Implementations are
//! expected to enforce row-level scoping themselves - callers never see
//! workspaces the current user is not a member of.

use async_trait::async_trait;
use leadflow_ids::{UserId, WorkspaceId};

use crate::error::DataAccessError;
use crate::types::{Role, UserIdentity, Workspace};

#[async_trait]
pub trait WorkspaceDirectory: Send + Sync {
    /// The authenticated identity, or `None` when no user is signed in.
    async fn current_user(&self) -> Result<Option<UserIdentity>, DataAccessError>;

    /// Workspaces visible to the current user, ordered newest-first.
    async fn workspaces_for_current_user(&self) -> Result<Vec<Workspace>, DataAccessError>;

    /// Create a workspace. The slug must already be disambiguated; a
    /// collision surfaces as [`DataAccessError::Conflict`].
    async fn create_workspace(
        &self,
        name: &str,
        slug: &str,
        owner: &UserId,
    ) -> Result<Workspace, DataAccessError>;

    /// Grant a user access to a workspace.
    async fn create_membership(
        &self,
        workspace: &WorkspaceId,
        user: &UserId,
        role: Role,
    ) -> Result<(), DataAccessError>;

    /// Remove a workspace. Used to compensate when membership creation
    /// fails halfway through workspace setup.
    async fn delete_workspace(&self, workspace: &WorkspaceId) -> Result<(), DataAccessError>;
}
