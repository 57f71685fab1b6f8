//! [`WorkspaceDirectory`] implementation backed by [`CrmDb`].
//!
//! Bundles the database with the locally configured identity so the
//! session layer sees the same contract a hosted backend would expose.

use async_trait::async_trait;
use leadflow_core::{DataAccessError, Role, UserIdentity, Workspace, WorkspaceDirectory};
use leadflow_ids::{UserId, WorkspaceId};

use crate::CrmDb;

pub struct CrmDirectory {
    db: CrmDb,
    identity: Option<UserIdentity>,
}

impl CrmDirectory {
    pub fn new(db: CrmDb, identity: Option<UserIdentity>) -> Self {
        Self { db, identity }
    }

    /// The underlying database, for workspace-scoped lead queries.
    pub fn db(&self) -> &CrmDb {
        &self.db
    }
}

#[async_trait]
impl WorkspaceDirectory for CrmDirectory {
    async fn current_user(&self) -> Result<Option<UserIdentity>, DataAccessError> {
        Ok(self.identity.clone())
    }

    async fn workspaces_for_current_user(&self) -> Result<Vec<Workspace>, DataAccessError> {
        let user = self
            .identity
            .as_ref()
            .ok_or_else(|| DataAccessError::denied("no user is signed in"))?;
        Ok(self.db.workspaces_for_user(&user.id).await?)
    }

    async fn create_workspace(
        &self,
        name: &str,
        slug: &str,
        owner: &UserId,
    ) -> Result<Workspace, DataAccessError> {
        Ok(self.db.create_workspace(name, slug, owner).await?)
    }

    async fn create_membership(
        &self,
        workspace: &WorkspaceId,
        user: &UserId,
        role: Role,
    ) -> Result<(), DataAccessError> {
        Ok(self.db.create_membership(workspace, user, role).await?)
    }

    async fn delete_workspace(&self, workspace: &WorkspaceId) -> Result<(), DataAccessError> {
        Ok(self.db.delete_workspace(workspace).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn identity(email: &str) -> UserIdentity {
        UserIdentity {
            id: UserId::new(),
            email: Some(email.to_string()),
            display_name: None,
        }
    }

    #[tokio::test]
    async fn unauthenticated_directory_denies_listing() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();
        let directory = CrmDirectory::new(db, None);

        assert!(directory.current_user().await.unwrap().is_none());
        let err = directory.workspaces_for_current_user().await.unwrap_err();
        assert!(matches!(err, DataAccessError::Denied(_)));
    }

    #[tokio::test]
    async fn lists_only_the_current_users_workspaces() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();

        let me = identity("me@example.com");
        let someone_else = identity("them@example.com");
        db.upsert_user(&me).await.unwrap();
        db.upsert_user(&someone_else).await.unwrap();

        let mine = db.create_workspace("Mine", "mine-1", &me.id).await.unwrap();
        db.create_membership(&mine.id, &me.id, Role::Owner).await.unwrap();
        let theirs = db
            .create_workspace("Theirs", "theirs-1", &someone_else.id)
            .await
            .unwrap();
        db.create_membership(&theirs.id, &someone_else.id, Role::Owner)
            .await
            .unwrap();

        let directory = CrmDirectory::new(db, Some(me));
        let visible = directory.workspaces_for_current_user().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, mine.id);
    }
}
