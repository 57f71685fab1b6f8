//! Workspace and membership operations.

use crate::error::{is_unique_violation, DbError, Result};
use crate::CrmDb;
use leadflow_core::{Membership, Role, Workspace};
use leadflow_ids::{UserId, WorkspaceId};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const WORKSPACE_COLUMNS: &str = "id, name, slug, owner_id, created_at";

impl CrmDb {
    // ========================================================================
    // Workspace Operations
    // ========================================================================

    /// Create a workspace. The slug must already be unique; a collision
    /// surfaces as a constraint error.
    pub async fn create_workspace(
        &self,
        name: &str,
        slug: &str,
        owner: &UserId,
    ) -> Result<Workspace> {
        let workspace = Workspace {
            id: WorkspaceId::new(),
            name: name.to_string(),
            slug: slug.to_string(),
            owner_id: owner.clone(),
            // Truncate to millisecond precision to match what the column stores.
            created_at: Self::millis_to_datetime(Self::now_millis()),
        };

        sqlx::query(
            r#"
            INSERT INTO crm_workspaces (id, name, slug, owner_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(workspace.id.as_str())
        .bind(&workspace.name)
        .bind(&workspace.slug)
        .bind(workspace.owner_id.as_str())
        .bind(workspace.created_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::constraint(format!("workspace slug already taken: {}", slug))
            } else {
                DbError::Sqlx(err)
            }
        })?;

        Ok(workspace)
    }

    /// Get a workspace by ID.
    pub async fn get_workspace(&self, id: &WorkspaceId) -> Result<Option<Workspace>> {
        let row = sqlx::query(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM crm_workspaces WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_workspace(&row)?)),
            None => Ok(None),
        }
    }

    /// Get a workspace by slug.
    pub async fn get_workspace_by_slug(&self, slug: &str) -> Result<Option<Workspace>> {
        let row = sqlx::query(&format!(
            "SELECT {WORKSPACE_COLUMNS} FROM crm_workspaces WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_workspace(&row)?)),
            None => Ok(None),
        }
    }

    /// Workspaces the user owns or is a member of, newest first.
    ///
    /// Ties on created_at (millisecond clock) break on insertion order so
    /// the newest-first contract stays deterministic.
    pub async fn workspaces_for_user(&self, user: &UserId) -> Result<Vec<Workspace>> {
        let rows = sqlx::query(
            r#"
            SELECT w.id, w.name, w.slug, w.owner_id, w.created_at
            FROM crm_workspaces w
            JOIN crm_memberships m ON m.workspace_id = w.id
            WHERE m.user_id = ?
            ORDER BY w.created_at DESC, w.rowid DESC
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_workspace).collect()
    }

    /// Delete a workspace and everything scoped to it.
    pub async fn delete_workspace(&self, id: &WorkspaceId) -> Result<()> {
        // Delete scoped rows first (manual cascade)
        sqlx::query("DELETE FROM crm_leads WHERE workspace_id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM crm_memberships WHERE workspace_id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM crm_workspaces WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ========================================================================
    // Membership Operations
    // ========================================================================

    /// Grant a user access to a workspace with a role.
    pub async fn create_membership(
        &self,
        workspace: &WorkspaceId,
        user: &UserId,
        role: Role,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO crm_memberships (workspace_id, user_id, role, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(workspace.as_str())
        .bind(user.as_str())
        .bind(role.as_str())
        .bind(Self::now_millis())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::constraint(format!(
                    "user {} is already a member of workspace {}",
                    user, workspace
                ))
            } else {
                DbError::Sqlx(err)
            }
        })?;

        Ok(())
    }

    /// List memberships of a workspace.
    pub async fn list_memberships(&self, workspace: &WorkspaceId) -> Result<Vec<Membership>> {
        let rows = sqlx::query(
            r#"
            SELECT workspace_id, user_id, role, created_at
            FROM crm_memberships
            WHERE workspace_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(workspace.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_membership).collect()
    }

    // ========================================================================
    // Row mapping
    // ========================================================================

    fn row_to_workspace(row: &SqliteRow) -> Result<Workspace> {
        let id_raw: String = row.try_get("id")?;
        let owner_raw: String = row.try_get("owner_id")?;
        let created_at_millis: i64 = row.try_get("created_at")?;

        Ok(Workspace {
            id: WorkspaceId::parse(&id_raw).map_err(|e| DbError::invalid_state(e.to_string()))?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            owner_id: UserId::parse(&owner_raw)
                .map_err(|e| DbError::invalid_state(e.to_string()))?,
            created_at: Self::millis_to_datetime(created_at_millis),
        })
    }

    fn row_to_membership(row: &SqliteRow) -> Result<Membership> {
        let workspace_raw: String = row.try_get("workspace_id")?;
        let user_raw: String = row.try_get("user_id")?;
        let role_raw: String = row.try_get("role")?;
        let created_at_millis: i64 = row.try_get("created_at")?;

        Ok(Membership {
            workspace_id: WorkspaceId::parse(&workspace_raw)
                .map_err(|e| DbError::invalid_state(e.to_string()))?,
            user_id: UserId::parse(&user_raw)
                .map_err(|e| DbError::invalid_state(e.to_string()))?,
            role: role_raw.parse().map_err(DbError::InvalidState)?,
            created_at: Self::millis_to_datetime(created_at_millis),
        })
    }
}
