//! Database schema creation for all Leadflow tables.
//!
//! All CREATE TABLE statements live here - single source of truth.

use crate::error::Result;
use crate::CrmDb;
use tracing::info;

impl CrmDb {
    /// Ensure all tables exist.
    pub(crate) async fn ensure_schema(&self) -> Result<()> {
        // Enable WAL mode for better concurrent access
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&self.pool)
            .await?;
        sqlx::query("PRAGMA synchronous=NORMAL")
            .execute(&self.pool)
            .await?;
        sqlx::query("PRAGMA foreign_keys=ON")
            .execute(&self.pool)
            .await?;

        self.create_tenancy_tables().await?;
        self.create_lead_tables().await?;

        info!("Database schema verified");
        Ok(())
    }

    /// Users, workspaces and memberships.
    async fn create_tenancy_tables(&self) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS crm_users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE,
                display_name TEXT,
                created_at INTEGER NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS crm_workspaces (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                owner_id TEXT NOT NULL REFERENCES crm_users(id),
                created_at INTEGER NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS crm_memberships (
                workspace_id TEXT NOT NULL REFERENCES crm_workspaces(id),
                user_id TEXT NOT NULL REFERENCES crm_users(id),
                role TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (workspace_id, user_id)
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_memberships_user ON crm_memberships(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Leads, scoped to a workspace.
    async fn create_lead_tables(&self) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS crm_leads (
                id TEXT PRIMARY KEY,
                workspace_id TEXT NOT NULL REFERENCES crm_workspaces(id),
                company TEXT NOT NULL,
                sub_segment TEXT,
                use_case TEXT,
                currency_flow TEXT,
                decision_maker_name TEXT,
                status TEXT NOT NULL DEFAULT 'New',
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_workspace ON crm_leads(workspace_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_leads_workspace_status ON crm_leads(workspace_id, status)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
