//! Lead operations (capture, pipeline moves, deletion).

use crate::error::{DbError, Result};
use crate::CrmDb;
use leadflow_core::{Lead, LeadStatus, NewLead, SubSegment};
use leadflow_ids::{LeadId, WorkspaceId};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashMap;

const LEAD_COLUMNS: &str = "id, workspace_id, company, sub_segment, use_case, currency_flow, decision_maker_name, status, created_at, updated_at";

impl CrmDb {
    /// Capture a new lead in a workspace. Status starts at `New`.
    pub async fn create_lead(&self, workspace: &WorkspaceId, fields: NewLead) -> Result<Lead> {
        // Truncate to millisecond precision to match what the column stores.
        let now = Self::millis_to_datetime(Self::now_millis());
        let lead = Lead {
            id: LeadId::new(),
            workspace_id: workspace.clone(),
            company: fields.company,
            sub_segment: fields.sub_segment,
            use_case: fields.use_case,
            currency_flow: fields.currency_flow,
            decision_maker_name: fields.decision_maker_name,
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO crm_leads (
                id, workspace_id, company, sub_segment, use_case,
                currency_flow, decision_maker_name, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(lead.id.as_str())
        .bind(lead.workspace_id.as_str())
        .bind(&lead.company)
        .bind(lead.sub_segment.map(|s| s.as_str()))
        .bind(&lead.use_case)
        .bind(&lead.currency_flow)
        .bind(&lead.decision_maker_name)
        .bind(lead.status.as_str())
        .bind(lead.created_at.timestamp_millis())
        .bind(lead.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Get a lead by ID.
    pub async fn get_lead(&self, id: &LeadId) -> Result<Option<Lead>> {
        let row = sqlx::query(&format!("SELECT {LEAD_COLUMNS} FROM crm_leads WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_lead(&row)?)),
            None => Ok(None),
        }
    }

    /// Leads in a workspace, newest first.
    pub async fn list_leads(&self, workspace: &WorkspaceId) -> Result<Vec<Lead>> {
        let rows = sqlx::query(&format!(
            "SELECT {LEAD_COLUMNS} FROM crm_leads WHERE workspace_id = ? ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(workspace.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_lead).collect()
    }

    /// Update a lead's editable fields.
    pub async fn update_lead(&self, lead: &Lead) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE crm_leads SET
                company = ?,
                sub_segment = ?,
                use_case = ?,
                currency_flow = ?,
                decision_maker_name = ?,
                status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&lead.company)
        .bind(lead.sub_segment.map(|s| s.as_str()))
        .bind(&lead.use_case)
        .bind(&lead.currency_flow)
        .bind(&lead.decision_maker_name)
        .bind(lead.status.as_str())
        .bind(Self::now_millis())
        .bind(lead.id.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(format!("lead {}", lead.id)));
        }
        Ok(())
    }

    /// Move a lead to a pipeline stage (kanban drag).
    pub async fn move_lead(&self, id: &LeadId, status: LeadStatus) -> Result<()> {
        let result = sqlx::query("UPDATE crm_leads SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Self::now_millis())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(format!("lead {}", id)));
        }
        Ok(())
    }

    /// Explicit user deletion. Leads are never removed algorithmically.
    pub async fn delete_lead(&self, id: &LeadId) -> Result<()> {
        sqlx::query("DELETE FROM crm_leads WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Lead counts per pipeline stage (dashboard widget).
    pub async fn count_leads_by_status(
        &self,
        workspace: &WorkspaceId,
    ) -> Result<HashMap<LeadStatus, i64>> {
        let rows = sqlx::query(
            "SELECT status, COUNT(*) AS n FROM crm_leads WHERE workspace_id = ? GROUP BY status",
        )
        .bind(workspace.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut counts = HashMap::new();
        for row in rows {
            let status_raw: String = row.try_get("status")?;
            let status: LeadStatus = status_raw.parse().map_err(DbError::InvalidState)?;
            let n: i64 = row.try_get("n")?;
            counts.insert(status, n);
        }
        Ok(counts)
    }

    fn row_to_lead(row: &SqliteRow) -> Result<Lead> {
        let id_raw: String = row.try_get("id")?;
        let workspace_raw: String = row.try_get("workspace_id")?;
        let sub_segment_raw: Option<String> = row.try_get("sub_segment")?;
        let status_raw: String = row.try_get("status")?;
        let created_at_millis: i64 = row.try_get("created_at")?;
        let updated_at_millis: i64 = row.try_get("updated_at")?;

        let sub_segment = sub_segment_raw
            .map(|raw| raw.parse::<SubSegment>().map_err(DbError::InvalidState))
            .transpose()?;

        Ok(Lead {
            id: LeadId::parse(&id_raw).map_err(|e| DbError::invalid_state(e.to_string()))?,
            workspace_id: WorkspaceId::parse(&workspace_raw)
                .map_err(|e| DbError::invalid_state(e.to_string()))?,
            company: row.try_get("company")?,
            sub_segment,
            use_case: row.try_get("use_case")?,
            currency_flow: row.try_get("currency_flow")?,
            decision_maker_name: row.try_get("decision_maker_name")?,
            status: status_raw.parse().map_err(DbError::InvalidState)?,
            created_at: Self::millis_to_datetime(created_at_millis),
            updated_at: Self::millis_to_datetime(updated_at_millis),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadflow_core::{score_lead, Role, UserIdentity};
    use leadflow_ids::UserId;
    use tempfile::TempDir;

    async fn workspace_fixture(db: &CrmDb) -> WorkspaceId {
        let user = UserIdentity {
            id: UserId::new(),
            email: None,
            display_name: None,
        };
        db.upsert_user(&user).await.unwrap();
        let ws = db
            .create_workspace("Acme", "acme-fixture", &user.id)
            .await
            .unwrap();
        db.create_membership(&ws.id, &user.id, Role::Owner)
            .await
            .unwrap();
        ws.id
    }

    #[tokio::test]
    async fn lead_round_trips_with_nullable_fields() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();
        let ws = workspace_fixture(&db).await;

        let created = db
            .create_lead(
                &ws,
                NewLead {
                    company: "Globex".to_string(),
                    sub_segment: Some(SubSegment::Exporter),
                    use_case: None,
                    currency_flow: Some("Paid in INR".to_string()),
                    decision_maker_name: Some("Jane".to_string()),
                },
            )
            .await
            .unwrap();

        let fetched = db.get_lead(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, LeadStatus::New);
        // 20 (Exporter) + 15 (INR) + 10 (decision maker), not yet engaged
        assert_eq!(score_lead(&fetched), 45);
    }

    #[tokio::test]
    async fn move_lead_updates_status() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();
        let ws = workspace_fixture(&db).await;

        let lead = db
            .create_lead(
                &ws,
                NewLead {
                    company: "Initech".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        db.move_lead(&lead.id, LeadStatus::DemoScheduled).await.unwrap();
        let fetched = db.get_lead(&lead.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, LeadStatus::DemoScheduled);
    }

    #[tokio::test]
    async fn move_missing_lead_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();

        let err = db
            .move_lead(&LeadId::new(), LeadStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_is_scoped_to_workspace_and_newest_first() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();
        let ws_a = workspace_fixture(&db).await;

        for company in ["first", "second", "third"] {
            db.create_lead(
                &ws_a,
                NewLead {
                    company: company.to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let listed = db.list_leads(&ws_a).await.unwrap();
        let companies: Vec<&str> = listed.iter().map(|l| l.company.as_str()).collect();
        assert_eq!(companies, vec!["third", "second", "first"]);

        let other = db.list_leads(&WorkspaceId::new()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn counts_group_by_pipeline_stage() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();
        let ws = workspace_fixture(&db).await;

        let a = db
            .create_lead(&ws, NewLead { company: "a".into(), ..Default::default() })
            .await
            .unwrap();
        db.create_lead(&ws, NewLead { company: "b".into(), ..Default::default() })
            .await
            .unwrap();
        db.move_lead(&a.id, LeadStatus::Negotiation).await.unwrap();

        let counts = db.count_leads_by_status(&ws).await.unwrap();
        assert_eq!(counts.get(&LeadStatus::New), Some(&1));
        assert_eq!(counts.get(&LeadStatus::Negotiation), Some(&1));
    }
}
