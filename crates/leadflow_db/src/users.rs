//! User records mirrored from the auth collaborator.

use crate::error::{is_unique_violation, DbError, Result};
use crate::CrmDb;
use leadflow_core::UserIdentity;
use leadflow_ids::UserId;
use sqlx::Row;

impl CrmDb {
    /// Insert or update the local mirror of an authenticated user.
    ///
    /// Re-upserting the same id refreshes email and display name; a
    /// different user claiming an already-registered email is a
    /// constraint error.
    pub async fn upsert_user(&self, user: &UserIdentity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO crm_users (id, email, display_name, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                display_name = excluded.display_name
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(Self::now_millis())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                // Id conflicts are absorbed by the upsert, so only the
                // unique email index can trip this.
                DbError::constraint(format!(
                    "email already registered: {}",
                    user.email.as_deref().unwrap_or("<none>")
                ))
            } else {
                DbError::Sqlx(err)
            }
        })?;

        Ok(())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &UserId) -> Result<Option<UserIdentity>> {
        let row = sqlx::query("SELECT id, email, display_name FROM crm_users WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let id_raw: String = row.try_get("id")?;
                Ok(Some(UserIdentity {
                    id: UserId::parse(&id_raw)
                        .map_err(|e| DbError::invalid_state(e.to_string()))?,
                    email: row.try_get("email")?,
                    display_name: row.try_get("display_name")?,
                }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn upsert_is_idempotent_and_updates_fields() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();

        let mut user = UserIdentity {
            id: UserId::new(),
            email: Some("a@example.com".to_string()),
            display_name: None,
        };
        db.upsert_user(&user).await.unwrap();

        user.display_name = Some("Ada".to_string());
        db.upsert_user(&user).await.unwrap();

        let fetched = db.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(fetched.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_error() {
        let tmp = TempDir::new().unwrap();
        let db = CrmDb::open(tmp.path().join("test.db")).await.unwrap();

        let first = UserIdentity {
            id: UserId::new(),
            email: Some("shared@example.com".to_string()),
            display_name: None,
        };
        db.upsert_user(&first).await.unwrap();

        let second = UserIdentity {
            id: UserId::new(),
            email: Some("shared@example.com".to_string()),
            display_name: None,
        };
        let err = db.upsert_user(&second).await.unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
    }
}
