//! SQLite-backed reminder repository.
//!
//! Listing returns active rows only; `get_reminder` sees everything so
//! the soft-delete flag can be inspected and flipped.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::commands::reminders::ReminderListFilter;
use crate::domain::models::reminder::{
    Reminder, ReminderKind, ReminderStatus, RepeatRule,
};
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::ReminderStore;

#[derive(Clone)]
pub struct ReminderRepository {
    connection: DbConnection,
}

impl ReminderRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

fn row_to_reminder(row: &SqliteRow) -> Result<Reminder> {
    let kind: String = row.try_get("kind")?;
    let repeat: String = row.try_get("repeat_rule")?;
    let status: String = row.try_get("status")?;
    let reminder_date: String = row.try_get("reminder_date")?;
    let reminder_time: Option<String> = row.try_get("reminder_time")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Reminder {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        kind: ReminderKind::from_db(&kind).map_err(|e| anyhow!(e))?,
        amount: row.try_get("amount")?,
        category_id: row.try_get("category_id")?,
        wallet_id: row.try_get("wallet_id")?,
        icon: row.try_get("icon")?,
        reminder_date: NaiveDate::parse_from_str(&reminder_date, "%Y-%m-%d")?,
        reminder_time: reminder_time
            .map(|s| NaiveTime::parse_from_str(&s, "%H:%M"))
            .transpose()?,
        repeat: RepeatRule::from_db(&repeat).map_err(|e| anyhow!(e))?,
        status: ReminderStatus::from_db(&status).map_err(|e| anyhow!(e))?,
        notes: row.try_get("notes")?,
        color: row.try_get("color")?,
        notification_enabled: row.try_get::<i64, _>("notification_enabled")? != 0,
        is_active: row.try_get::<i64, _>("is_active")? != 0,
        created_at: DateTime::parse_from_rfc3339(&created_at)?,
        updated_at: DateTime::parse_from_rfc3339(&updated_at)?,
    })
}

#[async_trait]
impl ReminderStore for ReminderRepository {
    async fn insert_reminder(&self, reminder: &Reminder) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders (
                id, user_id, title, kind, amount, category_id, wallet_id,
                icon, reminder_date, reminder_time, repeat_rule, status,
                notes, color, notification_enabled, is_active,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reminder.id)
        .bind(&reminder.user_id)
        .bind(&reminder.title)
        .bind(reminder.kind.as_str())
        .bind(reminder.amount)
        .bind(reminder.category_id.as_deref())
        .bind(reminder.wallet_id.as_deref())
        .bind(reminder.icon.as_deref())
        .bind(reminder.reminder_date.to_string())
        .bind(reminder.reminder_time.map(|t| t.format("%H:%M").to_string()))
        .bind(reminder.repeat.as_str())
        .bind(reminder.status.as_str())
        .bind(reminder.notes.as_deref())
        .bind(reminder.color.as_deref())
        .bind(reminder.notification_enabled as i64)
        .bind(reminder.is_active as i64)
        .bind(reminder.created_at.to_rfc3339())
        .bind(reminder.updated_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    async fn get_reminder(&self, user_id: &str, reminder_id: &str) -> Result<Option<Reminder>> {
        let row = sqlx::query("SELECT * FROM reminders WHERE id = ? AND user_id = ?")
            .bind(reminder_id)
            .bind(user_id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(row_to_reminder).transpose()
    }

    async fn list_reminders(
        &self,
        user_id: &str,
        filter: &ReminderListFilter,
    ) -> Result<Vec<Reminder>> {
        let mut sql = String::from("SELECT * FROM reminders WHERE user_id = ? AND is_active = 1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            binds.push(status.as_str().to_string());
        }
        if let Some(kind) = filter.kind {
            sql.push_str(" AND kind = ?");
            binds.push(kind.as_str().to_string());
        }
        if let Some(start) = filter.start_date {
            sql.push_str(" AND reminder_date >= ?");
            binds.push(start.to_string());
        }
        if let Some(end) = filter.end_date {
            sql.push_str(" AND reminder_date <= ?");
            binds.push(end.to_string());
        }

        let mut query = sqlx::query(&sql).bind(user_id);
        for value in &binds {
            query = query.bind(value.as_str());
        }

        let rows = query.fetch_all(self.connection.pool()).await?;
        rows.iter().map(row_to_reminder).collect()
    }

    async fn update_reminder(&self, reminder: &Reminder) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reminders SET
                title = ?, kind = ?, amount = ?, category_id = ?,
                wallet_id = ?, icon = ?, reminder_date = ?,
                reminder_time = ?, repeat_rule = ?, status = ?, notes = ?,
                color = ?, notification_enabled = ?, is_active = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&reminder.title)
        .bind(reminder.kind.as_str())
        .bind(reminder.amount)
        .bind(reminder.category_id.as_deref())
        .bind(reminder.wallet_id.as_deref())
        .bind(reminder.icon.as_deref())
        .bind(reminder.reminder_date.to_string())
        .bind(reminder.reminder_time.map(|t| t.format("%H:%M").to_string()))
        .bind(reminder.repeat.as_str())
        .bind(reminder.status.as_str())
        .bind(reminder.notes.as_deref())
        .bind(reminder.color.as_deref())
        .bind(reminder.notification_enabled as i64)
        .bind(reminder.is_active as i64)
        .bind(reminder.updated_at.to_rfc3339())
        .bind(&reminder.id)
        .bind(&reminder.user_id)
        .execute(self.connection.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates;

    fn sample_reminder(user_id: &str, title: &str) -> Reminder {
        let now = dates::now();
        Reminder {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            kind: ReminderKind::Chi,
            amount: Some(120000.0),
            category_id: Some("cat-1".to_string()),
            wallet_id: Some("w-1".to_string()),
            icon: Some("💡".to_string()),
            reminder_date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            reminder_time: NaiveTime::from_hms_opt(8, 30, 0),
            repeat: RepeatRule::Monthly,
            status: ReminderStatus::Pending,
            notes: Some("hóa đơn điện".to_string()),
            color: None,
            notification_enabled: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = ReminderRepository::new(db);

        let reminder = sample_reminder("u1", "round trip");
        repo.insert_reminder(&reminder).await.unwrap();

        let fetched = repo.get_reminder("u1", &reminder.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, reminder.title);
        assert_eq!(fetched.kind, ReminderKind::Chi);
        assert_eq!(fetched.amount, Some(120000.0));
        assert_eq!(fetched.reminder_date, reminder.reminder_date);
        assert_eq!(fetched.reminder_time, reminder.reminder_time);
        assert_eq!(fetched.repeat, RepeatRule::Monthly);
        assert!(fetched.notification_enabled);
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_list_hides_inactive_rows() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = ReminderRepository::new(db);

        let mut reminder = sample_reminder("u1", "soon inactive");
        repo.insert_reminder(&reminder).await.unwrap();

        reminder.is_active = false;
        assert!(repo.update_reminder(&reminder).await.unwrap());

        let listed = repo
            .list_reminders("u1", &ReminderListFilter::default())
            .await
            .unwrap();
        assert!(listed.is_empty());

        // get still sees the row.
        let row = repo.get_reminder("u1", &reminder.id).await.unwrap().unwrap();
        assert!(!row.is_active);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = ReminderRepository::new(db);

        let thu = Reminder {
            kind: ReminderKind::Thu,
            ..sample_reminder("u1", "income")
        };
        repo.insert_reminder(&thu).await.unwrap();
        repo.insert_reminder(&sample_reminder("u1", "expense"))
            .await
            .unwrap();
        repo.insert_reminder(&sample_reminder("u2", "foreign"))
            .await
            .unwrap();

        let thu_only = repo
            .list_reminders(
                "u1",
                &ReminderListFilter {
                    kind: Some(ReminderKind::Thu),
                    ..ReminderListFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(thu_only.len(), 1);
        assert_eq!(thu_only[0].title, "income");

        let date_bounded = repo
            .list_reminders(
                "u1",
                &ReminderListFilter {
                    start_date: NaiveDate::from_ymd_opt(2025, 8, 1),
                    end_date: NaiveDate::from_ymd_opt(2025, 8, 31),
                    ..ReminderListFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(date_bounded.len(), 2);
    }

    #[tokio::test]
    async fn test_update_returns_false_for_foreign_row() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = ReminderRepository::new(db);

        let mut reminder = sample_reminder("u1", "target");
        repo.insert_reminder(&reminder).await.unwrap();

        reminder.user_id = "u2".to_string();
        assert!(!repo.update_reminder(&reminder).await.unwrap());
    }
}
