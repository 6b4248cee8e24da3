//! SQLite-backed task repository.
//!
//! Dates are parsed here, at the storage boundary: timestamps from
//! RFC 3339, civil dates from `YYYY-MM-DD`, tag and subtask collections
//! from JSON TEXT columns.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::commands::tasks::TaskListFilter;
use crate::domain::models::task::{Subtask, Task, TaskPriority, TaskStatus};
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::TaskStore;

#[derive(Clone)]
pub struct TaskRepository {
    connection: DbConnection,
}

impl TaskRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

fn row_to_task(row: &SqliteRow) -> Result<Task> {
    let status: String = row.try_get("status")?;
    let priority: String = row.try_get("priority")?;
    let deadline: Option<String> = row.try_get("deadline")?;
    let week_start: Option<String> = row.try_get("week_start_date")?;
    let tags: Option<String> = row.try_get("tags")?;
    let subtasks: Option<String> = row.try_get("subtasks")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    let completed_at: Option<String> = row.try_get("completed_at")?;

    Ok(Task {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: TaskStatus::from_db(&status).map_err(|e| anyhow!(e))?,
        priority: TaskPriority::from_db(&priority).map_err(|e| anyhow!(e))?,
        deadline: parse_civil_date(deadline)?,
        progress: row.try_get::<i64, _>("progress")? as u8,
        week_start_date: parse_civil_date(week_start)?,
        tags: tags.map(|t| serde_json::from_str(&t)).transpose()?,
        color: row.try_get("color")?,
        subtasks: subtasks
            .map(|s| serde_json::from_str::<Vec<Subtask>>(&s))
            .transpose()?,
        created_at: DateTime::parse_from_rfc3339(&created_at)?,
        updated_at: DateTime::parse_from_rfc3339(&updated_at)?,
        completed_at: completed_at
            .map(|s| DateTime::parse_from_rfc3339(&s))
            .transpose()?,
    })
}

fn parse_civil_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(anyhow::Error::from))
        .transpose()
}

fn tags_json(task: &Task) -> Result<Option<String>> {
    task.tags
        .as_ref()
        .map(|t| serde_json::to_string(t).map_err(anyhow::Error::from))
        .transpose()
}

fn subtasks_json(task: &Task) -> Result<Option<String>> {
    task.subtasks
        .as_ref()
        .map(|s| serde_json::to_string(s).map_err(anyhow::Error::from))
        .transpose()
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn insert_task(&self, task: &Task) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, user_id, title, description, status, priority, deadline,
                progress, week_start_date, tags, color, subtasks,
                created_at, updated_at, completed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.id)
        .bind(&task.user_id)
        .bind(&task.title)
        .bind(task.description.as_deref())
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.deadline.map(|d| d.to_string()))
        .bind(task.progress as i64)
        .bind(task.week_start_date.map(|d| d.to_string()))
        .bind(tags_json(task)?)
        .bind(task.color.as_deref())
        .bind(subtasks_json(task)?)
        .bind(task.created_at.to_rfc3339())
        .bind(task.updated_at.to_rfc3339())
        .bind(task.completed_at.map(|d| d.to_rfc3339()))
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    async fn get_task(&self, user_id: &str, task_id: &str) -> Result<Option<Task>> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn list_tasks(&self, user_id: &str, filter: &TaskListFilter) -> Result<Vec<Task>> {
        let mut sql = String::from("SELECT * FROM tasks WHERE user_id = ?");
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            binds.push(status.as_str().to_string());
        }
        if let Some(priority) = filter.priority {
            sql.push_str(" AND priority = ?");
            binds.push(priority.as_str().to_string());
        }
        if let Some(start) = filter.start_date {
            sql.push_str(" AND deadline >= ?");
            binds.push(start.to_string());
        }
        if let Some(end) = filter.end_date {
            sql.push_str(" AND deadline <= ?");
            binds.push(end.to_string());
        }
        if let Some(week_start) = filter.week_start {
            sql.push_str(" AND week_start_date = ?");
            binds.push(week_start.to_string());
        }

        let mut query = sqlx::query(&sql).bind(user_id);
        for value in &binds {
            query = query.bind(value.as_str());
        }

        let rows = query.fetch_all(self.connection.pool()).await?;
        rows.iter().map(row_to_task).collect()
    }

    async fn update_task(&self, task: &Task) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                title = ?, description = ?, status = ?, priority = ?,
                deadline = ?, progress = ?, week_start_date = ?, tags = ?,
                color = ?, subtasks = ?, updated_at = ?, completed_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&task.title)
        .bind(task.description.as_deref())
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.deadline.map(|d| d.to_string()))
        .bind(task.progress as i64)
        .bind(task.week_start_date.map(|d| d.to_string()))
        .bind(tags_json(task)?)
        .bind(task.color.as_deref())
        .bind(subtasks_json(task)?)
        .bind(task.updated_at.to_rfc3339())
        .bind(task.completed_at.map(|d| d.to_rfc3339()))
        .bind(&task.id)
        .bind(&task.user_id)
        .execute(self.connection.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(self.connection.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates;

    fn sample_task(user_id: &str, title: &str) -> Task {
        let now = dates::now();
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: Some("desc".to_string()),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            deadline: NaiveDate::from_ymd_opt(2025, 8, 15),
            progress: 0,
            week_start_date: NaiveDate::from_ymd_opt(2025, 8, 11),
            tags: Some(vec!["nhà".to_string(), "gấp".to_string()]),
            color: Some("#ff8800".to_string()),
            subtasks: Some(vec![Subtask {
                id: "st-1".to_string(),
                title: "bước 1".to_string(),
                is_completed: false,
            }]),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = TaskRepository::new(db);

        let task = sample_task("u1", "round trip");
        repo.insert_task(&task).await.unwrap();

        let fetched = repo.get_task("u1", &task.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, task.title);
        assert_eq!(fetched.tags, task.tags);
        assert_eq!(fetched.subtasks, task.subtasks);
        assert_eq!(fetched.deadline, task.deadline);
        assert_eq!(fetched.week_start_date, task.week_start_date);
        assert_eq!(fetched.status, TaskStatus::Pending);
        assert_eq!(fetched.priority, TaskPriority::High);
        assert_eq!(
            fetched.created_at.timestamp(),
            task.created_at.timestamp()
        );
    }

    #[tokio::test]
    async fn test_get_is_user_scoped() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = TaskRepository::new(db);

        let task = sample_task("u1", "mine");
        repo.insert_task(&task).await.unwrap();

        assert!(repo.get_task("u2", &task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = TaskRepository::new(db);

        let mut a = sample_task("u1", "a");
        a.status = TaskStatus::Completed;
        repo.insert_task(&a).await.unwrap();

        let mut b = sample_task("u1", "b");
        b.deadline = NaiveDate::from_ymd_opt(2025, 9, 1);
        repo.insert_task(&b).await.unwrap();

        repo.insert_task(&sample_task("u2", "foreign")).await.unwrap();

        let all = repo
            .list_tasks("u1", &TaskListFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let completed = repo
            .list_tasks(
                "u1",
                &TaskListFilter {
                    status: Some(TaskStatus::Completed),
                    ..TaskListFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "a");

        let september = repo
            .list_tasks(
                "u1",
                &TaskListFilter {
                    start_date: NaiveDate::from_ymd_opt(2025, 9, 1),
                    end_date: NaiveDate::from_ymd_opt(2025, 9, 30),
                    ..TaskListFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(september.len(), 1);
        assert_eq!(september[0].title, "b");
    }

    #[tokio::test]
    async fn test_update_returns_false_for_foreign_row() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = TaskRepository::new(db);

        let mut task = sample_task("u1", "target");
        repo.insert_task(&task).await.unwrap();

        task.user_id = "u2".to_string();
        task.title = "hijacked".to_string();
        assert!(!repo.update_task(&task).await.unwrap());

        // The original row is untouched.
        let kept = repo.get_task("u1", &task.id).await.unwrap().unwrap();
        assert_eq!(kept.title, "target");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = TaskRepository::new(db);

        let task = sample_task("u1", "doomed");
        repo.insert_task(&task).await.unwrap();

        assert!(repo.delete_task("u1", &task.id).await.unwrap());
        assert!(!repo.delete_task("u1", &task.id).await.unwrap());
        assert!(repo.get_task("u1", &task.id).await.unwrap().is_none());
    }
}
