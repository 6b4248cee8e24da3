//! Task service domain logic.
//!
//! Every operation authenticates first, scopes its query to the current
//! user's rows, and invalidates that user's cache prefix after a write.
//! Tasks are hard-deleted; the soft-delete policy belongs to reminders.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

use crate::cache::Cache;
use crate::domain::commands::tasks::{CreateTaskCommand, TaskListFilter, UpdateTaskCommand};
use crate::domain::dates;
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::task::{
    progress_from_subtasks, status_from_progress, Subtask, Task, TaskPriority, TaskStatus,
};
use crate::domain::session_service::SessionService;
use crate::storage::traits::TaskStore;

/// Staleness window for cached list reads.
const LIST_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    session: SessionService,
    cache: Cache,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, session: SessionService, cache: Cache) -> Self {
        Self {
            store,
            session,
            cache,
        }
    }

    fn cache_prefix(user_id: &str) -> String {
        format!("tasks:{}:", user_id)
    }

    /// List the current user's tasks, cache-first. Ordered by deadline
    /// ascending (tasks without a deadline last), then priority
    /// descending, then creation descending.
    pub async fn list_tasks(&self, filter: TaskListFilter) -> ServiceResult<Vec<Task>> {
        let user = self.session.current_user()?;
        let key = format!("{}list:{}", Self::cache_prefix(&user.id), filter.cache_key());

        let store = self.store.clone();
        let user_id = user.id.clone();
        self.cache
            .fetch(&key, LIST_TTL, || async move {
                let mut tasks = store.list_tasks(&user_id, &filter).await?;
                sort_tasks(&mut tasks);
                Ok(tasks)
            })
            .await
    }

    /// Fetch one task. Absence is `Ok(None)`; other storage failures
    /// propagate.
    pub async fn get_task(&self, task_id: &str) -> ServiceResult<Option<Task>> {
        let user = self.session.current_user()?;
        Ok(self.store.get_task(&user.id, task_id).await?)
    }

    pub async fn create_task(&self, cmd: CreateTaskCommand) -> ServiceResult<Task> {
        let user = self.session.current_user()?;
        validate_title(&cmd.title)?;

        // The week anchor is the Monday of the deadline's UTC+7 week,
        // or of the current week when there is no deadline.
        let anchor = cmd
            .deadline
            .unwrap_or_else(|| dates::civil_date(&dates::now()));
        let week_start = dates::monday_of_week(anchor);

        let subtasks = if cmd.subtasks.is_empty() {
            None
        } else {
            Some(
                cmd.subtasks
                    .into_iter()
                    .map(|title| Subtask {
                        id: Uuid::new_v4().to_string(),
                        title,
                        is_completed: false,
                    })
                    .collect::<Vec<_>>(),
            )
        };

        let now = dates::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            title: cmd.title,
            description: cmd.description,
            status: TaskStatus::Pending,
            priority: cmd.priority.unwrap_or(TaskPriority::Medium),
            deadline: cmd.deadline,
            progress: 0,
            week_start_date: Some(week_start),
            tags: cmd.tags,
            color: cmd.color,
            subtasks,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        self.store.insert_task(&task).await?;
        let created = self
            .store
            .get_task(&user.id, &task.id)
            .await?
            .ok_or_else(|| {
                ServiceError::Storage(anyhow::anyhow!("storage returned no row for created task"))
            })?;

        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        info!("Created task {} for user {}", created.id, user.id);
        Ok(created)
    }

    /// Partial update. Only supplied fields change, plus a refreshed
    /// updated_at. A row owned by another user comes back as NotFound.
    pub async fn update_task(&self, task_id: &str, cmd: UpdateTaskCommand) -> ServiceResult<Task> {
        let user = self.session.current_user()?;
        let mut task = self
            .store
            .get_task(&user.id, task_id)
            .await?
            .ok_or(ServiceError::not_found("task"))?;

        if let Some(title) = cmd.title {
            validate_title(&title)?;
            task.title = title;
        }
        if let Some(description) = cmd.description {
            task.description = Some(description);
        }
        if let Some(priority) = cmd.priority {
            task.priority = priority;
        }
        if let Some(deadline) = cmd.deadline {
            task.deadline = Some(deadline);
            task.week_start_date = Some(dates::monday_of_week(deadline));
        }
        if let Some(tags) = cmd.tags {
            task.tags = Some(tags);
        }
        if let Some(color) = cmd.color {
            task.color = Some(color);
        }
        if let Some(subtasks) = cmd.subtasks {
            task.subtasks = Some(subtasks);
        }

        if task.has_subtasks() {
            // Derived fields win over caller-supplied ones whenever a
            // checklist exists.
            let derived = progress_from_subtasks(task.subtasks.as_deref().unwrap_or(&[]));
            task.progress = derived;
            apply_status(&mut task, status_from_progress(derived));
        } else {
            if let Some(progress) = cmd.progress {
                if progress > 100 {
                    return Err(ServiceError::Validation(format!(
                        "Progress must be between 0 and 100, got {}",
                        progress
                    )));
                }
                task.progress = progress;
            }
            if let Some(status) = cmd.status {
                apply_status(&mut task, status);
            }
        }

        task.updated_at = dates::now();
        if !self.store.update_task(&task).await? {
            return Err(ServiceError::not_found("task"));
        }

        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        Ok(task)
    }

    /// Flip one subtask and re-derive progress and status.
    pub async fn toggle_subtask(&self, task_id: &str, subtask_id: &str) -> ServiceResult<Task> {
        let user = self.session.current_user()?;
        let mut task = self
            .store
            .get_task(&user.id, task_id)
            .await?
            .ok_or(ServiceError::not_found("task"))?;

        let subtasks = task
            .subtasks
            .as_mut()
            .ok_or(ServiceError::not_found("subtask"))?;
        let subtask = subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or(ServiceError::not_found("subtask"))?;
        subtask.is_completed = !subtask.is_completed;

        let derived = progress_from_subtasks(subtasks);
        task.progress = derived;
        apply_status(&mut task, status_from_progress(derived));
        task.updated_at = dates::now();

        if !self.store.update_task(&task).await? {
            return Err(ServiceError::not_found("task"));
        }

        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        Ok(task)
    }

    /// Hard delete, scoped to the owning user.
    pub async fn delete_task(&self, task_id: &str) -> ServiceResult<()> {
        let user = self.session.current_user()?;
        if !self.store.delete_task(&user.id, task_id).await? {
            return Err(ServiceError::not_found("task"));
        }
        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        info!("Deleted task {} for user {}", task_id, user.id);
        Ok(())
    }

    /// Tasks anchored to the week starting at `monday`.
    pub async fn tasks_for_week(&self, monday: NaiveDate) -> ServiceResult<Vec<Task>> {
        self.list_tasks(TaskListFilter {
            week_start: Some(monday),
            ..TaskListFilter::default()
        })
        .await
    }

    /// Tasks whose deadline falls inside the given month.
    pub async fn tasks_for_month(&self, year: i32, month: u32) -> ServiceResult<Vec<Task>> {
        let first = dates::first_of_month(year, month)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid month: {}/{}", month, year)))?;
        let last = dates::last_of_month(year, month)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid month: {}/{}", month, year)))?;
        self.list_tasks(TaskListFilter {
            start_date: Some(first),
            end_date: Some(last),
            ..TaskListFilter::default()
        })
        .await
    }

    /// Open tasks whose deadline is within the next `within_days` days.
    pub async fn approaching_deadline(&self, within_days: i64) -> ServiceResult<Vec<Task>> {
        let today = dates::civil_date(&dates::now());
        let tasks = self
            .list_tasks(TaskListFilter {
                start_date: Some(today),
                end_date: Some(today + chrono::Duration::days(within_days)),
                ..TaskListFilter::default()
            })
            .await?;
        Ok(tasks.into_iter().filter(|t| !t.status.is_done()).collect())
    }
}

fn validate_title(title: &str) -> ServiceResult<()> {
    if title.is_empty() || title.len() > 256 {
        return Err(ServiceError::Validation(
            "Title must be between 1 and 256 characters".to_string(),
        ));
    }
    Ok(())
}

/// Set a status, keeping completed_at in step with it.
fn apply_status(task: &mut Task, status: TaskStatus) {
    match status {
        TaskStatus::Completed => {
            if task.status != TaskStatus::Completed {
                task.completed_at = Some(dates::now());
            }
        }
        _ => task.completed_at = None,
    }
    task.status = status;
}

fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        let by_deadline = match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_deadline
            .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::AuthUser;
    use crate::storage::sqlite::{DbConnection, TaskRepository};

    async fn create_test_service() -> TaskService {
        let connection = DbConnection::init_test().await.unwrap();
        let repository = TaskRepository::new(connection);
        let session = SessionService::new();
        session.sign_in(AuthUser {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        });
        TaskService::new(Arc::new(repository), session, Cache::new())
    }

    fn create_cmd(title: &str) -> CreateTaskCommand {
        CreateTaskCommand {
            title: title.to_string(),
            description: None,
            priority: None,
            deadline: None,
            tags: None,
            color: None,
            subtasks: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_task_defaults() {
        let service = create_test_service().await;
        let task = service.create_task(create_cmd("Mua gạo")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.progress, 0);
        assert!(task.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_create_task_without_deadline_anchors_current_week() {
        let service = create_test_service().await;
        let task = service.create_task(create_cmd("no deadline")).await.unwrap();

        let expected = dates::monday_of_week(dates::civil_date(&dates::now()));
        assert_eq!(task.week_start_date, Some(expected));
    }

    #[tokio::test]
    async fn test_create_task_with_deadline_anchors_deadline_week() {
        let service = create_test_service().await;
        let mut cmd = create_cmd("deadline");
        // 2025-06-18 is a Wednesday.
        cmd.deadline = NaiveDate::from_ymd_opt(2025, 6, 18);
        let task = service.create_task(cmd).await.unwrap();

        assert_eq!(
            task.week_start_date,
            NaiveDate::from_ymd_opt(2025, 6, 16)
        );
    }

    #[tokio::test]
    async fn test_list_requires_session() {
        let connection = DbConnection::init_test().await.unwrap();
        let repository = TaskRepository::new(connection);
        let service = TaskService::new(
            Arc::new(repository),
            SessionService::new(),
            Cache::new(),
        );

        let result = service.list_tasks(TaskListFilter::default()).await;
        assert!(matches!(result, Err(ServiceError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_subtask_toggle_derives_progress_and_status() {
        let service = create_test_service().await;
        let mut cmd = create_cmd("with subtasks");
        cmd.subtasks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let task = service.create_task(cmd).await.unwrap();
        let ids: Vec<String> = task
            .subtasks
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.id.clone())
            .collect();

        let after_one = service.toggle_subtask(&task.id, &ids[0]).await.unwrap();
        assert_eq!(after_one.progress, 33);
        assert_eq!(after_one.status, TaskStatus::InProgress);

        let after_two = service.toggle_subtask(&task.id, &ids[1]).await.unwrap();
        assert_eq!(after_two.progress, 67);

        let done = service.toggle_subtask(&task.id, &ids[2]).await.unwrap();
        assert_eq!(done.progress, 100);
        assert_eq!(done.status, TaskStatus::Completed);
        assert!(done.completed_at.is_some());

        // Unchecking drops it back out of completed.
        let reopened = service.toggle_subtask(&task.id, &ids[2]).await.unwrap();
        assert_eq!(reopened.progress, 67);
        assert_eq!(reopened.status, TaskStatus::InProgress);
        assert!(reopened.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_write_invalidates_list_cache() {
        let service = create_test_service().await;
        service.create_task(create_cmd("first")).await.unwrap();

        let before = service.list_tasks(TaskListFilter::default()).await.unwrap();
        assert_eq!(before.len(), 1);

        // A second create must be visible on the very next list call.
        service.create_task(create_cmd("second")).await.unwrap();
        let after = service.list_tasks(TaskListFilter::default()).await.unwrap();
        assert_eq!(after.len(), 2);
    }

    #[tokio::test]
    async fn test_update_scoped_to_owner() {
        let service = create_test_service().await;
        let task = service.create_task(create_cmd("mine")).await.unwrap();

        // Same storage, different signed-in user.
        let other_session = SessionService::new();
        other_session.sign_in(AuthUser {
            id: "u2".to_string(),
            email: "u2@example.com".to_string(),
        });
        let other = TaskService::new(service.store.clone(), other_session, Cache::new());

        let result = other
            .update_task(
                &task.id,
                UpdateTaskCommand {
                    title: Some("hijacked".to_string()),
                    ..UpdateTaskCommand::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let service = create_test_service().await;
        let task = service.create_task(create_cmd("short lived")).await.unwrap();

        service.delete_task(&task.id).await.unwrap();
        assert!(service.get_task(&task.id).await.unwrap().is_none());

        let again = service.delete_task(&task.id).await;
        assert!(matches!(again, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_order() {
        let service = create_test_service().await;

        let mut low = create_cmd("low, later deadline");
        low.deadline = NaiveDate::from_ymd_opt(2025, 7, 10);
        low.priority = Some(TaskPriority::Low);
        service.create_task(low).await.unwrap();

        let mut urgent = create_cmd("urgent, same deadline");
        urgent.deadline = NaiveDate::from_ymd_opt(2025, 7, 5);
        urgent.priority = Some(TaskPriority::Urgent);
        service.create_task(urgent).await.unwrap();

        let mut medium = create_cmd("medium, same deadline");
        medium.deadline = NaiveDate::from_ymd_opt(2025, 7, 5);
        service.create_task(medium).await.unwrap();

        service.create_task(create_cmd("no deadline")).await.unwrap();

        let tasks = service.list_tasks(TaskListFilter::default()).await.unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "urgent, same deadline",
                "medium, same deadline",
                "low, later deadline",
                "no deadline",
            ]
        );
    }

    #[tokio::test]
    async fn test_tasks_for_month_filters_deadlines() {
        let service = create_test_service().await;

        let mut june = create_cmd("june");
        june.deadline = NaiveDate::from_ymd_opt(2025, 6, 10);
        service.create_task(june).await.unwrap();

        let mut july = create_cmd("july");
        july.deadline = NaiveDate::from_ymd_opt(2025, 7, 1);
        service.create_task(july).await.unwrap();

        let tasks = service.tasks_for_month(2025, 6).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "june");
    }

    #[tokio::test]
    async fn test_empty_title_rejected() {
        let service = create_test_service().await;
        let result = service.create_task(create_cmd("")).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
