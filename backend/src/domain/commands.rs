//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed over the public API. The REST layer maps the public
//! DTOs defined in the `shared` crate to these internal types.

pub mod tasks {
    use chrono::NaiveDate;

    use crate::domain::models::task::{Subtask, TaskPriority, TaskStatus};

    /// Input for creating a new task.
    #[derive(Debug, Clone)]
    pub struct CreateTaskCommand {
        pub title: String,
        pub description: Option<String>,
        /// Defaults to medium.
        pub priority: Option<TaskPriority>,
        pub deadline: Option<NaiveDate>,
        pub tags: Option<Vec<String>>,
        pub color: Option<String>,
        /// Titles of initial subtasks, all created unchecked.
        pub subtasks: Vec<String>,
    }

    /// Partial update: absent fields are left unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateTaskCommand {
        pub title: Option<String>,
        pub description: Option<String>,
        pub status: Option<TaskStatus>,
        pub priority: Option<TaskPriority>,
        pub deadline: Option<NaiveDate>,
        pub progress: Option<u8>,
        pub tags: Option<Vec<String>>,
        pub color: Option<String>,
        pub subtasks: Option<Vec<Subtask>>,
    }

    /// Query parameters for listing tasks.
    #[derive(Debug, Clone, Default)]
    pub struct TaskListFilter {
        pub status: Option<TaskStatus>,
        pub priority: Option<TaskPriority>,
        /// Inclusive deadline range.
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        /// Exact week anchor match (a Monday).
        pub week_start: Option<NaiveDate>,
    }

    impl TaskListFilter {
        /// Stable fingerprint used as the cache-key suffix, so distinct
        /// filters get distinct entries under the same user prefix.
        pub fn cache_key(&self) -> String {
            format!(
                "s={};p={};from={};to={};week={}",
                self.status.map(|s| s.as_str()).unwrap_or("*"),
                self.priority.map(|p| p.as_str()).unwrap_or("*"),
                self.start_date.map(|d| d.to_string()).unwrap_or_default(),
                self.end_date.map(|d| d.to_string()).unwrap_or_default(),
                self.week_start.map(|d| d.to_string()).unwrap_or_default(),
            )
        }
    }
}

pub mod reminders {
    use chrono::{NaiveDate, NaiveTime};

    use crate::domain::models::reminder::{ReminderKind, ReminderStatus, RepeatRule};

    /// Input for creating a new reminder.
    #[derive(Debug, Clone)]
    pub struct CreateReminderCommand {
        pub title: String,
        pub kind: ReminderKind,
        pub amount: Option<f64>,
        pub category_id: Option<String>,
        pub wallet_id: Option<String>,
        pub icon: Option<String>,
        pub reminder_date: NaiveDate,
        pub reminder_time: Option<NaiveTime>,
        /// Defaults to none.
        pub repeat: Option<RepeatRule>,
        pub notes: Option<String>,
        pub color: Option<String>,
        /// Defaults to true.
        pub notification_enabled: Option<bool>,
    }

    /// Partial update: absent fields are left unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateReminderCommand {
        pub title: Option<String>,
        pub kind: Option<ReminderKind>,
        pub amount: Option<f64>,
        pub category_id: Option<String>,
        pub wallet_id: Option<String>,
        pub icon: Option<String>,
        pub reminder_date: Option<NaiveDate>,
        pub reminder_time: Option<NaiveTime>,
        pub repeat: Option<RepeatRule>,
        pub status: Option<ReminderStatus>,
        pub notes: Option<String>,
        pub color: Option<String>,
        pub notification_enabled: Option<bool>,
    }

    /// Query parameters for listing reminders. Only active rows are
    /// ever returned.
    #[derive(Debug, Clone, Default)]
    pub struct ReminderListFilter {
        pub status: Option<ReminderStatus>,
        pub kind: Option<ReminderKind>,
        /// Inclusive reminder-date range.
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    impl ReminderListFilter {
        pub fn cache_key(&self) -> String {
            format!(
                "s={};k={};from={};to={}",
                self.status.map(|s| s.as_str()).unwrap_or("*"),
                self.kind.map(|k| k.as_str()).unwrap_or("*"),
                self.start_date.map(|d| d.to_string()).unwrap_or_default(),
                self.end_date.map(|d| d.to_string()).unwrap_or_default(),
            )
        }
    }
}

pub mod lookups {
    use crate::domain::models::reminder::ReminderKind;

    /// Input for creating a wallet.
    #[derive(Debug, Clone)]
    pub struct CreateWalletCommand {
        pub name: String,
        /// Defaults to "VND".
        pub currency: Option<String>,
        pub icon: Option<String>,
        pub color: Option<String>,
    }

    /// Input for creating a category.
    #[derive(Debug, Clone)]
    pub struct CreateCategoryCommand {
        pub name: String,
        pub kind: ReminderKind,
        pub icon: Option<String>,
        pub color: Option<String>,
    }
}
