//! # Storage Traits
//!
//! Abstraction over the remote table store. The domain layer only sees
//! these traits, so the SQLite stand-in used here could be swapped for
//! any Postgres-compatible backend without touching the services.
//!
//! Every operation is scoped to a user id; an absent row is `Ok(None)`
//! or `Ok(false)`, never an error.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::commands::reminders::ReminderListFilter;
use crate::domain::commands::tasks::TaskListFilter;
use crate::domain::models::lookup::{Category, Wallet};
use crate::domain::models::reminder::Reminder;
use crate::domain::models::task::Task;

/// Task rows. Tasks are the one entity that is hard-deleted.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &Task) -> Result<()>;

    async fn get_task(&self, user_id: &str, task_id: &str) -> Result<Option<Task>>;

    /// Unordered; the service applies the display order.
    async fn list_tasks(&self, user_id: &str, filter: &TaskListFilter) -> Result<Vec<Task>>;

    /// Full-row update keyed on (id, user_id). Returns false when no
    /// row matched — a foreign row looks exactly like a missing one.
    async fn update_task(&self, task: &Task) -> Result<bool>;

    /// Returns false when no row matched.
    async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<bool>;
}

/// Reminder rows. Never deleted here: the soft-delete flag travels
/// through `update_reminder` like any other field.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn insert_reminder(&self, reminder: &Reminder) -> Result<()>;

    /// Fetches regardless of the active flag, so the service can see
    /// soft-deleted rows.
    async fn get_reminder(&self, user_id: &str, reminder_id: &str) -> Result<Option<Reminder>>;

    /// Active rows only. Unordered; the service applies the display
    /// order.
    async fn list_reminders(
        &self,
        user_id: &str,
        filter: &ReminderListFilter,
    ) -> Result<Vec<Reminder>>;

    /// Full-row update keyed on (id, user_id). Returns false when no
    /// row matched.
    async fn update_reminder(&self, reminder: &Reminder) -> Result<bool>;
}

/// Wallet and category lookup tables.
#[async_trait]
pub trait LookupStore: Send + Sync {
    async fn insert_wallet(&self, wallet: &Wallet) -> Result<()>;
    async fn get_wallet(&self, user_id: &str, wallet_id: &str) -> Result<Option<Wallet>>;
    /// Ordered by name.
    async fn list_wallets(&self, user_id: &str) -> Result<Vec<Wallet>>;

    async fn insert_category(&self, category: &Category) -> Result<()>;
    async fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>>;
    /// Ordered by name.
    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;
}

/// Per-user string key/values for UI preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get_preference(&self, user_id: &str, key: &str) -> Result<Option<String>>;

    /// Upsert.
    async fn set_preference(&self, user_id: &str, key: &str, value: &str) -> Result<()>;

    /// Returns whether a value existed.
    async fn delete_preference(&self, user_id: &str, key: &str) -> Result<bool>;
}
