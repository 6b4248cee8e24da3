//! Wire types shared between the pocket-planner backend and its clients.
//!
//! Everything in this crate is plain serde data: dates travel as strings
//! (RFC 3339 for timestamps, `YYYY-MM-DD` for civil dates, `HH:MM` for
//! times) and all business rules live in the backend's domain layer.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Scheduling priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A single checklist item inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// ID of the user this task belongs to
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Deadline as a civil date in the UTC+7 calendar (`YYYY-MM-DD`)
    pub deadline: Option<String>,
    /// Completion percentage, 0-100. Derived from subtasks when present.
    pub progress: u8,
    /// Monday of the deadline's week in the UTC+7 calendar (`YYYY-MM-DD`)
    pub week_start_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last-update timestamp (RFC 3339)
    pub updated_at: String,
    /// Completion timestamp (RFC 3339), present once status is completed
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium` when not supplied
    pub priority: Option<TaskPriority>,
    /// Civil date (`YYYY-MM-DD`)
    pub deadline: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color: Option<String>,
    /// Titles of initial subtasks, all created unchecked
    pub subtasks: Option<Vec<String>>,
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub deadline: Option<String>,
    pub progress: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub color: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskListRequest {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// Inclusive deadline range start (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Inclusive deadline range end (`YYYY-MM-DD`)
    pub end_date: Option<String>,
    /// Exact week anchor match (`YYYY-MM-DD`, a Monday)
    pub week_start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleSubtaskRequest {
    pub subtask_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

/// Financial direction of a reminder, using the source convention:
/// `Thu` is income, `Chi` is expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    Thu,
    Chi,
}

/// Repeat cadence of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatRule {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Completed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    /// ID of the user this reminder belongs to
    pub user_id: String,
    pub title: String,
    pub kind: ReminderKind,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub wallet_id: Option<String>,
    pub icon: Option<String>,
    /// Civil date the reminder fires on (`YYYY-MM-DD`)
    pub reminder_date: String,
    /// Optional wall-clock time (`HH:MM`)
    pub reminder_time: Option<String>,
    pub repeat: RepeatRule,
    pub status: ReminderStatus,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub notification_enabled: bool,
    /// Soft-delete marker: inactive reminders are hidden, not removed
    pub is_active: bool,
    /// Derived: true when amount, category and wallet are all absent
    pub is_note: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub title: String,
    pub kind: ReminderKind,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub wallet_id: Option<String>,
    pub icon: Option<String>,
    /// Civil date (`YYYY-MM-DD`)
    pub reminder_date: String,
    /// `HH:MM`
    pub reminder_time: Option<String>,
    /// Defaults to `none` when not supplied
    pub repeat: Option<RepeatRule>,
    pub notes: Option<String>,
    pub color: Option<String>,
    /// Defaults to true when not supplied
    pub notification_enabled: Option<bool>,
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateReminderRequest {
    pub title: Option<String>,
    pub kind: Option<ReminderKind>,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub wallet_id: Option<String>,
    pub icon: Option<String>,
    pub reminder_date: Option<String>,
    pub reminder_time: Option<String>,
    pub repeat: Option<RepeatRule>,
    pub status: Option<ReminderStatus>,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub notification_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderListRequest {
    pub status: Option<ReminderStatus>,
    pub kind: Option<ReminderKind>,
    /// Inclusive reminder-date range start (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Inclusive reminder-date range end (`YYYY-MM-DD`)
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderListResponse {
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteReminderResponse {
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Wallets and categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// ISO 4217 code, e.g. "VND"
    pub currency: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Whether the category classifies income (`Thu`) or expense (`Chi`)
    pub kind: ReminderKind,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub name: String,
    pub currency: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub kind: ReminderKind,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletListResponse {
    pub wallets: Vec<Wallet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPreferenceRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceResponse {
    pub key: String,
    pub value: Option<String>,
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Which record set an export request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportEntity {
    Tasks,
    Reminders,
}

/// CSV content produced in memory, ready to download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    /// `<entity>_<YYYYMMDD>.csv`
    pub filename: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    pub entity: ExportEntity,
    /// Target directory; falls back to the Documents folder when absent
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub row_count: usize,
}
