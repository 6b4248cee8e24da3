//! Domain model for a reminder.
//!
//! Reminders double as notes and plans by convention: a reminder with no
//! amount, category and wallet is displayed as a note. There is no
//! persisted discriminator for this, so the classification is a derived
//! predicate (`is_note`) and nothing else.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Financial direction, in the source convention: `Thu` income,
/// `Chi` expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    Thu,
    Chi,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Thu => "Thu",
            ReminderKind::Chi => "Chi",
        }
    }

    pub fn from_db(s: &str) -> Result<Self, String> {
        match s {
            "Thu" => Ok(ReminderKind::Thu),
            "Chi" => Ok(ReminderKind::Chi),
            _ => Err(format!("Invalid reminder kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatRule {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatRule::None => "none",
            RepeatRule::Daily => "daily",
            RepeatRule::Weekly => "weekly",
            RepeatRule::Monthly => "monthly",
            RepeatRule::Yearly => "yearly",
        }
    }

    pub fn from_db(s: &str) -> Result<Self, String> {
        match s {
            "none" => Ok(RepeatRule::None),
            "daily" => Ok(RepeatRule::Daily),
            "weekly" => Ok(RepeatRule::Weekly),
            "monthly" => Ok(RepeatRule::Monthly),
            "yearly" => Ok(RepeatRule::Yearly),
            _ => Err(format!("Invalid repeat rule: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    Pending,
    Completed,
    Skipped,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Completed => "completed",
            ReminderStatus::Skipped => "skipped",
        }
    }

    pub fn from_db(s: &str) -> Result<Self, String> {
        match s {
            "pending" => Ok(ReminderStatus::Pending),
            "completed" => Ok(ReminderStatus::Completed),
            "skipped" => Ok(ReminderStatus::Skipped),
            _ => Err(format!("Invalid reminder status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub kind: ReminderKind,
    pub amount: Option<f64>,
    pub category_id: Option<String>,
    pub wallet_id: Option<String>,
    pub icon: Option<String>,
    /// Civil date in the UTC+7 calendar.
    pub reminder_date: NaiveDate,
    pub reminder_time: Option<NaiveTime>,
    pub repeat: RepeatRule,
    pub status: ReminderStatus,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub notification_enabled: bool,
    /// Soft-delete marker. Deleting a reminder flips this to false;
    /// the row is never removed.
    pub is_active: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Reminder {
    /// A reminder with no financial fields is displayed as a note.
    ///
    /// This is the source's heuristic, kept as-is: a genuine reminder
    /// created without an amount is indistinguishable from a note.
    pub fn is_note(&self) -> bool {
        self.amount.is_none() && self.category_id.is_none() && self.wallet_id.is_none()
    }
}
