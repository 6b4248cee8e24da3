//! Domain model for a task.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db(s: &str) -> Result<Self, String> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn from_db(s: &str) -> Result<Self, String> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            _ => Err(format!("Invalid task priority: {}", s)),
        }
    }

    /// Ordering weight, higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Low => 0,
            TaskPriority::Medium => 1,
            TaskPriority::High => 2,
            TaskPriority::Urgent => 3,
        }
    }
}

/// One checklist item inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Civil date in the UTC+7 calendar.
    pub deadline: Option<NaiveDate>,
    /// 0-100. Derived from subtasks whenever the checklist is non-empty.
    pub progress: u8,
    /// Monday of the deadline's UTC+7 week (of the current week when the
    /// task has no deadline).
    pub week_start_date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
    pub color: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl Task {
    /// True when progress and status must be derived rather than taken
    /// from the caller.
    pub fn has_subtasks(&self) -> bool {
        self.subtasks.as_ref().map_or(false, |s| !s.is_empty())
    }
}

/// Progress derived from a subtask checklist: `round(100 * done / total)`.
///
/// This is the only place the derivation lives; every call site (create,
/// update, toggle) goes through it.
pub fn progress_from_subtasks(subtasks: &[Subtask]) -> u8 {
    if subtasks.is_empty() {
        return 0;
    }
    let completed = subtasks.iter().filter(|s| s.is_completed).count();
    ((completed as f64 / subtasks.len() as f64) * 100.0).round() as u8
}

/// Status derived from progress: 100 is completed, anything started is
/// in progress, untouched is pending.
pub fn status_from_progress(progress: u8) -> TaskStatus {
    match progress {
        100 => TaskStatus::Completed,
        0 => TaskStatus::Pending,
        _ => TaskStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtasks(done: usize, total: usize) -> Vec<Subtask> {
        (0..total)
            .map(|i| Subtask {
                id: format!("st-{}", i),
                title: format!("step {}", i),
                is_completed: i < done,
            })
            .collect()
    }

    #[test]
    fn test_progress_rounds_to_nearest() {
        assert_eq!(progress_from_subtasks(&subtasks(0, 3)), 0);
        assert_eq!(progress_from_subtasks(&subtasks(1, 3)), 33);
        assert_eq!(progress_from_subtasks(&subtasks(2, 3)), 67);
        assert_eq!(progress_from_subtasks(&subtasks(3, 3)), 100);
        assert_eq!(progress_from_subtasks(&subtasks(1, 6)), 17);
        assert_eq!(progress_from_subtasks(&[]), 0);
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(status_from_progress(0), TaskStatus::Pending);
        assert_eq!(status_from_progress(1), TaskStatus::InProgress);
        assert_eq!(status_from_progress(99), TaskStatus::InProgress);
        assert_eq!(status_from_progress(100), TaskStatus::Completed);
    }

    #[test]
    fn test_enum_db_round_trip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(TaskStatus::from_db(status.as_str()), Ok(status));
        }
        for priority in [
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Urgent,
        ] {
            assert_eq!(TaskPriority::from_db(priority.as_str()), Ok(priority));
        }
        assert!(TaskStatus::from_db("archived").is_err());
    }

    #[test]
    fn test_priority_ranking() {
        assert!(TaskPriority::Urgent.rank() > TaskPriority::High.rank());
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
    }
}
