//! DTO ↔ domain mapping for tasks.

use crate::domain::commands::tasks::{CreateTaskCommand, TaskListFilter, UpdateTaskCommand};
use crate::domain::dates;
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::task::{
    Subtask as DomainSubtask, Task as DomainTask, TaskPriority as DomainTaskPriority,
    TaskStatus as DomainTaskStatus,
};
use chrono::NaiveDate;
use shared::{
    Subtask as SharedSubtask, Task as SharedTask, TaskPriority as SharedTaskPriority,
    TaskStatus as SharedTaskStatus,
};

pub struct TaskMapper;

impl TaskMapper {
    pub fn to_dto(domain: DomainTask) -> SharedTask {
        SharedTask {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            status: Self::to_dto_status(domain.status),
            priority: Self::to_dto_priority(domain.priority),
            deadline: domain.deadline.map(|d| d.to_string()),
            progress: domain.progress,
            week_start_date: domain.week_start_date.map(|d| d.to_string()),
            tags: domain.tags,
            color: domain.color,
            subtasks: domain.subtasks.map(|subtasks| {
                subtasks
                    .into_iter()
                    .map(|s| SharedSubtask {
                        id: s.id,
                        title: s.title,
                        is_completed: s.is_completed,
                    })
                    .collect()
            }),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
            completed_at: domain.completed_at.map(|d| d.to_rfc3339()),
        }
    }

    pub fn to_create_command(dto: shared::CreateTaskRequest) -> ServiceResult<CreateTaskCommand> {
        Ok(CreateTaskCommand {
            title: dto.title,
            description: dto.description,
            priority: dto.priority.map(Self::to_domain_priority),
            deadline: parse_optional_date(dto.deadline)?,
            tags: dto.tags,
            color: dto.color,
            subtasks: dto.subtasks.unwrap_or_default(),
        })
    }

    pub fn to_update_command(dto: shared::UpdateTaskRequest) -> ServiceResult<UpdateTaskCommand> {
        Ok(UpdateTaskCommand {
            title: dto.title,
            description: dto.description,
            status: dto.status.map(Self::to_domain_status),
            priority: dto.priority.map(Self::to_domain_priority),
            deadline: parse_optional_date(dto.deadline)?,
            progress: dto.progress,
            tags: dto.tags,
            color: dto.color,
            subtasks: dto.subtasks.map(|subtasks| {
                subtasks
                    .into_iter()
                    .map(|s| DomainSubtask {
                        id: s.id,
                        title: s.title,
                        is_completed: s.is_completed,
                    })
                    .collect()
            }),
        })
    }

    pub fn to_filter(dto: shared::TaskListRequest) -> ServiceResult<TaskListFilter> {
        Ok(TaskListFilter {
            status: dto.status.map(Self::to_domain_status),
            priority: dto.priority.map(Self::to_domain_priority),
            start_date: parse_optional_date(dto.start_date)?,
            end_date: parse_optional_date(dto.end_date)?,
            week_start: parse_optional_date(dto.week_start)?,
        })
    }

    pub fn to_domain_status(status: SharedTaskStatus) -> DomainTaskStatus {
        match status {
            SharedTaskStatus::Pending => DomainTaskStatus::Pending,
            SharedTaskStatus::InProgress => DomainTaskStatus::InProgress,
            SharedTaskStatus::Completed => DomainTaskStatus::Completed,
            SharedTaskStatus::Cancelled => DomainTaskStatus::Cancelled,
        }
    }

    pub fn to_dto_status(status: DomainTaskStatus) -> SharedTaskStatus {
        match status {
            DomainTaskStatus::Pending => SharedTaskStatus::Pending,
            DomainTaskStatus::InProgress => SharedTaskStatus::InProgress,
            DomainTaskStatus::Completed => SharedTaskStatus::Completed,
            DomainTaskStatus::Cancelled => SharedTaskStatus::Cancelled,
        }
    }

    pub fn to_domain_priority(priority: SharedTaskPriority) -> DomainTaskPriority {
        match priority {
            SharedTaskPriority::Low => DomainTaskPriority::Low,
            SharedTaskPriority::Medium => DomainTaskPriority::Medium,
            SharedTaskPriority::High => DomainTaskPriority::High,
            SharedTaskPriority::Urgent => DomainTaskPriority::Urgent,
        }
    }

    pub fn to_dto_priority(priority: DomainTaskPriority) -> SharedTaskPriority {
        match priority {
            DomainTaskPriority::Low => SharedTaskPriority::Low,
            DomainTaskPriority::Medium => SharedTaskPriority::Medium,
            DomainTaskPriority::High => SharedTaskPriority::High,
            DomainTaskPriority::Urgent => SharedTaskPriority::Urgent,
        }
    }
}

/// Parse an optional `YYYY-MM-DD` string, rejecting malformed input.
pub(crate) fn parse_optional_date(value: Option<String>) -> ServiceResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(s) => dates::parse_civil_date(&s)
            .map(Some)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid date: {}", s))),
    }
}
