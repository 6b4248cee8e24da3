//! DTO ↔ domain mapping for reminders.

use crate::domain::commands::reminders::{
    CreateReminderCommand, ReminderListFilter, UpdateReminderCommand,
};
use crate::domain::dates;
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::reminder::{
    Reminder as DomainReminder, ReminderKind as DomainReminderKind,
    ReminderStatus as DomainReminderStatus, RepeatRule as DomainRepeatRule,
};
use chrono::NaiveTime;
use shared::{
    Reminder as SharedReminder, ReminderKind as SharedReminderKind,
    ReminderStatus as SharedReminderStatus, RepeatRule as SharedRepeatRule,
};

use super::task_mapper::parse_optional_date;

pub struct ReminderMapper;

impl ReminderMapper {
    pub fn to_dto(domain: DomainReminder) -> SharedReminder {
        let is_note = domain.is_note();
        SharedReminder {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            kind: Self::to_dto_kind(domain.kind),
            amount: domain.amount,
            category_id: domain.category_id,
            wallet_id: domain.wallet_id,
            icon: domain.icon,
            reminder_date: domain.reminder_date.to_string(),
            reminder_time: domain.reminder_time.map(|t| t.format("%H:%M").to_string()),
            repeat: Self::to_dto_repeat(domain.repeat),
            status: Self::to_dto_status(domain.status),
            notes: domain.notes,
            color: domain.color,
            notification_enabled: domain.notification_enabled,
            is_active: domain.is_active,
            is_note,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(
        dto: shared::CreateReminderRequest,
    ) -> ServiceResult<CreateReminderCommand> {
        Ok(CreateReminderCommand {
            title: dto.title,
            kind: Self::to_domain_kind(dto.kind),
            amount: dto.amount,
            category_id: dto.category_id,
            wallet_id: dto.wallet_id,
            icon: dto.icon,
            reminder_date: dates::parse_civil_date(&dto.reminder_date).ok_or_else(|| {
                ServiceError::Validation(format!("Invalid date: {}", dto.reminder_date))
            })?,
            reminder_time: parse_optional_time(dto.reminder_time)?,
            repeat: dto.repeat.map(Self::to_domain_repeat),
            notes: dto.notes,
            color: dto.color,
            notification_enabled: dto.notification_enabled,
        })
    }

    pub fn to_update_command(
        dto: shared::UpdateReminderRequest,
    ) -> ServiceResult<UpdateReminderCommand> {
        Ok(UpdateReminderCommand {
            title: dto.title,
            kind: dto.kind.map(Self::to_domain_kind),
            amount: dto.amount,
            category_id: dto.category_id,
            wallet_id: dto.wallet_id,
            icon: dto.icon,
            reminder_date: parse_optional_date(dto.reminder_date)?,
            reminder_time: parse_optional_time(dto.reminder_time)?,
            repeat: dto.repeat.map(Self::to_domain_repeat),
            status: dto.status.map(Self::to_domain_status),
            notes: dto.notes,
            color: dto.color,
            notification_enabled: dto.notification_enabled,
        })
    }

    pub fn to_filter(dto: shared::ReminderListRequest) -> ServiceResult<ReminderListFilter> {
        Ok(ReminderListFilter {
            status: dto.status.map(Self::to_domain_status),
            kind: dto.kind.map(Self::to_domain_kind),
            start_date: parse_optional_date(dto.start_date)?,
            end_date: parse_optional_date(dto.end_date)?,
        })
    }

    pub fn to_domain_kind(kind: SharedReminderKind) -> DomainReminderKind {
        match kind {
            SharedReminderKind::Thu => DomainReminderKind::Thu,
            SharedReminderKind::Chi => DomainReminderKind::Chi,
        }
    }

    pub fn to_dto_kind(kind: DomainReminderKind) -> SharedReminderKind {
        match kind {
            DomainReminderKind::Thu => SharedReminderKind::Thu,
            DomainReminderKind::Chi => SharedReminderKind::Chi,
        }
    }

    pub fn to_domain_repeat(repeat: SharedRepeatRule) -> DomainRepeatRule {
        match repeat {
            SharedRepeatRule::None => DomainRepeatRule::None,
            SharedRepeatRule::Daily => DomainRepeatRule::Daily,
            SharedRepeatRule::Weekly => DomainRepeatRule::Weekly,
            SharedRepeatRule::Monthly => DomainRepeatRule::Monthly,
            SharedRepeatRule::Yearly => DomainRepeatRule::Yearly,
        }
    }

    pub fn to_dto_repeat(repeat: DomainRepeatRule) -> SharedRepeatRule {
        match repeat {
            DomainRepeatRule::None => SharedRepeatRule::None,
            DomainRepeatRule::Daily => SharedRepeatRule::Daily,
            DomainRepeatRule::Weekly => SharedRepeatRule::Weekly,
            DomainRepeatRule::Monthly => SharedRepeatRule::Monthly,
            DomainRepeatRule::Yearly => SharedRepeatRule::Yearly,
        }
    }

    pub fn to_domain_status(status: SharedReminderStatus) -> DomainReminderStatus {
        match status {
            SharedReminderStatus::Pending => DomainReminderStatus::Pending,
            SharedReminderStatus::Completed => DomainReminderStatus::Completed,
            SharedReminderStatus::Skipped => DomainReminderStatus::Skipped,
        }
    }

    pub fn to_dto_status(status: DomainReminderStatus) -> SharedReminderStatus {
        match status {
            DomainReminderStatus::Pending => SharedReminderStatus::Pending,
            DomainReminderStatus::Completed => SharedReminderStatus::Completed,
            DomainReminderStatus::Skipped => SharedReminderStatus::Skipped,
        }
    }
}

fn parse_optional_time(value: Option<String>) -> ServiceResult<Option<NaiveTime>> {
    match value {
        None => Ok(None),
        Some(s) => dates::parse_civil_time(&s)
            .map(Some)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid time: {}", s))),
    }
}
