//! Reminder service domain logic.
//!
//! Reminders follow the same authenticate/query/invalidate shape as
//! tasks, with one deliberate difference: deleting a reminder is a soft
//! delete (the `is_active` flag flips), never a row removal.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

use crate::cache::Cache;
use crate::domain::commands::reminders::{
    CreateReminderCommand, ReminderListFilter, UpdateReminderCommand,
};
use crate::domain::dates;
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::reminder::{Reminder, ReminderStatus, RepeatRule};
use crate::domain::session_service::SessionService;
use crate::storage::traits::ReminderStore;

const LIST_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct ReminderService {
    store: Arc<dyn ReminderStore>,
    session: SessionService,
    cache: Cache,
}

impl ReminderService {
    pub fn new(store: Arc<dyn ReminderStore>, session: SessionService, cache: Cache) -> Self {
        Self {
            store,
            session,
            cache,
        }
    }

    fn cache_prefix(user_id: &str) -> String {
        format!("reminders:{}:", user_id)
    }

    /// List the current user's active reminders, cache-first. Ordered by
    /// reminder date ascending, then time ascending (untimed rows last),
    /// then creation descending.
    pub async fn list_reminders(&self, filter: ReminderListFilter) -> ServiceResult<Vec<Reminder>> {
        let user = self.session.current_user()?;
        let key = format!("{}list:{}", Self::cache_prefix(&user.id), filter.cache_key());

        let store = self.store.clone();
        let user_id = user.id.clone();
        self.cache
            .fetch(&key, LIST_TTL, || async move {
                let mut reminders = store.list_reminders(&user_id, &filter).await?;
                sort_reminders(&mut reminders);
                Ok(reminders)
            })
            .await
    }

    pub async fn get_reminder(&self, reminder_id: &str) -> ServiceResult<Option<Reminder>> {
        let user = self.session.current_user()?;
        Ok(self.store.get_reminder(&user.id, reminder_id).await?)
    }

    pub async fn create_reminder(&self, cmd: CreateReminderCommand) -> ServiceResult<Reminder> {
        let user = self.session.current_user()?;
        validate_title(&cmd.title)?;
        if let Some(amount) = cmd.amount {
            if amount < 0.0 {
                return Err(ServiceError::Validation(
                    "Amount must not be negative".to_string(),
                ));
            }
        }

        let now = dates::now();
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            title: cmd.title,
            kind: cmd.kind,
            amount: cmd.amount,
            category_id: cmd.category_id,
            wallet_id: cmd.wallet_id,
            icon: cmd.icon,
            reminder_date: cmd.reminder_date,
            reminder_time: cmd.reminder_time,
            repeat: cmd.repeat.unwrap_or(RepeatRule::None),
            status: ReminderStatus::Pending,
            notes: cmd.notes,
            color: cmd.color,
            notification_enabled: cmd.notification_enabled.unwrap_or(true),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_reminder(&reminder).await?;
        let created = self
            .store
            .get_reminder(&user.id, &reminder.id)
            .await?
            .ok_or_else(|| {
                ServiceError::Storage(anyhow::anyhow!(
                    "storage returned no row for created reminder"
                ))
            })?;

        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        info!("Created reminder {} for user {}", created.id, user.id);
        Ok(created)
    }

    /// Partial update. A row owned by another user comes back as
    /// NotFound, never as a permission error.
    pub async fn update_reminder(
        &self,
        reminder_id: &str,
        cmd: UpdateReminderCommand,
    ) -> ServiceResult<Reminder> {
        let user = self.session.current_user()?;
        let mut reminder = self
            .store
            .get_reminder(&user.id, reminder_id)
            .await?
            .ok_or(ServiceError::not_found("reminder"))?;

        if let Some(title) = cmd.title {
            validate_title(&title)?;
            reminder.title = title;
        }
        if let Some(kind) = cmd.kind {
            reminder.kind = kind;
        }
        if let Some(amount) = cmd.amount {
            if amount < 0.0 {
                return Err(ServiceError::Validation(
                    "Amount must not be negative".to_string(),
                ));
            }
            reminder.amount = Some(amount);
        }
        if let Some(category_id) = cmd.category_id {
            reminder.category_id = Some(category_id);
        }
        if let Some(wallet_id) = cmd.wallet_id {
            reminder.wallet_id = Some(wallet_id);
        }
        if let Some(icon) = cmd.icon {
            reminder.icon = Some(icon);
        }
        if let Some(date) = cmd.reminder_date {
            reminder.reminder_date = date;
        }
        if let Some(time) = cmd.reminder_time {
            reminder.reminder_time = Some(time);
        }
        if let Some(repeat) = cmd.repeat {
            reminder.repeat = repeat;
        }
        if let Some(status) = cmd.status {
            reminder.status = status;
        }
        if let Some(notes) = cmd.notes {
            reminder.notes = Some(notes);
        }
        if let Some(color) = cmd.color {
            reminder.color = Some(color);
        }
        if let Some(enabled) = cmd.notification_enabled {
            reminder.notification_enabled = enabled;
        }

        reminder.updated_at = dates::now();
        if !self.store.update_reminder(&reminder).await? {
            return Err(ServiceError::not_found("reminder"));
        }

        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        Ok(reminder)
    }

    /// Convenience status update.
    pub async fn complete(&self, reminder_id: &str) -> ServiceResult<Reminder> {
        self.update_reminder(
            reminder_id,
            UpdateReminderCommand {
                status: Some(ReminderStatus::Completed),
                ..UpdateReminderCommand::default()
            },
        )
        .await
    }

    /// Convenience status update.
    pub async fn skip(&self, reminder_id: &str) -> ServiceResult<Reminder> {
        self.update_reminder(
            reminder_id,
            UpdateReminderCommand {
                status: Some(ReminderStatus::Skipped),
                ..UpdateReminderCommand::default()
            },
        )
        .await
    }

    /// Soft delete: flips is_active, the row stays.
    pub async fn delete_reminder(&self, reminder_id: &str) -> ServiceResult<()> {
        let user = self.session.current_user()?;
        let mut reminder = self
            .store
            .get_reminder(&user.id, reminder_id)
            .await?
            .ok_or(ServiceError::not_found("reminder"))?;

        reminder.is_active = false;
        reminder.updated_at = dates::now();
        if !self.store.update_reminder(&reminder).await? {
            return Err(ServiceError::not_found("reminder"));
        }

        self.cache.invalidate_prefix(&Self::cache_prefix(&user.id));
        info!("Soft-deleted reminder {} for user {}", reminder_id, user.id);
        Ok(())
    }

    /// Reminders falling inside the week starting at `monday`.
    pub async fn reminders_for_week(&self, monday: NaiveDate) -> ServiceResult<Vec<Reminder>> {
        self.list_reminders(ReminderListFilter {
            start_date: Some(monday),
            end_date: Some(monday + chrono::Duration::days(6)),
            ..ReminderListFilter::default()
        })
        .await
    }

    /// Reminders falling inside the given month.
    pub async fn reminders_for_month(&self, year: i32, month: u32) -> ServiceResult<Vec<Reminder>> {
        let first = dates::first_of_month(year, month)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid month: {}/{}", month, year)))?;
        let last = dates::last_of_month(year, month)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid month: {}/{}", month, year)))?;
        self.list_reminders(ReminderListFilter {
            start_date: Some(first),
            end_date: Some(last),
            ..ReminderListFilter::default()
        })
        .await
    }

    /// Pending reminders due within the next `within_days` days.
    pub async fn upcoming(&self, within_days: i64) -> ServiceResult<Vec<Reminder>> {
        let today = dates::civil_date(&dates::now());
        self.list_reminders(ReminderListFilter {
            status: Some(ReminderStatus::Pending),
            start_date: Some(today),
            end_date: Some(today + chrono::Duration::days(within_days)),
            ..ReminderListFilter::default()
        })
        .await
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

fn sort_reminders(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| {
        let by_time = match (a.reminder_time, b.reminder_time) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        a.reminder_date
            .cmp(&b.reminder_date)
            .then(by_time)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
