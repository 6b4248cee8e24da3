//! CSV export domain logic.
//!
//! Serializes the current user's tasks or reminders into a CSV document
//! with Vietnamese display labels, a UTF-8 byte-order mark (so
//! spreadsheet tools render the labels correctly) and a timestamped
//! filename. The whole dataset is materialized in memory; record counts
//! are single-user small.

use std::fs;
use std::path::PathBuf;

use log::{error, info};

use shared::{ExportDataResponse, ExportEntity, ExportToPathRequest, ExportToPathResponse};

use crate::domain::commands::reminders::ReminderListFilter;
use crate::domain::commands::tasks::TaskListFilter;
use crate::domain::dates;
use crate::domain::errors::ServiceResult;
use crate::domain::models::reminder::{Reminder, ReminderKind, ReminderStatus, RepeatRule};
use crate::domain::models::task::{Task, TaskPriority, TaskStatus};
use crate::domain::reminder_service::ReminderService;
use crate::domain::task_service::TaskService;

const TASKS_HEADER: &[&str] = &[
    "Tiêu đề",
    "Mô tả",
    "Trạng thái",
    "Ưu tiên",
    "Hạn chót",
    "Tiến độ (%)",
    "Nhãn",
    "Ngày tạo",
    "Ngày hoàn thành",
];

const REMINDERS_HEADER: &[&str] = &[
    "Tiêu đề",
    "Loại",
    "Số tiền",
    "Ngày nhắc",
    "Giờ",
    "Lặp lại",
    "Trạng thái",
    "Ghi chú",
    "Ngày tạo",
];

/// Export service. Stateless; the record services are passed in per
/// call, the way every orchestration-only service here works.
#[derive(Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Export the current user's tasks as CSV content.
    pub async fn export_tasks_csv(
        &self,
        task_service: &TaskService,
    ) -> ServiceResult<ExportDataResponse> {
        let mut tasks = task_service.list_tasks(TaskListFilter::default()).await?;
        // Chronological, oldest first.
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        info!("📄 EXPORT: serializing {} tasks", tasks.len());

        let mut csv_content = String::from("\u{feff}");
        push_row(&mut csv_content, TASKS_HEADER.iter().map(|s| s.to_string()));
        for task in &tasks {
            push_row(&mut csv_content, task_row(task));
        }

        Ok(ExportDataResponse {
            csv_content,
            filename: export_filename("tasks"),
            row_count: tasks.len(),
        })
    }

    /// Export the current user's active reminders as CSV content.
    pub async fn export_reminders_csv(
        &self,
        reminder_service: &ReminderService,
    ) -> ServiceResult<ExportDataResponse> {
        let mut reminders = reminder_service
            .list_reminders(ReminderListFilter::default())
            .await?;
        reminders.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        info!("📄 EXPORT: serializing {} reminders", reminders.len());

        let mut csv_content = String::from("\u{feff}");
        push_row(
            &mut csv_content,
            REMINDERS_HEADER.iter().map(|s| s.to_string()),
        );
        for reminder in &reminders {
            push_row(&mut csv_content, reminder_row(reminder));
        }

        Ok(ExportDataResponse {
            csv_content,
            filename: export_filename("reminders"),
            row_count: reminders.len(),
        })
    }

    /// Write an export to a caller-supplied directory, falling back to
    /// the Documents folder and then the home directory. Filesystem
    /// problems come back as `success: false`, not as errors — the
    /// caller shows the message either way.
    pub async fn export_to_path(
        &self,
        request: ExportToPathRequest,
        task_service: &TaskService,
        reminder_service: &ReminderService,
    ) -> ServiceResult<ExportToPathResponse> {
        let export = match request.entity {
            ExportEntity::Tasks => self.export_tasks_csv(task_service).await?,
            ExportEntity::Reminders => self.export_reminders_csv(reminder_service).await?,
        };

        let export_dir = match request.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(sanitize_path(&custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("📄 EXPORT: could not determine an export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        row_count: 0,
                    });
                }
            },
        };

        let file_path = export_dir.join(&export.filename);
        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!(
                "📄 EXPORT: failed to create export directory {:?}: {}",
                export_dir, e
            );
            return Ok(ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                row_count: 0,
            });
        }

        match fs::write(&file_path, &export.csv_content) {
            Ok(()) => {
                let file_path = file_path.to_string_lossy().to_string();
                info!(
                    "📄 EXPORT: wrote {} rows to {}",
                    export.row_count, file_path
                );
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path),
                    file_path,
                    row_count: export.row_count,
                })
            }
            Err(e) => {
                error!("📄 EXPORT: failed to write {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    row_count: 0,
                })
            }
        }
    }
}

/// Standard CSV quoting: a field containing a comma, double quote or
/// newline is wrapped in double quotes with interior quotes doubled.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<I: Iterator<Item = String>>(out: &mut String, fields: I) {
    let row: Vec<String> = fields.map(|f| escape_field(&f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

fn task_row(task: &Task) -> impl Iterator<Item = String> {
    vec![
        task.title.clone(),
        task.description.clone().unwrap_or_default(),
        task_status_label(task.status).to_string(),
        priority_label(task.priority).to_string(),
        task.deadline.map(|d| d.to_string()).unwrap_or_default(),
        task.progress.to_string(),
        task.tags
            .as_ref()
            .map(|tags| tags.join("; "))
            .unwrap_or_default(),
        task.created_at.format("%Y-%m-%d %H:%M").to_string(),
        task.completed_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    ]
    .into_iter()
}

fn reminder_row(reminder: &Reminder) -> impl Iterator<Item = String> {
    vec![
        reminder.title.clone(),
        kind_label(reminder.kind).to_string(),
        reminder
            .amount
            .map(|a| format!("{:.2}", a))
            .unwrap_or_default(),
        reminder.reminder_date.to_string(),
        reminder
            .reminder_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default(),
        repeat_label(reminder.repeat).to_string(),
        reminder_status_label(reminder.status).to_string(),
        reminder.notes.clone().unwrap_or_default(),
        reminder.created_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
    .into_iter()
}

fn export_filename(entity: &str) -> String {
    format!("{}_{}.csv", entity, dates::now().format("%Y%m%d"))
}

fn task_status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "Chờ xử lý",
        TaskStatus::InProgress => "Đang thực hiện",
        TaskStatus::Completed => "Hoàn thành",
        TaskStatus::Cancelled => "Đã hủy",
    }
}

fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "Thấp",
        TaskPriority::Medium => "Trung bình",
        TaskPriority::High => "Cao",
        TaskPriority::Urgent => "Khẩn cấp",
    }
}

fn kind_label(kind: ReminderKind) -> &'static str {
    match kind {
        ReminderKind::Thu => "Thu nhập",
        ReminderKind::Chi => "Chi tiêu",
    }
}

fn repeat_label(repeat: RepeatRule) -> &'static str {
    match repeat {
        RepeatRule::None => "Không lặp",
        RepeatRule::Daily => "Hàng ngày",
        RepeatRule::Weekly => "Hàng tuần",
        RepeatRule::Monthly => "Hàng tháng",
        RepeatRule::Yearly => "Hàng năm",
    }
}

fn reminder_status_label(status: ReminderStatus) -> &'static str {
    match status {
        ReminderStatus::Pending => "Chờ xử lý",
        ReminderStatus::Completed => "Hoàn thành",
        ReminderStatus::Skipped => "Đã bỏ qua",
    }
}

/// Clean up a user-supplied directory path: surrounding quotes, escaped
/// spaces, trailing separators, tilde expansion.
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    if (cleaned.starts_with('"') && cleaned.ends_with('"') && cleaned.len() >= 2)
        || (cleaned.starts_with('\'') && cleaned.ends_with('\'') && cleaned.len() >= 2)
    {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }
    cleaned = cleaned.trim().to_string();
    cleaned = cleaned.replace("\\ ", " ");
    while cleaned.ends_with('/') || cleaned.ends_with('\\') {
        cleaned.pop();
    }

    if cleaned.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            if cleaned == "~" {
                cleaned = home.to_string_lossy().to_string();
            } else if cleaned.starts_with("~/") {
                cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
            }
        }
    }

    cleaned
}
