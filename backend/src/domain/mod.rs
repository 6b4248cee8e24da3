//! Domain layer: business rules, services and internal command types.
//!
//! Services own the authenticate/query/invalidate flow; storage details
//! stay behind the traits in `crate::storage` and wire concerns stay in
//! `crate::io`.

pub mod commands;
pub mod dates;
pub mod errors;
pub mod export_service;
pub mod lookup_service;
pub mod models;
pub mod preference_service;
pub mod reminder_service;
pub mod session_service;
pub mod task_service;

pub use errors::{ServiceError, ServiceResult};
pub use export_service::ExportService;
pub use lookup_service::LookupService;
pub use preference_service::PreferenceService;
pub use reminder_service::ReminderService;
pub use session_service::SessionService;
pub use task_service::TaskService;
