//! # Pocket Planner Backend
//!
//! Service crate for a personal finance and planning app: tasks,
//! reminders/notes, wallet and category lookups, UI preferences and CSV
//! export, all presented in a fixed UTC+7 civil calendar.
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (services, models, commands)
//!     ↓
//! Storage Layer (traits, SQLite repositories)
//! ```
//!
//! Services are constructed once in [`initialize_backend`] and handed
//! their dependencies explicitly — there is no process-wide mutable
//! state beyond what the services own.

pub mod cache;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::cache::Cache;
use crate::domain::{
    ExportService, LookupService, PreferenceService, ReminderService, SessionService, TaskService,
};
use crate::storage::sqlite::{
    DbConnection, LookupRepository, PreferenceRepository, ReminderRepository, TaskRepository,
};

/// Main application state that holds all services.
#[derive(Clone)]
pub struct AppState {
    pub session_service: SessionService,
    pub task_service: TaskService,
    pub reminder_service: ReminderService,
    pub lookup_service: LookupService,
    pub preference_service: PreferenceService,
    pub export_service: ExportService,
}

impl AppState {
    /// Wire every service against one connection, one cache and one
    /// session.
    pub fn build(connection: DbConnection) -> Self {
        let cache = Cache::new();
        let session_service = SessionService::new();

        let task_service = TaskService::new(
            Arc::new(TaskRepository::new(connection.clone())),
            session_service.clone(),
            cache.clone(),
        );
        let reminder_service = ReminderService::new(
            Arc::new(ReminderRepository::new(connection.clone())),
            session_service.clone(),
            cache.clone(),
        );
        let lookup_service = LookupService::new(
            Arc::new(LookupRepository::new(connection.clone())),
            session_service.clone(),
            cache,
        );
        let preference_service = PreferenceService::new(
            Arc::new(PreferenceRepository::new(connection)),
            session_service.clone(),
        );

        AppState {
            session_service,
            task_service,
            reminder_service,
            lookup_service,
            preference_service,
            export_service: ExportService::new(),
        }
    }
}

/// Initialize the backend with all required services.
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let connection = DbConnection::init().await?;

    info!("Setting up application state");
    Ok(AppState::build(connection))
}

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup so the mobile-web frontend can make requests.
    let allowed_origin = std::env::var("PLANNER_ALLOWED_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());
    let cors = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&allowed_origin)
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:8080")),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/session",
            post(io::sign_in).get(io::current_session).delete(io::sign_out),
        )
        .route("/tasks", get(io::list_tasks).post(io::create_task))
        .route("/tasks/week", get(io::tasks_for_week))
        .route("/tasks/month", get(io::tasks_for_month))
        .route("/tasks/approaching", get(io::approaching_deadline))
        .route(
            "/tasks/:id",
            get(io::get_task).put(io::update_task).delete(io::delete_task),
        )
        .route("/tasks/:id/subtasks/toggle", post(io::toggle_subtask))
        .route(
            "/reminders",
            get(io::list_reminders).post(io::create_reminder),
        )
        .route("/reminders/week", get(io::reminders_for_week))
        .route("/reminders/month", get(io::reminders_for_month))
        .route("/reminders/upcoming", get(io::upcoming_reminders))
        .route(
            "/reminders/:id",
            get(io::get_reminder)
                .put(io::update_reminder)
                .delete(io::delete_reminder),
        )
        .route("/reminders/:id/complete", post(io::complete_reminder))
        .route("/reminders/:id/skip", post(io::skip_reminder))
        .route("/wallets", get(io::list_wallets).post(io::create_wallet))
        .route(
            "/categories",
            get(io::list_categories).post(io::create_category),
        )
        .route("/preferences", post(io::set_preference))
        .route(
            "/preferences/:key",
            get(io::get_preference).delete(io::delete_preference),
        )
        .route("/export", get(io::export_data))
        .route("/export/path", post(io::export_to_path));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
