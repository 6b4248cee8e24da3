//! # REST API for Tasks
//!
//! Endpoints for listing, creating, updating and deleting tasks, plus
//! the week/month/approaching derived queries and subtask toggling.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use serde::Deserialize;

use shared::{
    CreateTaskRequest, DeleteTaskResponse, TaskListRequest, TaskListResponse,
    ToggleSubtaskRequest, UpdateTaskRequest,
};

use crate::domain::errors::ServiceError;
use crate::io::rest::error_response;
use crate::io::rest::mappers::TaskMapper;
use crate::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(request): Query<TaskListRequest>,
) -> impl IntoResponse {
    info!("GET /api/tasks - query: {:?}", request);

    let filter = match TaskMapper::to_filter(request) {
        Ok(filter) => filter,
        Err(e) => return error_response("list tasks", e),
    };
    match state.task_service.list_tasks(filter).await {
        Ok(tasks) => {
            let response = TaskListResponse {
                tasks: tasks.into_iter().map(TaskMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list tasks", e),
    }
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> impl IntoResponse {
    info!("POST /api/tasks - title: {:?}", request.title);

    let cmd = match TaskMapper::to_create_command(request) {
        Ok(cmd) => cmd,
        Err(e) => return error_response("create task", e),
    };
    match state.task_service.create_task(cmd).await {
        Ok(task) => (StatusCode::CREATED, Json(TaskMapper::to_dto(task))).into_response(),
        Err(e) => error_response("create task", e),
    }
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/tasks/{}", task_id);

    match state.task_service.get_task(&task_id).await {
        Ok(Some(task)) => (StatusCode::OK, Json(TaskMapper::to_dto(task))).into_response(),
        Ok(None) => error_response("get task", ServiceError::not_found("task")),
        Err(e) => error_response("get task", e),
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> impl IntoResponse {
    info!("PUT /api/tasks/{}", task_id);

    let cmd = match TaskMapper::to_update_command(request) {
        Ok(cmd) => cmd,
        Err(e) => return error_response("update task", e),
    };
    match state.task_service.update_task(&task_id, cmd).await {
        Ok(task) => (StatusCode::OK, Json(TaskMapper::to_dto(task))).into_response(),
        Err(e) => error_response("update task", e),
    }
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/tasks/{}", task_id);

    match state.task_service.delete_task(&task_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteTaskResponse {
                success_message: "Task deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("delete task", e),
    }
}

pub async fn toggle_subtask(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<ToggleSubtaskRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/tasks/{}/subtasks/toggle - subtask: {}",
        task_id, request.subtask_id
    );

    match state
        .task_service
        .toggle_subtask(&task_id, &request.subtask_id)
        .await
    {
        Ok(task) => (StatusCode::OK, Json(TaskMapper::to_dto(task))).into_response(),
        Err(e) => error_response("toggle subtask", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskWeekQuery {
    /// Monday of the requested week, `YYYY-MM-DD`.
    pub monday: String,
}

pub async fn tasks_for_week(
    State(state): State<AppState>,
    Query(query): Query<TaskWeekQuery>,
) -> impl IntoResponse {
    info!("GET /api/tasks/week - monday: {}", query.monday);

    let monday = match crate::domain::dates::parse_civil_date(&query.monday) {
        Some(date) => date,
        None => {
            return error_response(
                "tasks for week",
                ServiceError::Validation(format!("Invalid date: {}", query.monday)),
            )
        }
    };
    match state.task_service.tasks_for_week(monday).await {
        Ok(tasks) => {
            let response = TaskListResponse {
                tasks: tasks.into_iter().map(TaskMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("tasks for week", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskMonthQuery {
    pub year: i32,
    pub month: u32,
}

pub async fn tasks_for_month(
    State(state): State<AppState>,
    Query(query): Query<TaskMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/tasks/month - {}/{}", query.month, query.year);

    match state
        .task_service
        .tasks_for_month(query.year, query.month)
        .await
    {
        Ok(tasks) => {
            let response = TaskListResponse {
                tasks: tasks.into_iter().map(TaskMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("tasks for month", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ApproachingQuery {
    /// Horizon in days; defaults to 7.
    pub days: Option<i64>,
}

pub async fn approaching_deadline(
    State(state): State<AppState>,
    Query(query): Query<ApproachingQuery>,
) -> impl IntoResponse {
    let days = query.days.unwrap_or(7);
    info!("GET /api/tasks/approaching - days: {}", days);

    match state.task_service.approaching_deadline(days).await {
        Ok(tasks) => {
            let response = TaskListResponse {
                tasks: tasks.into_iter().map(TaskMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("approaching deadline", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::AuthUser;
    use crate::storage::sqlite::DbConnection;
    use crate::AppState;

    async fn setup_test_state() -> AppState {
        let connection = DbConnection::init_test().await.unwrap();
        AppState::build(connection)
    }

    fn sign_in(state: &AppState) {
        state.session_service.sign_in(AuthUser {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        });
    }

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
            priority: None,
            deadline: None,
            tags: None,
            color: None,
            subtasks: None,
        }
    }

    #[tokio::test]
    async fn test_create_task_handler() {
        let state = setup_test_state().await;
        sign_in(&state);

        let response = create_task(State(state), Json(create_request("Việc mới"))).await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_task_without_session_is_401() {
        let state = setup_test_state().await;

        let response = create_task(State(state), Json(create_request("no session"))).await;
        assert_eq!(
            response.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_create_task_validation_error() {
        let state = setup_test_state().await;
        sign_in(&state);

        let response = create_task(State(state), Json(create_request(""))).await;
        assert_eq!(
            response.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_get_missing_task_is_404() {
        let state = setup_test_state().await;
        sign_in(&state);

        let response = get_task(State(state), Path("missing".to_string())).await;
        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_tasks_handler() {
        let state = setup_test_state().await;
        sign_in(&state);

        create_task(State(state.clone()), Json(create_request("một")))
            .await
            .into_response();
        let response = list_tasks(State(state), Query(TaskListRequest::default())).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }
}
