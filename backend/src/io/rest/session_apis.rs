//! # REST API for the session.
//!
//! Credential verification is the hosted auth provider's job; these
//! endpoints only cache and drop the identity it returned.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use shared::{SessionResponse, SignInRequest};

use crate::domain::models::user::AuthUser;
use crate::io::rest::error_response;
use crate::AppState;

pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> impl IntoResponse {
    info!("POST /api/session - user: {}", request.user_id);

    state.session_service.sign_in(AuthUser {
        id: request.user_id.clone(),
        email: request.email.clone(),
    });
    (
        StatusCode::OK,
        Json(SessionResponse {
            user_id: request.user_id,
            email: request.email,
            success_message: "Signed in".to_string(),
        }),
    )
        .into_response()
}

pub async fn sign_out(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/session");

    state.session_service.sign_out();
    StatusCode::NO_CONTENT.into_response()
}

pub async fn current_session(State(state): State<AppState>) -> impl IntoResponse {
    match state.session_service.current_user() {
        Ok(user) => (
            StatusCode::OK,
            Json(SessionResponse {
                user_id: user.id,
                email: user.email,
                success_message: "Session active".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("current session", e),
    }
}
