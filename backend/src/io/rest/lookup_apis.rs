//! # REST API for wallets and categories.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use shared::{
    CategoryListResponse, CreateCategoryRequest, CreateWalletRequest, WalletListResponse,
};

use crate::io::rest::error_response;
use crate::io::rest::mappers::LookupMapper;
use crate::AppState;

pub async fn list_wallets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/wallets");

    match state.lookup_service.list_wallets().await {
        Ok(wallets) => {
            let response = WalletListResponse {
                wallets: wallets.into_iter().map(LookupMapper::wallet_to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list wallets", e),
    }
}

pub async fn create_wallet(
    State(state): State<AppState>,
    Json(request): Json<CreateWalletRequest>,
) -> impl IntoResponse {
    info!("POST /api/wallets - name: {:?}", request.name);

    let cmd = LookupMapper::to_create_wallet_command(request);
    match state.lookup_service.create_wallet(cmd).await {
        Ok(wallet) => {
            (StatusCode::CREATED, Json(LookupMapper::wallet_to_dto(wallet))).into_response()
        }
        Err(e) => error_response("create wallet", e),
    }
}

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");

    match state.lookup_service.list_categories().await {
        Ok(categories) => {
            let response = CategoryListResponse {
                categories: categories
                    .into_iter()
                    .map(LookupMapper::category_to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list categories", e),
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/categories - name: {:?}", request.name);

    let cmd = LookupMapper::to_create_category_command(request);
    match state.lookup_service.create_category(cmd).await {
        Ok(category) => (
            StatusCode::CREATED,
            Json(LookupMapper::category_to_dto(category)),
        )
            .into_response(),
        Err(e) => error_response("create category", e),
    }
}
