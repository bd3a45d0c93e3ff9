use axum::extract::State;
use axum::response::IntoResponse;

use super::AppState;
use crate::controllers::{ApiError, RootController};
use crate::db::Storage;

pub async fn root_route<S: Storage>(State(state): State<AppState<S>>) -> impl IntoResponse {
    RootController::root(&state.manifest)
}

pub async fn fallback_route() -> impl IntoResponse {
    ApiError::RouteNotFound
}

pub async fn method_not_allowed_route() -> impl IntoResponse {
    ApiError::MethodNotAllowed
}
