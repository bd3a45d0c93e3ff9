use axum::extract::{Path, State, rejection::PathRejection};
use axum::response::{IntoResponse, Response};

use super::AppState;
use crate::controllers::{ApiError, RecordController};
use crate::db::Storage;
use crate::models::Document;

pub async fn list_route<S: Storage, D: Document>(State(state): State<AppState<S>>) -> Response {
    RecordController::list::<S, D>(&state.store).await
}

pub async fn find_route<S: Storage, D: Document>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    // An id that is not even valid UTF-8 is just another malformed id.
    match id {
        Ok(Path(id)) => RecordController::find::<S, D>(&state.store, &id).await,
        Err(_) => ApiError::InvalidId.into_response(),
    }
}
