use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::db::StorageError;
use crate::models::Collection;

/// Wrapper shared by every collection response.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Envelope { success: true, body }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{} was not found", .0.resource_name())]
    NotFound(Collection),
    #[error("Invalid id")]
    InvalidId,
    #[error("Internal server error")]
    Internal,
    #[error("Not found")]
    RouteNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidId(_) => ApiError::InvalidId,
            err => {
                error!("Storage failure: {}", err);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope {
            success: false,
            body: Message {
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}
