use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::envelope::{ApiError, Envelope};
use crate::db::Storage;
use crate::models::Document;

/// Read side of a collection, one storage call per request.
pub struct RecordController;

impl RecordController {
    pub async fn list<S: Storage, D: Document>(store: &S) -> Response {
        match store.list_all::<D>().await {
            Ok(records) => Envelope::ok(records).into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }

    pub async fn find<S: Storage, D: Document>(store: &S, id: &str) -> Response {
        match store.find_by_id::<D>(id).await {
            Ok(Some(record)) => {
                debug!("{} {} found", D::COLLECTION.resource_name(), record.record_id);
                Envelope::ok(record).into_response()
            }
            Ok(None) => ApiError::NotFound(D::COLLECTION).into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}
