use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use thiserror::Error;

use crate::models::{Document, RecordId};

pub mod memory;
pub mod postgres;

pub use memory::MemoryDatabase;
pub use postgres::Database;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid record id: {0}")]
    InvalidId(String),
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("document encoding error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A record as it sits in storage: its assigned id next to the dataset fields.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Stored<D> {
    #[serde(rename = "_id")]
    pub record_id: RecordId,
    #[serde(flatten)]
    pub data: D,
}

impl<'r, D> FromRow<'r, PgRow> for Stored<D>
where
    D: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Stored {
            record_id: row.try_get("record_id")?,
            data: D::from_row(row)?,
        })
    }
}

/// Collection level access shared by every backend.
///
/// The collection is picked by the document type, e.g. `store.list_all::<Song>()`.
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Every record of the collection, in insertion order.
    async fn list_all<D: Document>(&self) -> Result<Vec<Stored<D>>, StorageError>;

    /// Returns Ok(None) if no record has this id and
    /// `StorageError::InvalidId` if `id` is not a record id at all.
    async fn find_by_id<D: Document>(&self, id: &str) -> Result<Option<Stored<D>>, StorageError>;

    /// Empties the collection, returning how many records were removed.
    async fn delete_all<D: Document>(&self) -> Result<u64, StorageError>;

    async fn insert<D: Document>(&self, record: D) -> Result<RecordId, StorageError>;

    /// Inserts in order and resolves once every record is stored.
    async fn insert_many<D: Document>(&self, records: Vec<D>) -> Result<Vec<RecordId>, StorageError> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(self.insert(record).await?);
        }
        Ok(ids)
    }
}

pub(crate) fn parse_record_id(id: &str) -> Result<RecordId, StorageError> {
    RecordId::parse(id).ok_or_else(|| StorageError::InvalidId(id.to_string()))
}
