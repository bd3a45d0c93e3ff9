use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Storage, StorageError, Stored, parse_record_id};
use crate::models::{Collection, Document, RecordId};

type Documents = Vec<(RecordId, Value)>;

/// Process local storage, documents are kept as JSON in insertion order.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    collections: Arc<RwLock<HashMap<Collection, Documents>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

fn decode<D: Document>(record_id: &RecordId, value: &Value) -> Result<Stored<D>, StorageError> {
    Ok(Stored {
        record_id: record_id.clone(),
        data: serde_json::from_value(value.clone())?,
    })
}

#[async_trait]
impl Storage for MemoryDatabase {
    async fn list_all<D: Document>(&self) -> Result<Vec<Stored<D>>, StorageError> {
        let collections = self.collections.read().await;
        collections
            .get(&D::COLLECTION)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(record_id, value)| decode(record_id, value))
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn find_by_id<D: Document>(&self, id: &str) -> Result<Option<Stored<D>>, StorageError> {
        let record_id = parse_record_id(id)?;
        let collections = self.collections.read().await;
        let found = collections
            .get(&D::COLLECTION)
            .and_then(|documents| documents.iter().find(|(stored_id, _)| *stored_id == record_id));
        match found {
            Some((stored_id, value)) => Ok(Some(decode(stored_id, value)?)),
            None => Ok(None),
        }
    }

    async fn delete_all<D: Document>(&self) -> Result<u64, StorageError> {
        let mut collections = self.collections.write().await;
        let removed = collections.remove(&D::COLLECTION).unwrap_or_default();
        Ok(removed.len() as u64)
    }

    async fn insert<D: Document>(&self, record: D) -> Result<RecordId, StorageError> {
        let value = serde_json::to_value(&record)?;
        let record_id = RecordId::generate();
        self.collections
            .write()
            .await
            .entry(D::COLLECTION)
            .or_default()
            .push((record_id.clone(), value));
        Ok(record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movie, Song};

    fn song(id: i64, track_name: &str) -> Song {
        Song {
            id,
            track_name: track_name.to_string(),
            artist_name: "Y".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = MemoryDatabase::new();
        assert!(store.list_all::<Song>().await.unwrap().is_empty());

        let ids = store
            .insert_many(vec![song(3, "c"), song(1, "a"), song(2, "b")])
            .await
            .unwrap();

        let songs = store.list_all::<Song>().await.unwrap();
        let names: Vec<&str> = songs.iter().map(|s| s.data.track_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(songs.into_iter().map(|s| s.record_id).collect::<Vec<_>>(), ids);
    }

    #[tokio::test]
    async fn finds_by_record_id() {
        let store = MemoryDatabase::new();
        let record_id = store.insert(song(1, "X")).await.unwrap();

        let found = store.find_by_id::<Song>(record_id.as_str()).await.unwrap();
        assert_eq!(
            found,
            Some(Stored {
                record_id: record_id.clone(),
                data: song(1, "X")
            })
        );

        let upper = record_id.as_str().to_ascii_uppercase();
        assert!(store.find_by_id::<Song>(&upper).await.unwrap().is_some());

        assert!(store
            .find_by_id::<Song>("ffffffffffffffffffffffff")
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            store.find_by_id::<Song>("not-an-id").await,
            Err(StorageError::InvalidId(id)) if id == "not-an-id"
        ));
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemoryDatabase::new();
        let song_id = store.insert(song(1, "X")).await.unwrap();
        store.insert(Movie::default()).await.unwrap();

        assert!(store.find_by_id::<Movie>(song_id.as_str()).await.unwrap().is_none());
        assert_eq!(store.delete_all::<Movie>().await.unwrap(), 1);
        assert_eq!(store.delete_all::<Movie>().await.unwrap(), 0);
        assert_eq!(store.list_all::<Song>().await.unwrap().len(), 1);
    }
}
