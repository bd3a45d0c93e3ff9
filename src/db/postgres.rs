use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::debug;

use super::{Storage, StorageError, Stored, parse_record_id};
use crate::models::{Document, RecordId};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        debug!("DATABASE_URL={}", database_url);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl Storage for Database {
    async fn list_all<D: Document>(&self) -> Result<Vec<Stored<D>>, StorageError> {
        let sql = format!("SELECT * FROM {} ORDER BY seq", D::COLLECTION.table());
        let records = sqlx::query_as::<_, Stored<D>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_by_id<D: Document>(&self, id: &str) -> Result<Option<Stored<D>>, StorageError> {
        let record_id = parse_record_id(id)?;
        let sql = format!("SELECT * FROM {} WHERE record_id = $1", D::COLLECTION.table());
        let record = sqlx::query_as::<_, Stored<D>>(&sql)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete_all<D: Document>(&self) -> Result<u64, StorageError> {
        let sql = format!("DELETE FROM {}", D::COLLECTION.table());
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert<D: Document>(&self, record: D) -> Result<RecordId, StorageError> {
        let record_id = RecordId::generate();
        record
            .bind_insert(sqlx::query(D::INSERT_SQL).bind(record_id.clone()))
            .execute(&self.pool)
            .await?;
        Ok(record_id)
    }

    async fn insert_many<D: Document>(&self, records: Vec<D>) -> Result<Vec<RecordId>, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(records.len());

        for record in records.iter() {
            let record_id = RecordId::generate();
            record
                .bind_insert(sqlx::query(D::INSERT_SQL).bind(record_id.clone()))
                .execute(&mut *tx)
                .await?;
            ids.push(record_id);
        }

        tx.commit().await?;
        Ok(ids)
    }
}
