use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};

pub mod movie;
pub mod record_id;
pub mod song;

pub use movie::Movie;
pub use record_id::RecordId;
pub use song::Song;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Songs,
    Movies,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Songs => "songs",
            Collection::Movies => "movies",
        }
    }

    /// Singular name used in user facing messages.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Collection::Songs => "Song",
            Collection::Movies => "Movie",
        }
    }
}

/// A record shape that lives in exactly one collection.
pub trait Document:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    const COLLECTION: Collection;

    /// Insert statement whose first placeholder is the record id.
    const INSERT_SQL: &'static str;

    /// Binds every field after the record id, in `INSERT_SQL` order.
    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments>;
}
