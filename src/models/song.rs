use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use super::{Collection, Document};

/// One entry of the top music dataset.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Song {
    pub id: i64,
    pub track_name: String,
    pub artist_name: String,
    pub genre: String,
    pub bpm: i32,
    pub energy: i32,
    pub danceability: i32,
    pub loudness: i32,
    pub liveness: i32,
    pub valence: i32,
    pub length: i32,
    pub acousticness: i32,
    pub speechiness: i32,
    pub popularity: i32,
}

impl Document for Song {
    const COLLECTION: Collection = Collection::Songs;

    const INSERT_SQL: &'static str = "INSERT INTO songs (record_id, id, track_name, artist_name, genre, bpm, energy, danceability, loudness, liveness, valence, length, acousticness, speechiness, popularity)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)";

    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query
            .bind(self.id)
            .bind(&self.track_name)
            .bind(&self.artist_name)
            .bind(&self.genre)
            .bind(self.bpm)
            .bind(self.energy)
            .bind(self.danceability)
            .bind(self.loudness)
            .bind(self.liveness)
            .bind(self.valence)
            .bind(self.length)
            .bind(self.acousticness)
            .bind(self.speechiness)
            .bind(self.popularity)
    }
}
