use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use super::{Collection, Document};

/// One entry of the netflix titles dataset. Free text fields are kept as-is.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, FromRow)]
#[serde(default)]
pub struct Movie {
    pub show_id: i64,
    pub title: String,
    pub director: String,
    #[sqlx(rename = "cast_members")]
    pub cast: String,
    pub country: String,
    pub date_added: String,
    pub release_year: i32,
    pub rating: String,
    pub duration: String,
    pub listed_in: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Document for Movie {
    const COLLECTION: Collection = Collection::Movies;

    const INSERT_SQL: &'static str = "INSERT INTO movies (record_id, show_id, title, director, cast_members, country, date_added, release_year, rating, duration, listed_in, description, kind)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)";

    fn bind_insert<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query
            .bind(self.show_id)
            .bind(&self.title)
            .bind(&self.director)
            .bind(&self.cast)
            .bind(&self.country)
            .bind(&self.date_added)
            .bind(self.release_year)
            .bind(&self.rating)
            .bind(&self.duration)
            .bind(&self.listed_in)
            .bind(&self.description)
            .bind(&self.kind)
    }
}
