use thiserror::Error;
use tracing::info;

use crate::db::{Storage, StorageError};
use crate::models::{Movie, Song};

// Both files are samples of the full top music and netflix titles lists,
// drop the complete files in place to seed everything.
const TOP_MUSIC: &str = include_str!("../data/top-music.json");
const NETFLIX_TITLES: &str = include_str!("../data/netflix-titles.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("dataset {name} is malformed: {source}")]
    Dataset {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct Datasets {
    pub songs: Vec<Song>,
    pub movies: Vec<Movie>,
}

impl Datasets {
    /// The track and title lists compiled into the binary.
    pub fn bundled() -> Result<Self, SeedError> {
        let songs = serde_json::from_str(TOP_MUSIC).map_err(|source| SeedError::Dataset {
            name: "top-music.json",
            source,
        })?;
        let movies = serde_json::from_str(NETFLIX_TITLES).map_err(|source| SeedError::Dataset {
            name: "netflix-titles.json",
            source,
        })?;
        Ok(Datasets { songs, movies })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub songs_removed: u64,
    pub movies_removed: u64,
    pub songs_inserted: usize,
    pub movies_inserted: usize,
}

/// Wipes both collections and reloads them from `datasets`, in dataset order.
/// Resolves only after every record is stored.
pub async fn reset_database<S: Storage>(
    store: &S,
    datasets: Datasets,
) -> Result<SeedReport, SeedError> {
    let songs_removed = store.delete_all::<Song>().await?;
    let movies_removed = store.delete_all::<Movie>().await?;

    let songs_inserted = store.insert_many(datasets.songs).await?.len();
    let movies_inserted = store.insert_many(datasets.movies).await?.len();

    let report = SeedReport {
        songs_removed,
        movies_removed,
        songs_inserted,
        movies_inserted,
    };
    info!("Database dropped and recreated: {:?}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDatabase;

    #[test]
    fn bundled_datasets_parse() {
        let datasets = Datasets::bundled().unwrap();
        assert!(!datasets.songs.is_empty());
        assert!(!datasets.movies.is_empty());
        assert!(datasets.songs.iter().all(|s| !s.track_name.is_empty()));
        assert!(datasets.movies.iter().all(|m| !m.title.is_empty()));
    }

    #[tokio::test]
    async fn reset_replaces_previous_contents() {
        let store = MemoryDatabase::new();
        store.insert(Song::default()).await.unwrap();
        store.insert(Song::default()).await.unwrap();
        store.insert(Movie::default()).await.unwrap();

        let datasets = Datasets::bundled().unwrap();
        let expected_songs = datasets.songs.clone();
        let expected_movies = datasets.movies.clone();

        let report = reset_database(&store, datasets).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                songs_removed: 2,
                movies_removed: 1,
                songs_inserted: expected_songs.len(),
                movies_inserted: expected_movies.len(),
            }
        );

        let songs: Vec<Song> = store
            .list_all::<Song>()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.data)
            .collect();
        assert_eq!(songs, expected_songs);

        let movies: Vec<Movie> = store
            .list_all::<Movie>()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.data)
            .collect();
        assert_eq!(movies, expected_movies);
    }

    #[tokio::test]
    async fn reseeding_twice_does_not_duplicate() {
        let store = MemoryDatabase::new();
        reset_database(&store, Datasets::bundled().unwrap()).await.unwrap();
        let report = reset_database(&store, Datasets::bundled().unwrap()).await.unwrap();

        assert_eq!(report.songs_removed as usize, report.songs_inserted);
        assert_eq!(
            store.list_all::<Song>().await.unwrap().len(),
            report.songs_inserted
        );
    }
}
