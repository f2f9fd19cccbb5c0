// src/repositories/genre_repository.rs
//
// Genre reference catalog (read-only; rows are seeded by the schema)

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::film::FilmId;
use crate::domain::genre::{Genre, GenreId};
use crate::error::{AppError, AppResult};

pub trait GenreRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<Genre>>;
    fn get_by_id(&self, id: GenreId) -> AppResult<Option<Genre>>;

    /// The genres tagged on one film, id-ordered.
    /// An untagged or unknown film yields an empty list, never an error.
    fn list_by_film(&self, film_id: FilmId) -> AppResult<Vec<Genre>>;
}

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
        Ok(Genre {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
        })
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn list_all(&self) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name, description FROM genres ORDER BY id")?;

        let genres: Vec<Genre> = stmt
            .query_map([], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn get_by_id(&self, id: GenreId) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name, description FROM genres WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_genre) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_by_film(&self, film_id: FilmId) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.description
             FROM genres g
             JOIN film_genres fg ON fg.genre_id = g.id
             WHERE fg.film_id = ?1
             ORDER BY g.id",
        )?;

        let genres: Vec<Genre> = stmt
            .query_map(params![film_id], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }
}
