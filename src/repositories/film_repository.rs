// src/repositories/film_repository.rs
//
// Film persistence

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::db::ConnectionPool;
use crate::domain::film::{Film, FilmId};
use crate::domain::genre::Genre;
use crate::domain::mpa::Mpa;
use crate::error::{AppError, AppResult};

pub trait FilmRepository: Send + Sync {
    /// Insert a new film and return the store-assigned id.
    /// Any id on the payload is ignored.
    fn create(&self, film: &Film) -> AppResult<FilmId>;

    /// Full replace of the mutable fields and genre links.
    /// Fails with NotFound when no film has this id.
    fn update(&self, id: FilmId, film: &Film) -> AppResult<()>;

    fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>>;
    fn list_all(&self) -> AppResult<Vec<Film>>;

    /// Films ordered by descending like count, ties in id order.
    /// Returned films carry empty like sets; callers fill them in.
    fn top_by_likes(&self, limit: i64) -> AppResult<Vec<Film>>;

    fn exists(&self, id: FilmId) -> AppResult<bool>;
}

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a films row (joined with mpa_ratings) to a Film.
    /// Genres and likes are filled in separately.
    fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let id: FilmId = row.get("id")?;
        let name: String = row.get("name")?;
        let description: String = row.get("description")?;

        let release_date_str: String = row.get("release_date")?;
        let release_date = NaiveDate::parse_from_str(&release_date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let duration: i32 = row.get("duration")?;

        let mpa_id: Option<i64> = row.get("mpa_id")?;
        let mpa = match mpa_id {
            Some(mpa_id) => {
                let mpa_name: Option<String> = row.get("mpa_name")?;
                let mpa_description: Option<String> = row.get("mpa_description")?;
                Mpa::new(
                    mpa_id,
                    mpa_name.unwrap_or_default(),
                    mpa_description.unwrap_or_default(),
                )
            }
            None => Mpa::unset(),
        };

        Ok(Film {
            id: Some(id),
            name,
            description,
            release_date: Some(release_date),
            duration,
            genres: Vec::new(),
            mpa,
            likes: BTreeSet::new(),
        })
    }

    /// Genre links for one film, deduplicated by the primary key and
    /// read back in genre-id order.
    fn genres_for_film(conn: &Connection, film_id: FilmId) -> AppResult<Vec<Genre>> {
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.description
             FROM genres g
             JOIN film_genres fg ON fg.genre_id = g.id
             WHERE fg.film_id = ?1
             ORDER BY g.id",
        )?;

        let genres: Vec<Genre> = stmt
            .query_map(params![film_id], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn insert_genres(conn: &Connection, film_id: FilmId, genres: &[Genre]) -> AppResult<()> {
        let mut stmt =
            conn.prepare("INSERT OR IGNORE INTO film_genres (film_id, genre_id) VALUES (?1, ?2)")?;
        for genre in genres {
            stmt.execute(params![film_id, genre.id])?;
        }
        Ok(())
    }

    fn fill_genres(conn: &Connection, films: &mut [Film]) -> AppResult<()> {
        for film in films.iter_mut() {
            if let Some(id) = film.id {
                film.genres = Self::genres_for_film(conn, id)?;
            }
        }
        Ok(())
    }

    fn mpa_id_param(film: &Film) -> Option<i64> {
        if film.mpa.is_unset() {
            None
        } else {
            Some(film.mpa.id)
        }
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn create(&self, film: &Film) -> AppResult<FilmId> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO films (name, description, release_date, duration, mpa_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                film.name,
                film.description,
                film.release_date.map(|d| d.to_string()),
                film.duration,
                Self::mpa_id_param(film),
            ],
        )?;

        let id = tx.last_insert_rowid();
        Self::insert_genres(&tx, id, &film.genres)?;
        tx.commit()?;

        Ok(id)
    }

    fn update(&self, id: FilmId, film: &Film) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE films
             SET name = ?1, description = ?2, release_date = ?3, duration = ?4, mpa_id = ?5
             WHERE id = ?6",
            params![
                film.name,
                film.description,
                film.release_date.map(|d| d.to_string()),
                film.duration,
                Self::mpa_id_param(film),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::not_found(format!("film with id = {} not found", id)));
        }

        // Genre links are replaced wholesale
        tx.execute("DELETE FROM film_genres WHERE film_id = ?1", params![id])?;
        Self::insert_genres(&tx, id, &film.genres)?;
        tx.commit()?;

        Ok(())
    }

    fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT f.id, f.name, f.description, f.release_date, f.duration,
                    f.mpa_id, m.name AS mpa_name, m.description AS mpa_description
             FROM films f
             LEFT JOIN mpa_ratings m ON m.id = f.mpa_id
             WHERE f.id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_film) {
            Ok(mut film) => {
                film.genres = Self::genres_for_film(&conn, id)?;
                Ok(Some(film))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT f.id, f.name, f.description, f.release_date, f.duration,
                    f.mpa_id, m.name AS mpa_name, m.description AS mpa_description
             FROM films f
             LEFT JOIN mpa_ratings m ON m.id = f.mpa_id
             ORDER BY f.id",
        )?;

        let mut films: Vec<Film> = stmt
            .query_map([], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);

        Self::fill_genres(&conn, &mut films)?;
        Ok(films)
    }

    fn top_by_likes(&self, limit: i64) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        // Like counts are derived from the membership index, never stored
        let mut stmt = conn.prepare(
            "SELECT f.id, f.name, f.description, f.release_date, f.duration,
                    f.mpa_id, m.name AS mpa_name, m.description AS mpa_description,
                    COUNT(fl.user_id) AS like_count
             FROM films f
             LEFT JOIN mpa_ratings m ON m.id = f.mpa_id
             LEFT JOIN film_likes fl ON fl.film_id = f.id
             GROUP BY f.id
             ORDER BY like_count DESC, f.id
             LIMIT ?1",
        )?;

        let mut films: Vec<Film> = stmt
            .query_map(params![limit], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);

        Self::fill_genres(&conn, &mut films)?;
        Ok(films)
    }

    fn exists(&self, id: FilmId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM films WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, initialize_database};

    fn test_pool() -> Arc<ConnectionPool> {
        let pool = create_test_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        Arc::new(pool)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_film(name: &str) -> Film {
        Film::new(
            None,
            name.to_string(),
            "A film".to_string(),
            Some(date(1999, 3, 31)),
            136,
            Some(vec![Genre::new(6, "", ""), Genre::new(4, "", "")]),
            Some(Mpa::new(4, "", "")),
        )
    }

    #[test]
    fn test_create_assigns_monotonic_ids() {
        let repo = SqliteFilmRepository::new(test_pool());

        let first = repo.create(&sample_film("The Matrix")).unwrap();
        let second = repo.create(&sample_film("The Matrix Reloaded")).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_get_resolves_genres_and_mpa() {
        let repo = SqliteFilmRepository::new(test_pool());
        let id = repo.create(&sample_film("The Matrix")).unwrap();

        let film = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(film.name, "The Matrix");
        assert_eq!(film.release_date, Some(date(1999, 3, 31)));

        // Links come back resolved against the reference catalog, id-ordered
        let genre_names: Vec<&str> = film.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(genre_names, vec!["Thriller", "Action"]);
        assert_eq!(film.mpa.name, "R");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let repo = SqliteFilmRepository::new(test_pool());
        assert!(repo.get_by_id(42).unwrap().is_none());
    }

    #[test]
    fn test_unset_mpa_round_trips_as_marker() {
        let repo = SqliteFilmRepository::new(test_pool());
        let mut film = sample_film("Primer");
        film.mpa = Mpa::unset();

        let id = repo.create(&film).unwrap();
        let stored = repo.get_by_id(id).unwrap().unwrap();
        assert!(stored.mpa.is_unset());
    }

    #[test]
    fn test_duplicate_genre_links_collapse() {
        let repo = SqliteFilmRepository::new(test_pool());
        let mut film = sample_film("Snatch");
        film.genres = vec![
            Genre::new(1, "", ""),
            Genre::new(1, "", ""),
            Genre::new(6, "", ""),
        ];

        let id = repo.create(&film).unwrap();
        let stored = repo.get_by_id(id).unwrap().unwrap();
        let ids: Vec<i64> = stored.genres.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 6]);
    }

    #[test]
    fn test_update_replaces_fields_and_genres() {
        let repo = SqliteFilmRepository::new(test_pool());
        let id = repo.create(&sample_film("The Matrix")).unwrap();

        let mut updated = sample_film("The Matrix (Director's Cut)");
        updated.duration = 150;
        updated.genres = vec![Genre::new(2, "", "")];
        repo.update(id, &updated).unwrap();

        let stored = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.name, "The Matrix (Director's Cut)");
        assert_eq!(stored.duration, 150);
        assert_eq!(stored.genres.len(), 1);
        assert_eq!(stored.genres[0].name, "Drama");
    }

    #[test]
    fn test_update_missing_film_fails() {
        let repo = SqliteFilmRepository::new(test_pool());
        let result = repo.update(100, &sample_film("Ghost"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_top_by_likes_orders_by_derived_count() {
        let pool = test_pool();
        let repo = SqliteFilmRepository::new(pool.clone());

        let quiet = repo.create(&sample_film("Quiet")).unwrap();
        let popular = repo.create(&sample_film("Popular")).unwrap();
        let middling = repo.create(&sample_film("Middling")).unwrap();

        let conn = pool.get().unwrap();
        for user in 1..=3 {
            conn.execute(
                "INSERT INTO users (email, login, name) VALUES (?1, ?2, ?2)",
                params![format!("u{}@example.com", user), format!("user{}", user)],
            )
            .unwrap();
        }
        for user in 1..=3 {
            conn.execute(
                "INSERT INTO film_likes (film_id, user_id) VALUES (?1, ?2)",
                params![popular, user],
            )
            .unwrap();
        }
        conn.execute(
            "INSERT INTO film_likes (film_id, user_id) VALUES (?1, 1)",
            params![middling],
        )
        .unwrap();
        drop(conn);

        let top = repo.top_by_likes(10).unwrap();
        let ids: Vec<FilmId> = top.iter().filter_map(|f| f.id).collect();
        assert_eq!(ids, vec![popular, middling, quiet]);

        // Limit truncates after ordering
        let top_one = repo.top_by_likes(1).unwrap();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].id, Some(popular));
    }
}
