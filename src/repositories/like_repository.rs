// src/repositories/like_repository.rs
//
// Like membership index. This table is the single source of truth for
// who liked what; counts are always derived from it.

use std::collections::BTreeSet;
use std::sync::Arc;

use rusqlite::params;

use crate::db::ConnectionPool;
use crate::domain::film::FilmId;
use crate::domain::user::UserId;
use crate::error::AppResult;

pub trait LikeRepository: Send + Sync {
    /// Record that a user likes a film. Returns false when the like was
    /// already present (the call is an idempotent no-op).
    fn add(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool>;

    /// Remove a like. Returns false when no such like existed.
    fn remove(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool>;

    fn likes_for_film(&self, film_id: FilmId) -> AppResult<BTreeSet<UserId>>;
}

pub struct SqliteLikeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteLikeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl LikeRepository for SqliteLikeRepository {
    fn add(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        // The primary key makes a repeated like a no-op
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO film_likes (film_id, user_id) VALUES (?1, ?2)",
            params![film_id, user_id],
        )?;

        Ok(inserted > 0)
    }

    fn remove(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let removed = conn.execute(
            "DELETE FROM film_likes WHERE film_id = ?1 AND user_id = ?2",
            params![film_id, user_id],
        )?;

        Ok(removed > 0)
    }

    fn likes_for_film(&self, film_id: FilmId) -> AppResult<BTreeSet<UserId>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT user_id FROM film_likes WHERE film_id = ?1")?;

        let likes: BTreeSet<UserId> = stmt
            .query_map(params![film_id], |row| row.get(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(likes)
    }
}
