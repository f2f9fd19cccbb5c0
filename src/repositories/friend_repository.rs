// src/repositories/friend_repository.rs
//
// Friendship membership index. A mutual link is two directed rows kept
// in lockstep: every add/remove writes both directions in one
// transaction, so the exposed view is symmetric by construction. The
// internal status column records whether a direction's owner explicitly
// added the other user ('confirmed') or merely mirrors the reverse add
// ('pending'); no read ever consults it.

use std::collections::BTreeSet;
use std::sync::Arc;

use rusqlite::params;

use crate::db::ConnectionPool;
use crate::domain::user::UserId;
use crate::error::AppResult;

pub trait FriendRepository: Send + Sync {
    /// Link two users both ways. Idempotent.
    fn add(&self, user_id: UserId, friend_id: UserId) -> AppResult<()>;

    /// Unlink two users both ways. Removing an absent edge is a no-op
    /// here; callers that need strictness check `contains` first.
    fn remove(&self, user_id: UserId, friend_id: UserId) -> AppResult<()>;

    fn contains(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;
    fn friend_ids(&self, user_id: UserId) -> AppResult<BTreeSet<UserId>>;
    fn common_friend_ids(&self, user_id: UserId, other_id: UserId) -> AppResult<BTreeSet<UserId>>;
}

pub struct SqliteFriendRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFriendRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl FriendRepository for SqliteFriendRepository {
    fn add(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        // The caller's own direction is confirmed outright
        tx.execute(
            "INSERT INTO friendships (user_id, friend_id, status) VALUES (?1, ?2, 'confirmed')
             ON CONFLICT(user_id, friend_id) DO UPDATE SET status = 'confirmed'",
            params![user_id, friend_id],
        )?;

        // The mirror row starts pending until its owner adds back
        tx.execute(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id, status) VALUES (?1, ?2, 'pending')",
            params![friend_id, user_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn remove(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )?;
        tx.execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![friend_id, user_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn contains(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn friend_ids(&self, user_id: UserId) -> AppResult<BTreeSet<UserId>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT friend_id FROM friendships WHERE user_id = ?1")?;

        let ids: BTreeSet<UserId> = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(ids)
    }

    fn common_friend_ids(&self, user_id: UserId, other_id: UserId) -> AppResult<BTreeSet<UserId>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT f1.friend_id
             FROM friendships f1
             JOIN friendships f2 ON f2.friend_id = f1.friend_id
             WHERE f1.user_id = ?1 AND f2.user_id = ?2",
        )?;

        let ids: BTreeSet<UserId> = stmt
            .query_map(params![user_id, other_id], |row| row.get(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, initialize_database, ConnectionPool};

    fn test_setup(user_count: i64) -> (Arc<ConnectionPool>, SqliteFriendRepository) {
        let pool = create_test_pool().unwrap();
        let conn = pool.get().unwrap();
        initialize_database(&conn).unwrap();
        for i in 1..=user_count {
            conn.execute(
                "INSERT INTO users (email, login, name) VALUES (?1, ?2, ?2)",
                params![format!("u{}@example.com", i), format!("user{}", i)],
            )
            .unwrap();
        }
        drop(conn);
        let pool = Arc::new(pool);
        (pool.clone(), SqliteFriendRepository::new(pool))
    }

    #[test]
    fn test_add_links_both_directions() {
        let (_, repo) = test_setup(2);

        repo.add(1, 2).unwrap();

        assert_eq!(repo.friend_ids(1).unwrap(), BTreeSet::from([2]));
        assert_eq!(repo.friend_ids(2).unwrap(), BTreeSet::from([1]));
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_, repo) = test_setup(2);

        repo.add(1, 2).unwrap();
        repo.add(1, 2).unwrap();

        assert_eq!(repo.friend_ids(1).unwrap().len(), 1);
    }

    #[test]
    fn test_status_tracks_explicit_adds() {
        let (pool, repo) = test_setup(2);

        repo.add(1, 2).unwrap();

        let conn = pool.get().unwrap();
        let status_of = |from: i64, to: i64| -> String {
            conn.query_row(
                "SELECT status FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
                params![from, to],
                |row| row.get(0),
            )
            .unwrap()
        };

        // Only the initiating direction is confirmed so far
        assert_eq!(status_of(1, 2), "confirmed");
        assert_eq!(status_of(2, 1), "pending");
        drop(conn);

        repo.add(2, 1).unwrap();
        let conn = pool.get().unwrap();
        let confirmed: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM friendships WHERE status = 'confirmed'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(confirmed, 2);
    }

    #[test]
    fn test_remove_unlinks_both_directions() {
        let (_, repo) = test_setup(2);

        repo.add(1, 2).unwrap();
        repo.remove(2, 1).unwrap();

        assert!(repo.friend_ids(1).unwrap().is_empty());
        assert!(repo.friend_ids(2).unwrap().is_empty());
        assert!(!repo.contains(1, 2).unwrap());
    }

    #[test]
    fn test_common_friend_ids() {
        let (_, repo) = test_setup(4);

        // friends(1) = {2, 3, 4}, friends(3) = {1, 2, 4}
        repo.add(1, 2).unwrap();
        repo.add(1, 3).unwrap();
        repo.add(1, 4).unwrap();
        repo.add(3, 2).unwrap();
        repo.add(3, 4).unwrap();

        assert_eq!(repo.common_friend_ids(1, 3).unwrap(), BTreeSet::from([2, 4]));
    }
}
