// src/repositories/user_repository.rs
//
// User persistence

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::user::{User, UserId};
use crate::error::{AppError, AppResult};

pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the store-assigned id.
    /// Any id on the payload is ignored.
    fn create(&self, user: &User) -> AppResult<UserId>;

    /// Full replace of email/login/name/birthday.
    /// Fails with NotFound when no user has this id.
    fn update(&self, id: UserId, user: &User) -> AppResult<()>;

    fn get_by_id(&self, id: UserId) -> AppResult<Option<User>>;
    fn list_all(&self) -> AppResult<Vec<User>>;
    fn exists(&self, id: UserId) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a users row to a User; the friend set is filled in separately.
    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let id: UserId = row.get("id")?;
        let email: String = row.get("email")?;
        let login: String = row.get("login")?;
        let name: String = row.get("name")?;

        let birthday_str: Option<String> = row.get("birthday")?;
        let birthday = birthday_str
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        Ok(User {
            id: Some(id),
            email,
            login,
            name,
            birthday,
            friends: BTreeSet::new(),
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: &User) -> AppResult<UserId> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.map(|d| d.to_string()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: UserId, user: &User) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4 WHERE id = ?5",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.map(|d| d.to_string()),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::not_found(format!("user with id = {} not found", id)));
        }

        Ok(())
    }

    fn get_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, email, login, name, birthday FROM users WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, email, login, name, birthday FROM users ORDER BY id")?;

        let users: Vec<User> = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn exists(&self, id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
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

    fn test_repo() -> SqliteUserRepository {
        let pool = create_test_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteUserRepository::new(Arc::new(pool))
    }

    fn sample_user(login: &str) -> User {
        User::new(
            None,
            format!("{}@example.com", login),
            login.to_string(),
            None,
            NaiveDate::from_ymd_opt(1988, 7, 12),
        )
    }

    #[test]
    fn test_create_and_get() {
        let repo = test_repo();
        let id = repo.create(&sample_user("neo")).unwrap();

        let user = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(user.login, "neo");
        assert_eq!(user.name, "neo");
        assert_eq!(user.birthday, NaiveDate::from_ymd_opt(1988, 7, 12));
    }

    #[test]
    fn test_absent_birthday_round_trips() {
        let repo = test_repo();
        let mut user = sample_user("trinity");
        user.birthday = None;

        let id = repo.create(&user).unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().birthday, None);
    }

    #[test]
    fn test_update_replaces_fields() {
        let repo = test_repo();
        let id = repo.create(&sample_user("neo")).unwrap();

        let mut changed = sample_user("neo");
        changed.name = "Thomas Anderson".to_string();
        repo.update(id, &changed).unwrap();

        assert_eq!(repo.get_by_id(id).unwrap().unwrap().name, "Thomas Anderson");
    }

    #[test]
    fn test_update_missing_user_fails() {
        let repo = test_repo();
        let result = repo.update(7, &sample_user("ghost"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_list_in_id_order() {
        let repo = test_repo();
        repo.create(&sample_user("a")).unwrap();
        repo.create(&sample_user("b")).unwrap();

        let logins: Vec<String> = repo.list_all().unwrap().into_iter().map(|u| u.login).collect();
        assert_eq!(logins, vec!["a", "b"]);
    }
}
