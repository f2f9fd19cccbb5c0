// src/services/user_service.rs
use std::sync::Arc;

use crate::domain::user::{User, UserId, UserRules};
use crate::error::{AppError, AppResult};
use crate::repositories::{FriendRepository, UserRepository};

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    friend_repo: Arc<dyn FriendRepository>,
    rules: UserRules,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, friend_repo: Arc<dyn FriendRepository>) -> Self {
        Self {
            user_repo,
            friend_repo,
            rules: UserRules::default(),
        }
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        let users = self.user_repo.list_all()?;
        users.into_iter().map(|user| self.assemble(user)).collect()
    }

    pub fn create_user(&self, user: User) -> AppResult<User> {
        self.rules.validate(&user).map_err(AppError::Domain)?;

        let id = self.user_repo.create(&user)?;
        log::info!("created user {} \"{}\"", id, user.login);

        self.load(id)
    }

    pub fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.check_user_id(user_id)?;
        self.load(user_id)
    }

    /// Full replace of everything except the friend set: the friendship
    /// index is authoritative and update payloads never touch it.
    pub fn update_user(&self, user: User) -> AppResult<User> {
        let id = user
            .id
            .ok_or_else(|| AppError::validation("user id is required for update"))?;
        if id < 0 {
            return Err(AppError::validation(format!(
                "user id must not be negative (got {})",
                id
            )));
        }
        self.rules.validate(&user).map_err(AppError::Domain)?;

        self.user_repo.update(id, &user)?;
        log::info!("updated user {}", id);

        self.load(id)
    }

    /// Links both sides in one step; repeating the call is a no-op.
    pub fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        self.check_user_id(user_id)?;
        self.check_user_id(friend_id)?;
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(friend_id)?;

        self.friend_repo.add(user_id, friend_id)?;
        log::info!("users {} and {} are now friends", user_id, friend_id);
        Ok(())
    }

    /// Strict: the edge must exist on both sides, and the error names the
    /// side that is missing.
    pub fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        self.check_user_id(user_id)?;
        self.check_user_id(friend_id)?;
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(friend_id)?;

        if !self.friend_repo.contains(user_id, friend_id)? {
            return Err(AppError::not_found(format!(
                "user {} has no friend with id = {}",
                user_id, friend_id
            )));
        }
        if !self.friend_repo.contains(friend_id, user_id)? {
            return Err(AppError::not_found(format!(
                "user {} has no friend with id = {}",
                friend_id, user_id
            )));
        }

        self.friend_repo.remove(user_id, friend_id)?;
        log::info!("users {} and {} are no longer friends", user_id, friend_id);
        Ok(())
    }

    /// Full records for a user's friends, each carrying its own friend set.
    pub fn friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        self.check_user_id(user_id)?;
        self.ensure_user_exists(user_id)?;

        let ids = self.friend_repo.friend_ids(user_id)?;
        self.resolve_users(ids)
    }

    pub fn common_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        self.check_user_id(user_id)?;
        self.check_user_id(other_id)?;
        self.ensure_user_exists(user_id)?;
        self.ensure_user_exists(other_id)?;

        let ids = self.friend_repo.common_friend_ids(user_id, other_id)?;
        self.resolve_users(ids)
    }

    fn resolve_users(
        &self,
        ids: impl IntoIterator<Item = UserId>,
    ) -> AppResult<Vec<User>> {
        let mut users = Vec::new();
        for id in ids {
            if let Some(user) = self.user_repo.get_by_id(id)? {
                users.push(self.assemble(user)?);
            }
        }
        Ok(users)
    }

    /// Fetch a user that must exist and assemble their friend set.
    fn load(&self, user_id: UserId) -> AppResult<User> {
        let user = self
            .user_repo
            .get_by_id(user_id)?
            .ok_or_else(|| AppError::not_found(format!("user with id = {} not found", user_id)))?;
        self.assemble(user)
    }

    fn assemble(&self, mut user: User) -> AppResult<User> {
        if let Some(id) = user.id {
            user.friends = self.friend_repo.friend_ids(id)?;
        }
        Ok(user)
    }

    fn ensure_user_exists(&self, user_id: UserId) -> AppResult<()> {
        if !self.user_repo.exists(user_id)? {
            return Err(AppError::not_found(format!(
                "user with id = {} not found",
                user_id
            )));
        }
        Ok(())
    }

    /// Negative user ids can never resolve, so they surface as missing
    /// without touching storage.
    fn check_user_id(&self, user_id: UserId) -> AppResult<()> {
        if user_id < 0 {
            return Err(AppError::not_found(format!(
                "user with id = {} not found",
                user_id
            )));
        }
        Ok(())
    }
}
