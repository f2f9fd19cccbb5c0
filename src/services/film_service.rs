// src/services/film_service.rs
use std::sync::Arc;

use crate::domain::film::{Film, FilmId, FilmRules};
use crate::domain::user::UserId;
use crate::error::{AppError, AppResult};
use crate::repositories::{FilmRepository, LikeRepository};

/// How many films `top_films` returns when the caller gives no count.
pub const DEFAULT_TOP_COUNT: i64 = 10;

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    like_repo: Arc<dyn LikeRepository>,
    rules: FilmRules,
}

impl FilmService {
    pub fn new(film_repo: Arc<dyn FilmRepository>, like_repo: Arc<dyn LikeRepository>) -> Self {
        Self {
            film_repo,
            like_repo,
            rules: FilmRules::default(),
        }
    }

    pub fn list_films(&self) -> AppResult<Vec<Film>> {
        let films = self.film_repo.list_all()?;
        films.into_iter().map(|film| self.assemble(film)).collect()
    }

    pub fn create_film(&self, film: Film) -> AppResult<Film> {
        self.rules.validate(&film).map_err(AppError::Domain)?;

        let id = self.film_repo.create(&film)?;
        log::info!("created film {} \"{}\"", id, film.name);

        self.load(id)
    }

    pub fn get_film(&self, film_id: FilmId) -> AppResult<Film> {
        self.check_film_id(film_id)?;
        self.load(film_id)
    }

    /// Full replace of everything except the like set: the like index is
    /// authoritative and update payloads never touch it.
    pub fn update_film(&self, film: Film) -> AppResult<Film> {
        let id = film
            .id
            .ok_or_else(|| AppError::validation("film id is required for update"))?;
        self.check_film_id(id)?;
        self.rules.validate(&film).map_err(AppError::Domain)?;

        self.film_repo.update(id, &film)?;
        log::info!("updated film {}", id);

        self.load(id)
    }

    /// Idempotent: liking a film twice leaves the like set unchanged.
    pub fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        self.check_film_id(film_id)?;
        self.check_user_id(user_id)?;
        self.ensure_film_exists(film_id)?;

        if self.like_repo.add(film_id, user_id)? {
            log::info!("user {} liked film {}", user_id, film_id);
        } else {
            log::debug!("user {} already liked film {}", user_id, film_id);
        }
        Ok(())
    }

    /// Strict: removing a like the user never gave is an error.
    pub fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        self.check_film_id(film_id)?;
        self.check_user_id(user_id)?;
        self.ensure_film_exists(film_id)?;

        if !self.like_repo.remove(film_id, user_id)? {
            return Err(AppError::not_found(format!(
                "film {} has no like from user {}",
                film_id, user_id
            )));
        }
        log::info!("user {} unliked film {}", user_id, film_id);
        Ok(())
    }

    /// The `count` most-liked films; None falls back to the default of 10
    /// and a count beyond the catalog size returns the whole catalog.
    pub fn top_films(&self, count: Option<i64>) -> AppResult<Vec<Film>> {
        let count = count.unwrap_or(DEFAULT_TOP_COUNT);
        if count <= 0 {
            return Err(AppError::validation(format!(
                "count must be positive (got {})",
                count
            )));
        }

        let films = self.film_repo.top_by_likes(count)?;
        films.into_iter().map(|film| self.assemble(film)).collect()
    }

    /// Fetch a film that must exist and assemble its like set.
    fn load(&self, film_id: FilmId) -> AppResult<Film> {
        let film = self
            .film_repo
            .get_by_id(film_id)?
            .ok_or_else(|| AppError::not_found(format!("film with id = {} not found", film_id)))?;
        self.assemble(film)
    }

    fn assemble(&self, mut film: Film) -> AppResult<Film> {
        if let Some(id) = film.id {
            film.likes = self.like_repo.likes_for_film(id)?;
        }
        Ok(film)
    }

    fn ensure_film_exists(&self, film_id: FilmId) -> AppResult<()> {
        if !self.film_repo.exists(film_id)? {
            return Err(AppError::not_found(format!(
                "film with id = {} not found",
                film_id
            )));
        }
        Ok(())
    }

    fn check_film_id(&self, film_id: FilmId) -> AppResult<()> {
        if film_id < 0 {
            return Err(AppError::validation(format!(
                "film id must not be negative (got {})",
                film_id
            )));
        }
        Ok(())
    }

    /// Negative user ids can never resolve, so they surface as missing
    /// rather than malformed.
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
