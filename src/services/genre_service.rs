// src/services/genre_service.rs
use std::sync::Arc;

use crate::domain::film::FilmId;
use crate::domain::genre::{Genre, GenreId};
use crate::error::{AppError, AppResult};
use crate::repositories::GenreRepository;

pub struct GenreService {
    genre_repo: Arc<dyn GenreRepository>,
}

impl GenreService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repo }
    }

    pub fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genre_repo.list_all()
    }

    pub fn get_genre(&self, genre_id: GenreId) -> AppResult<Genre> {
        self.genre_repo
            .get_by_id(genre_id)?
            .ok_or_else(|| AppError::not_found(format!("genre with id = {} not found", genre_id)))
    }

    /// Genres tagged on a film. Untagged films give an empty list, never
    /// an error, so callers can always iterate.
    pub fn genres_for_film(&self, film_id: FilmId) -> AppResult<Vec<Genre>> {
        self.genre_repo.list_by_film(film_id)
    }
}
