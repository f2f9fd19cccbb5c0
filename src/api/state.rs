// src/api/state.rs

use std::sync::Arc;

use crate::services::{FilmService, GenreService, MpaService, UserService};

/// Shared application state attached to the router as an Extension.
/// All fields are Arc-wrapped for thread-safe sharing across handlers.
/// Services are initialized in main.rs and passed here.
pub struct AppState {
    pub film_service: Arc<FilmService>,
    pub user_service: Arc<UserService>,
    pub genre_service: Arc<GenreService>,
    pub mpa_service: Arc<MpaService>,
}
