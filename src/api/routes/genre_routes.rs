// src/api/routes/genre_routes.rs

use std::sync::Arc;

use axum::extract::Path;
use axum::{Extension, Json};

use crate::api::dto::GenreDto;
use crate::api::error_handling::ApiResult;
use crate::api::state::AppState;
use crate::domain::GenreId;

pub async fn list_genres(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<GenreDto>>> {
    let genres = state.genre_service.list_genres()?;
    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

pub async fn get_genre(
    Extension(state): Extension<Arc<AppState>>,
    Path(genre_id): Path<GenreId>,
) -> ApiResult<Json<GenreDto>> {
    let genre = state.genre_service.get_genre(genre_id)?;
    Ok(Json(GenreDto::from(genre)))
}
