// src/api/routes/film_routes.rs
//
// Film Route Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::dto::{FilmDto, FilmPayload};
use crate::api::error_handling::ApiResult;
use crate::api::state::AppState;
use crate::domain::film::FilmId;
use crate::domain::user::UserId;

pub async fn list_films(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<FilmDto>>> {
    let films = state.film_service.list_films()?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

pub async fn create_film(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<FilmPayload>,
) -> ApiResult<Json<FilmDto>> {
    let film = state.film_service.create_film(payload.into_film())?;
    Ok(Json(FilmDto::from(film)))
}

/// Full replace; the payload carries the id.
pub async fn update_film(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<FilmPayload>,
) -> ApiResult<Json<FilmDto>> {
    let film = state.film_service.update_film(payload.into_film())?;
    Ok(Json(FilmDto::from(film)))
}

pub async fn get_film(
    Extension(state): Extension<Arc<AppState>>,
    Path(film_id): Path<FilmId>,
) -> ApiResult<Json<FilmDto>> {
    let film = state.film_service.get_film(film_id)?;
    Ok(Json(FilmDto::from(film)))
}

pub async fn add_like(
    Extension(state): Extension<Arc<AppState>>,
    Path((film_id, user_id)): Path<(FilmId, UserId)>,
) -> ApiResult<StatusCode> {
    state.film_service.add_like(film_id, user_id)?;
    Ok(StatusCode::OK)
}

pub async fn remove_like(
    Extension(state): Extension<Arc<AppState>>,
    Path((film_id, user_id)): Path<(FilmId, UserId)>,
) -> ApiResult<StatusCode> {
    state.film_service.remove_like(film_id, user_id)?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

pub async fn popular_films(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<PopularQuery>,
) -> ApiResult<Json<Vec<FilmDto>>> {
    let films = state.film_service.top_films(query.count)?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}
