// src/api/routes/mpa_routes.rs

use std::sync::Arc;

use axum::extract::Path;
use axum::{Extension, Json};

use crate::api::dto::MpaDto;
use crate::api::error_handling::ApiResult;
use crate::api::state::AppState;
use crate::domain::MpaId;

pub async fn list_ratings(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<MpaDto>>> {
    let ratings = state.mpa_service.list_ratings()?;
    Ok(Json(ratings.into_iter().map(MpaDto::from).collect()))
}

pub async fn get_rating(
    Extension(state): Extension<Arc<AppState>>,
    Path(mpa_id): Path<MpaId>,
) -> ApiResult<Json<MpaDto>> {
    let rating = state.mpa_service.get_rating(mpa_id)?;
    Ok(Json(MpaDto::from(rating)))
}
