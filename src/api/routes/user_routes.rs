// src/api/routes/user_routes.rs
//
// User and Friendship Route Handlers

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::dto::{UserDto, UserPayload};
use crate::api::error_handling::ApiResult;
use crate::api::state::AppState;
use crate::domain::user::UserId;

pub async fn list_users(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = state.user_service.list_users()?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

pub async fn create_user(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.create_user(payload.into_user())?;
    Ok(Json(UserDto::from(user)))
}

/// Full replace; the payload carries the id.
pub async fn update_user(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.update_user(payload.into_user())?;
    Ok(Json(UserDto::from(user)))
}

pub async fn get_user(
    Extension(state): Extension<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.get_user(user_id)?;
    Ok(Json(UserDto::from(user)))
}

pub async fn add_friend(
    Extension(state): Extension<Arc<AppState>>,
    Path((user_id, friend_id)): Path<(UserId, UserId)>,
) -> ApiResult<StatusCode> {
    state.user_service.add_friend(user_id, friend_id)?;
    Ok(StatusCode::OK)
}

pub async fn remove_friend(
    Extension(state): Extension<Arc<AppState>>,
    Path((user_id, friend_id)): Path<(UserId, UserId)>,
) -> ApiResult<StatusCode> {
    state.user_service.remove_friend(user_id, friend_id)?;
    Ok(StatusCode::OK)
}

pub async fn list_friends(
    Extension(state): Extension<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let friends = state.user_service.friends(user_id)?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}

pub async fn common_friends(
    Extension(state): Extension<Arc<AppState>>,
    Path((user_id, other_id)): Path<(UserId, UserId)>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let friends = state.user_service.common_friends(user_id, other_id)?;
    Ok(Json(friends.into_iter().map(UserDto::from).collect()))
}
