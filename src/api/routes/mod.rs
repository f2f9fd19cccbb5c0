// src/api/routes/mod.rs
//
// HTTP Route Handlers
//
// ARCHITECTURE:
// - Handlers are thin adapters between HTTP and Services
// - Handlers accept DTOs, return DTOs
// - Handlers NEVER contain business logic
// - `router` is the single place the route table is defined

pub mod film_routes;
pub mod genre_routes;
pub mod mpa_routes;
pub mod user_routes;

use std::sync::Arc;

use axum::routing::{get, put};
use axum::{Extension, Router};

use crate::api::state::AppState;

/// Builds the application router with every route wired to its handler.
/// `/films/popular` is registered before `/films/:id`; the static segment
/// wins when both match.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/films",
            get(film_routes::list_films)
                .post(film_routes::create_film)
                .put(film_routes::update_film),
        )
        .route("/films/popular", get(film_routes::popular_films))
        .route("/films/:id", get(film_routes::get_film))
        .route(
            "/films/:id/like/:user_id",
            put(film_routes::add_like).delete(film_routes::remove_like),
        )
        .route(
            "/users",
            get(user_routes::list_users)
                .post(user_routes::create_user)
                .put(user_routes::update_user),
        )
        .route("/users/:id", get(user_routes::get_user))
        .route("/users/:id/friends", get(user_routes::list_friends))
        .route(
            "/users/:id/friends/common/:other_id",
            get(user_routes::common_friends),
        )
        .route(
            "/users/:id/friends/:friend_id",
            put(user_routes::add_friend).delete(user_routes::remove_friend),
        )
        .route("/genres", get(genre_routes::list_genres))
        .route("/genres/:id", get(genre_routes::get_genre))
        .route("/mpa", get(mpa_routes::list_ratings))
        .route("/mpa/:id", get(mpa_routes::get_rating))
        .layer(Extension(state))
}
