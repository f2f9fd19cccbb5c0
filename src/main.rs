// src/main.rs

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use filmgraph::api::{router, AppState};
use filmgraph::db::{
    create_connection_pool, database_path, get_database_stats, initialize_database,
    verify_database_integrity,
};
use filmgraph::repositories::*;
use filmgraph::services::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. INFRASTRUCTURE
    let pool = Arc::new(create_connection_pool()?);
    log::info!("database at {}", database_path()?.display());

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        log::info!(
            "database ready: {} films, {} users, {} likes",
            stats.film_count,
            stats.user_count,
            stats.like_count
        );
    }

    // 2. REPOSITORIES
    // The type `Arc<dyn Trait>` is used to match the service constructor signatures exactly.
    let film_repo: Arc<dyn FilmRepository> = Arc::new(SqliteFilmRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let like_repo: Arc<dyn LikeRepository> = Arc::new(SqliteLikeRepository::new(pool.clone()));
    let friend_repo: Arc<dyn FriendRepository> =
        Arc::new(SqliteFriendRepository::new(pool.clone()));
    let genre_repo: Arc<dyn GenreRepository> = Arc::new(SqliteGenreRepository::new(pool.clone()));
    let mpa_repo: Arc<dyn MpaRepository> = Arc::new(SqliteMpaRepository::new(pool.clone()));

    // 3. SERVICES
    let film_service = Arc::new(FilmService::new(film_repo, like_repo));
    let user_service = Arc::new(UserService::new(user_repo, friend_repo));
    let genre_service = Arc::new(GenreService::new(genre_repo));
    let mpa_service = Arc::new(MpaService::new(mpa_repo));

    // 4. APPLICATION STATE
    let state = Arc::new(AppState {
        film_service,
        user_service,
        genre_service,
        mpa_service,
    });

    // 5. HTTP BOOTSTRAP
    let app = router(state);
    let addr: SocketAddr = env::var("FILMGRAPH_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()
        .context("FILMGRAPH_ADDR must be a host:port pair")?;
    log::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
