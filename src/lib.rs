// src/lib.rs
// Filmgraph - Film catalog and social graph service
//
// Architecture:
// - Domain-centric: entities and their invariants live in domain
// - Layered: repositories persist, services orchestrate, api translates
// - Two backends: SQLite for the binary, in-memory for tests and embedding
// - Explicit: no implicit behavior, no magic

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// API LAYER
// ============================================================================

pub mod api;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    DomainError,
    DomainResult,
    // Film
    Film,
    FilmId,
    FilmRules,
    // Catalogs
    Genre,
    GenreId,
    Mpa,
    MpaId,
    // User
    User,
    UserId,
    UserRules,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    FilmRepository,
    FriendRepository,
    GenreRepository,
    // In-memory backend
    InMemoryFilmRepository,
    InMemoryFriendRepository,
    InMemoryGenreRepository,
    InMemoryLikeRepository,
    InMemoryMpaRepository,
    InMemoryUserRepository,
    LikeRepository,
    MemoryStore,
    MpaRepository,
    // SQLite backend
    SqliteFilmRepository,
    SqliteFriendRepository,
    SqliteGenreRepository,
    SqliteLikeRepository,
    SqliteMpaRepository,
    SqliteUserRepository,
    UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{FilmService, GenreService, MpaService, UserService, DEFAULT_TOP_COUNT};

// ============================================================================
// PUBLIC API - API Layer
// ============================================================================

pub use api::{router, AppState};
