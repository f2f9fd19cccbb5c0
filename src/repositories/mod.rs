// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only
//
// Entities come back with their membership sets (likes, friends) empty;
// services assemble those from the owning index on every read.

pub mod film_repository;
pub mod friend_repository;
pub mod genre_repository;
pub mod like_repository;
pub mod memory;
pub mod mpa_repository;
pub mod user_repository;

pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use friend_repository::{FriendRepository, SqliteFriendRepository};
pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use like_repository::{LikeRepository, SqliteLikeRepository};
pub use mpa_repository::{MpaRepository, SqliteMpaRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

pub use memory::{
    InMemoryFilmRepository, InMemoryFriendRepository, InMemoryGenreRepository,
    InMemoryLikeRepository, InMemoryMpaRepository, InMemoryUserRepository, MemoryStore,
};
