// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services run validation, produce typed errors, and assemble full
// entities (like sets, friend sets) from the owning membership index on
// every read. Storage stays behind repository traits.

pub mod film_service;
pub mod genre_service;
pub mod mpa_service;
pub mod user_service;

#[cfg(test)]
mod user_service_tests;

// Re-export all services and their types
pub use film_service::{FilmService, DEFAULT_TOP_COUNT};

pub use user_service::UserService;

pub use genre_service::GenreService;

pub use mpa_service::MpaService;
