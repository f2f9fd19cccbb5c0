// src/api/mod.rs
//
// API Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the services
// - It provides the boundary between HTTP (axum) and Domain (Services)
// - It translates between DTOs and domain entities
// - Status codes and the error envelope live in error_handling

pub mod dto;
pub mod error_handling;
pub mod routes;
pub mod state;

pub use error_handling::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
