// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod film;
pub mod genre;
pub mod mpa;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Film Domain
pub use film::{Film, FilmId, FilmRules, EARLIEST_RELEASE_YMD, MAX_DESCRIPTION_CHARS};

// User Domain
pub use user::{User, UserId, UserRules};

// Reference Catalogs
pub use genre::{Genre, GenreId};
pub use mpa::{Mpa, MpaId};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants.
/// Validators report the first violation they hit and stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("film name must not be blank")]
    BlankName,

    #[error("film description must not exceed {limit} characters (got {length})")]
    DescriptionTooLong { length: usize, limit: usize },

    #[error("release date is required")]
    MissingReleaseDate,

    #[error("release date must not be earlier than {earliest}")]
    ReleaseDateTooEarly { earliest: chrono::NaiveDate },

    #[error("film duration must be a positive number of minutes (got {0})")]
    NonPositiveDuration(i32),

    #[error("email address is not valid: {0:?}")]
    InvalidEmail(String),

    #[error("login must be non-empty and contain no whitespace: {0:?}")]
    InvalidLogin(String),

    #[error("birthday must not be in the future")]
    BirthdayInFuture,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
