// Film domain module

pub mod entity;
pub mod invariants;

pub use entity::{Film, FilmId};
pub use invariants::{FilmRules, EARLIEST_RELEASE_YMD, MAX_DESCRIPTION_CHARS};
