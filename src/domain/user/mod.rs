// User domain module

pub mod entity;
pub mod invariants;

pub use entity::{User, UserId};
pub use invariants::UserRules;
