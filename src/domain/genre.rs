use serde::{Deserialize, Serialize};

pub type GenreId = i64;

/// A genre tag from the reference catalog (Comedy, Drama, ...).
/// Rows are seeded by the schema and read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}
