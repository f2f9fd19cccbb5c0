use serde::{Deserialize, Serialize};

pub type MpaId = i64;

/// An MPA age rating from the reference catalog (G, PG, PG-13, R, NC-17).
///
/// Films without a rating carry the unset marker (id 0) rather than an
/// absent field, so downstream code never deals with a missing rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mpa {
    pub id: MpaId,
    pub name: String,
    pub description: String,
}

impl Mpa {
    pub fn new(id: MpaId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Marker for films that were created without a rating.
    pub fn unset() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.id == 0
    }
}

impl Default for Mpa {
    fn default() -> Self {
        Mpa::unset()
    }
}
