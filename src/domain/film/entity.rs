use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::genre::Genre;
use crate::domain::mpa::Mpa;
use crate::domain::user::UserId;

pub type FilmId = i64;

/// A film in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    /// Store-assigned identifier; None until the film has been created
    pub id: Option<FilmId>,

    /// Title, must not be blank
    pub name: String,

    /// Free-form synopsis, at most 200 characters
    pub description: String,

    /// Theatrical release date; required, no earlier than the first
    /// public film screening (1895-12-28)
    pub release_date: Option<NaiveDate>,

    /// Running time in minutes, positive
    pub duration: i32,

    /// Genre tags in genre-id order, deduplicated; empty when untagged
    pub genres: Vec<Genre>,

    /// Age rating; the unset marker when the film has none
    pub mpa: Mpa,

    /// Ids of users who liked this film. Owned by the like index and
    /// filled in when the film is assembled for a read; mutating this
    /// set directly changes nothing.
    pub likes: BTreeSet<UserId>,
}

impl Film {
    /// Create a new Film entity, normalizing the optional containers
    /// so they are never absent past this point.
    pub fn new(
        id: Option<FilmId>,
        name: String,
        description: String,
        release_date: Option<NaiveDate>,
        duration: i32,
        genres: Option<Vec<Genre>>,
        mpa: Option<Mpa>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            release_date,
            duration,
            genres: genres.unwrap_or_default(),
            mpa: mpa.unwrap_or_else(Mpa::unset),
            likes: BTreeSet::new(),
        }
    }

    /// Like count is always derived from the like set, never stored.
    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }

    pub fn with_likes(mut self, likes: BTreeSet<UserId>) -> Self {
        self.likes = likes;
        self
    }
}
