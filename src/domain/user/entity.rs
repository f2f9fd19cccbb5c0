use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A registered user of the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier; None until the user has been created
    pub id: Option<UserId>,

    /// Contact address, must be email-shaped
    pub email: String,

    /// Handle, non-empty and free of whitespace
    pub login: String,

    /// Display name; falls back to the login when left blank
    pub name: String,

    /// Date of birth; optional, never in the future
    pub birthday: Option<NaiveDate>,

    /// Ids of mutual friends. Owned by the friendship index and filled
    /// in when the user is assembled for a read.
    pub friends: BTreeSet<UserId>,
}

impl User {
    /// Create a new User entity.
    /// A blank or absent display name is normalized to the login here,
    /// on every construction, so it holds for creates and updates alike.
    pub fn new(
        id: Option<UserId>,
        email: String,
        login: String,
        name: Option<String>,
        birthday: Option<NaiveDate>,
    ) -> Self {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => login.clone(),
        };
        Self {
            id,
            email,
            login,
            name,
            birthday,
            friends: BTreeSet::new(),
        }
    }

    pub fn with_friends(mut self, friends: BTreeSet<UserId>) -> Self {
        self.friends = friends;
        self
    }
}
