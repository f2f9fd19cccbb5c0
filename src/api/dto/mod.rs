// src/api/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are wire-friendly representations (camelCase film fields)
// - DTOs NEVER leak domain invariants
// - Inbound payloads default every optional field, so the domain
//   validators, not the deserializer, report what is missing
// - Payloads reference genres and ratings by id; names are resolved
//   from the catalogs on the way back out

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::film::{Film, FilmId};
use crate::domain::user::{User, UserId};
use crate::domain::{Genre, GenreId, Mpa, MpaId};

// ============================================================================
// FILM DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDto {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub genres: Vec<GenreDto>,
    pub mpa: Option<MpaDto>,
    pub likes_count: usize,
    pub likes_list: Vec<UserId>,
}

/// Inbound film body for create and update. Update carries the id inside
/// the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmPayload {
    #[serde(default)]
    pub id: Option<FilmId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
    #[serde(default)]
    pub mpa: Option<MpaRef>,
}

/// A genre reference inside a film payload. Extra fields such as a
/// client-supplied name are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: GenreId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpaRef {
    pub id: MpaId,
}

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
    pub friends: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

// ============================================================================
// CATALOG DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: GenreId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpaDto {
    pub id: MpaId,
    pub name: String,
    pub description: String,
}

// ============================================================================
// RESPONSE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

// ============================================================================
// CONVERSION HELPERS
// ============================================================================

impl From<Film> for FilmDto {
    fn from(film: Film) -> Self {
        Self {
            id: film.id.unwrap_or_default(),
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            genres: film.genres.into_iter().map(GenreDto::from).collect(),
            mpa: if film.mpa.is_unset() {
                None
            } else {
                Some(MpaDto::from(film.mpa))
            },
            likes_count: film.likes.len(),
            likes_list: film.likes.into_iter().collect(),
        }
    }
}

impl FilmPayload {
    pub fn into_film(self) -> Film {
        let genres = self
            .genres
            .into_iter()
            .map(|genre| Genre::new(genre.id, "", ""))
            .collect();
        let mpa = self.mpa.map(|mpa| Mpa::new(mpa.id, "", ""));
        Film::new(
            self.id,
            self.name,
            self.description,
            self.release_date,
            self.duration,
            Some(genres),
            mpa,
        )
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            email: user.email,
            login: user.login,
            name: user.name,
            birthday: user.birthday,
            friends: user.friends.into_iter().collect(),
        }
    }
}

impl UserPayload {
    pub fn into_user(self) -> User {
        User::new(self.id, self.email, self.login, self.name, self.birthday)
    }
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            description: genre.description,
        }
    }
}

impl From<Mpa> for MpaDto {
    fn from(mpa: Mpa) -> Self {
        Self {
            id: mpa.id,
            name: mpa.name,
            description: mpa.description,
        }
    }
}
