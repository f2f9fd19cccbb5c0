// src/repositories/memory.rs
//
// In-memory storage backend. One MemoryStore holds every table behind a
// single RwLock, so each repository call observes and mutates a
// consistent snapshot (the single-writer counterpart of the relational
// backend's transactions). The same repository contracts hold as for
// SQLite, with one documented exception: likes from unknown user ids are
// accepted here, since only the relational schema carries that foreign key.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::domain::film::{Film, FilmId};
use crate::domain::genre::{Genre, GenreId};
use crate::domain::mpa::{Mpa, MpaId};
use crate::domain::user::{User, UserId};
use crate::error::{AppError, AppResult};

use super::film_repository::FilmRepository;
use super::friend_repository::FriendRepository;
use super::genre_repository::GenreRepository;
use super::like_repository::LikeRepository;
use super::mpa_repository::MpaRepository;
use super::user_repository::UserRepository;

#[derive(Debug, Clone)]
struct FilmRow {
    name: String,
    description: String,
    release_date: Option<NaiveDate>,
    duration: i32,
    mpa_id: Option<MpaId>,
}

#[derive(Debug, Clone)]
struct UserRow {
    email: String,
    login: String,
    name: String,
    birthday: Option<NaiveDate>,
}

#[derive(Debug)]
struct MemoryState {
    films: BTreeMap<FilmId, FilmRow>,
    users: BTreeMap<UserId, UserRow>,
    film_genres: HashMap<FilmId, Vec<GenreId>>,
    film_likes: HashMap<FilmId, BTreeSet<UserId>>,
    friendships: HashMap<UserId, BTreeSet<UserId>>,
    genres: BTreeMap<GenreId, Genre>,
    mpa_ratings: BTreeMap<MpaId, Mpa>,
    next_film_id: FilmId,
    next_user_id: UserId,
}

/// Shared state for the in-memory repository family.
/// Seeded with the same reference catalogs as schema.sql.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let genres = [
            (1, "Comedy", "Lighthearted films played for laughs"),
            (2, "Drama", "Serious, plot-driven stories"),
            (3, "Cartoon", "Animated features"),
            (4, "Thriller", "Suspense-driven films"),
            (5, "Documentary", "Non-fiction films"),
            (6, "Action", "High-energy films built around stunts and set pieces"),
        ]
        .into_iter()
        .map(|(id, name, description)| (id, Genre::new(id, name, description)))
        .collect();

        let mpa_ratings = [
            (1, "G", "General audiences, all ages admitted"),
            (2, "PG", "Parental guidance suggested"),
            (3, "PG-13", "Parents strongly cautioned, some material may be inappropriate under 13"),
            (4, "R", "Restricted, under 17 requires accompanying adult"),
            (5, "NC-17", "Adults only"),
        ]
        .into_iter()
        .map(|(id, name, description)| (id, Mpa::new(id, name, description)))
        .collect();

        Self {
            inner: RwLock::new(MemoryState {
                films: BTreeMap::new(),
                users: BTreeMap::new(),
                film_genres: HashMap::new(),
                film_likes: HashMap::new(),
                friendships: HashMap::new(),
                genres,
                mpa_ratings,
                next_film_id: 1,
                next_user_id: 1,
            }),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, MemoryState>> {
        self.inner
            .read()
            .map_err(|_| AppError::Store("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, MemoryState>> {
        self.inner
            .write()
            .map_err(|_| AppError::Store("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    /// Mirror of the relational foreign keys on film writes.
    fn check_film_refs(&self, film: &Film) -> AppResult<()> {
        for genre in &film.genres {
            if !self.genres.contains_key(&genre.id) {
                return Err(AppError::Store(format!(
                    "genre with id = {} is not in the reference catalog",
                    genre.id
                )));
            }
        }
        if !film.mpa.is_unset() && !self.mpa_ratings.contains_key(&film.mpa.id) {
            return Err(AppError::Store(format!(
                "MPA rating with id = {} is not in the reference catalog",
                film.mpa.id
            )));
        }
        Ok(())
    }

    fn film_row(film: &Film) -> FilmRow {
        FilmRow {
            name: film.name.clone(),
            description: film.description.clone(),
            release_date: film.release_date,
            duration: film.duration,
            mpa_id: if film.mpa.is_unset() { None } else { Some(film.mpa.id) },
        }
    }

    /// Genre links are stored deduplicated in id order, matching what the
    /// relational backend's primary key and read ordering produce.
    fn genre_link_ids(film: &Film) -> Vec<GenreId> {
        let mut ids: Vec<GenreId> = film.genres.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn assemble_film(&self, id: FilmId, row: &FilmRow) -> Film {
        let genres = self
            .film_genres
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|gid| self.genres.get(gid).cloned())
                    .collect()
            })
            .unwrap_or_default();

        let mpa = match row.mpa_id {
            Some(mpa_id) => self
                .mpa_ratings
                .get(&mpa_id)
                .cloned()
                .unwrap_or_else(Mpa::unset),
            None => Mpa::unset(),
        };

        Film {
            id: Some(id),
            name: row.name.clone(),
            description: row.description.clone(),
            release_date: row.release_date,
            duration: row.duration,
            genres,
            mpa,
            likes: BTreeSet::new(),
        }
    }

    fn assemble_user(&self, id: UserId, row: &UserRow) -> User {
        User {
            id: Some(id),
            email: row.email.clone(),
            login: row.login.clone(),
            name: row.name.clone(),
            birthday: row.birthday,
            friends: BTreeSet::new(),
        }
    }

    fn like_count(&self, film_id: FilmId) -> usize {
        self.film_likes.get(&film_id).map(|s| s.len()).unwrap_or(0)
    }
}

// ============================================================================
// FILMS
// ============================================================================

pub struct InMemoryFilmRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryFilmRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl FilmRepository for InMemoryFilmRepository {
    fn create(&self, film: &Film) -> AppResult<FilmId> {
        let mut state = self.store.write()?;
        state.check_film_refs(film)?;

        let id = state.next_film_id;
        state.next_film_id += 1;

        state.films.insert(id, MemoryState::film_row(film));
        state.film_genres.insert(id, MemoryState::genre_link_ids(film));
        Ok(id)
    }

    fn update(&self, id: FilmId, film: &Film) -> AppResult<()> {
        let mut state = self.store.write()?;
        state.check_film_refs(film)?;

        if !state.films.contains_key(&id) {
            return Err(AppError::not_found(format!("film with id = {} not found", id)));
        }

        state.films.insert(id, MemoryState::film_row(film));
        state.film_genres.insert(id, MemoryState::genre_link_ids(film));
        Ok(())
    }

    fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        let state = self.store.read()?;
        Ok(state.films.get(&id).map(|row| state.assemble_film(id, row)))
    }

    fn list_all(&self) -> AppResult<Vec<Film>> {
        let state = self.store.read()?;
        Ok(state
            .films
            .iter()
            .map(|(id, row)| state.assemble_film(*id, row))
            .collect())
    }

    fn top_by_likes(&self, limit: i64) -> AppResult<Vec<Film>> {
        let state = self.store.read()?;

        let mut films: Vec<Film> = state
            .films
            .iter()
            .map(|(id, row)| state.assemble_film(*id, row))
            .collect();

        // Stable sort keeps ties in id order
        films.sort_by_key(|film| {
            std::cmp::Reverse(film.id.map(|id| state.like_count(id)).unwrap_or(0))
        });
        films.truncate(limit.max(0) as usize);
        Ok(films)
    }

    fn exists(&self, id: FilmId) -> AppResult<bool> {
        Ok(self.store.read()?.films.contains_key(&id))
    }
}

// ============================================================================
// USERS
// ============================================================================

pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create(&self, user: &User) -> AppResult<UserId> {
        let mut state = self.store.write()?;

        let id = state.next_user_id;
        state.next_user_id += 1;

        state.users.insert(
            id,
            UserRow {
                email: user.email.clone(),
                login: user.login.clone(),
                name: user.name.clone(),
                birthday: user.birthday,
            },
        );
        Ok(id)
    }

    fn update(&self, id: UserId, user: &User) -> AppResult<()> {
        let mut state = self.store.write()?;

        if !state.users.contains_key(&id) {
            return Err(AppError::not_found(format!("user with id = {} not found", id)));
        }

        state.users.insert(
            id,
            UserRow {
                email: user.email.clone(),
                login: user.login.clone(),
                name: user.name.clone(),
                birthday: user.birthday,
            },
        );
        Ok(())
    }

    fn get_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let state = self.store.read()?;
        Ok(state.users.get(&id).map(|row| state.assemble_user(id, row)))
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        let state = self.store.read()?;
        Ok(state
            .users
            .iter()
            .map(|(id, row)| state.assemble_user(*id, row))
            .collect())
    }

    fn exists(&self, id: UserId) -> AppResult<bool> {
        Ok(self.store.read()?.users.contains_key(&id))
    }
}

// ============================================================================
// LIKES
// ============================================================================

pub struct InMemoryLikeRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryLikeRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl LikeRepository for InMemoryLikeRepository {
    fn add(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        let mut state = self.store.write()?;
        Ok(state.film_likes.entry(film_id).or_default().insert(user_id))
    }

    fn remove(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        let mut state = self.store.write()?;
        Ok(state
            .film_likes
            .get_mut(&film_id)
            .map(|likes| likes.remove(&user_id))
            .unwrap_or(false))
    }

    fn likes_for_film(&self, film_id: FilmId) -> AppResult<BTreeSet<UserId>> {
        let state = self.store.read()?;
        Ok(state.film_likes.get(&film_id).cloned().unwrap_or_default())
    }
}

// ============================================================================
// FRIENDSHIPS
// ============================================================================

pub struct InMemoryFriendRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryFriendRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl FriendRepository for InMemoryFriendRepository {
    fn add(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut state = self.store.write()?;
        // Both directions under one lock, so the view is never lopsided
        state.friendships.entry(user_id).or_default().insert(friend_id);
        state.friendships.entry(friend_id).or_default().insert(user_id);
        Ok(())
    }

    fn remove(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut state = self.store.write()?;
        if let Some(friends) = state.friendships.get_mut(&user_id) {
            friends.remove(&friend_id);
        }
        if let Some(friends) = state.friendships.get_mut(&friend_id) {
            friends.remove(&user_id);
        }
        Ok(())
    }

    fn contains(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        let state = self.store.read()?;
        Ok(state
            .friendships
            .get(&user_id)
            .map(|friends| friends.contains(&friend_id))
            .unwrap_or(false))
    }

    fn friend_ids(&self, user_id: UserId) -> AppResult<BTreeSet<UserId>> {
        let state = self.store.read()?;
        Ok(state.friendships.get(&user_id).cloned().unwrap_or_default())
    }

    fn common_friend_ids(&self, user_id: UserId, other_id: UserId) -> AppResult<BTreeSet<UserId>> {
        let state = self.store.read()?;
        let empty = BTreeSet::new();
        let mine = state.friendships.get(&user_id).unwrap_or(&empty);
        let theirs = state.friendships.get(&other_id).unwrap_or(&empty);
        Ok(mine.intersection(theirs).copied().collect())
    }
}

// ============================================================================
// REFERENCE CATALOGS
// ============================================================================

pub struct InMemoryGenreRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryGenreRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl GenreRepository for InMemoryGenreRepository {
    fn list_all(&self) -> AppResult<Vec<Genre>> {
        Ok(self.store.read()?.genres.values().cloned().collect())
    }

    fn get_by_id(&self, id: GenreId) -> AppResult<Option<Genre>> {
        Ok(self.store.read()?.genres.get(&id).cloned())
    }

    fn list_by_film(&self, film_id: FilmId) -> AppResult<Vec<Genre>> {
        let state = self.store.read()?;
        Ok(state
            .film_genres
            .get(&film_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|gid| state.genres.get(gid).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub struct InMemoryMpaRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryMpaRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl MpaRepository for InMemoryMpaRepository {
    fn list_all(&self) -> AppResult<Vec<Mpa>> {
        Ok(self.store.read()?.mpa_ratings.values().cloned().collect())
    }

    fn get_by_id(&self, id: MpaId) -> AppResult<Option<Mpa>> {
        Ok(self.store.read()?.mpa_ratings.get(&id).cloned())
    }
}
