// src/services/mpa_service.rs
use std::sync::Arc;

use crate::domain::mpa::{Mpa, MpaId};
use crate::error::{AppError, AppResult};
use crate::repositories::MpaRepository;

pub struct MpaService {
    mpa_repo: Arc<dyn MpaRepository>,
}

impl MpaService {
    pub fn new(mpa_repo: Arc<dyn MpaRepository>) -> Self {
        Self { mpa_repo }
    }

    pub fn list_ratings(&self) -> AppResult<Vec<Mpa>> {
        self.mpa_repo.list_all()
    }

    pub fn get_rating(&self, mpa_id: MpaId) -> AppResult<Mpa> {
        self.mpa_repo.get_by_id(mpa_id)?.ok_or_else(|| {
            AppError::not_found(format!("MPA rating with id = {} not found", mpa_id))
        })
    }
}
