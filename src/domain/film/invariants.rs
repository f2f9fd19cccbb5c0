use chrono::NaiveDate;

use super::entity::Film;
use crate::domain::{DomainError, DomainResult};

/// First public film screening (Lumiere brothers, Paris); nothing in the
/// catalog may predate it.
pub const EARLIEST_RELEASE_YMD: (i32, u32, u32) = (1895, 12, 28);

/// Upper bound on description length, counted in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Validation rules for Film invariants.
/// Checks run in a fixed order (name, description, release date, duration)
/// and stop at the first violation.
#[derive(Debug, Clone)]
pub struct FilmRules {
    earliest_release_date: NaiveDate,
    max_description_chars: usize,
}

impl Default for FilmRules {
    fn default() -> Self {
        let (y, m, d) = EARLIEST_RELEASE_YMD;
        Self {
            earliest_release_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            max_description_chars: MAX_DESCRIPTION_CHARS,
        }
    }
}

impl FilmRules {
    pub fn validate(&self, film: &Film) -> DomainResult<()> {
        self.validate_name(&film.name)?;
        self.validate_description(&film.description)?;
        self.validate_release_date(film.release_date)?;
        self.validate_duration(film.duration)?;
        Ok(())
    }

    /// Name cannot be empty or whitespace-only
    fn validate_name(&self, name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::BlankName);
        }
        Ok(())
    }

    fn validate_description(&self, description: &str) -> DomainResult<()> {
        let length = description.chars().count();
        if length > self.max_description_chars {
            return Err(DomainError::DescriptionTooLong {
                length,
                limit: self.max_description_chars,
            });
        }
        Ok(())
    }

    /// Release date is required and bounded below by 1895-12-28 inclusive
    fn validate_release_date(&self, release_date: Option<NaiveDate>) -> DomainResult<()> {
        match release_date {
            None => Err(DomainError::MissingReleaseDate),
            Some(date) if date < self.earliest_release_date => {
                Err(DomainError::ReleaseDateTooEarly {
                    earliest: self.earliest_release_date,
                })
            }
            Some(_) => Ok(()),
        }
    }

    fn validate_duration(&self, duration: i32) -> DomainResult<()> {
        if duration <= 0 {
            return Err(DomainError::NonPositiveDuration(duration));
        }
        Ok(())
    }
}
