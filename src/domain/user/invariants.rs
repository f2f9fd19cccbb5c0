use chrono::Utc;
use regex::Regex;

use super::entity::User;
use crate::domain::{DomainError, DomainResult};

/// Validation rules for User invariants.
/// Patterns are compiled once at construction; checks run in a fixed
/// order (email, login, birthday) and stop at the first violation.
#[derive(Debug, Clone)]
pub struct UserRules {
    email_pattern: Regex,
    login_pattern: Regex,
}

impl Default for UserRules {
    fn default() -> Self {
        Self {
            // Local part, @, dotted domain with a 2+ char final label
            email_pattern: Regex::new(r"^[\w.+-]+@([\w-]+\.)+[\w-]{2,}$").unwrap(),
            // Non-empty, no whitespace anywhere
            login_pattern: Regex::new(r"^\S+$").unwrap(),
        }
    }
}

impl UserRules {
    /// Validates all User invariants.
    /// Name defaulting is not checked here: `User::new` already
    /// normalized a blank name to the login.
    pub fn validate(&self, user: &User) -> DomainResult<()> {
        self.validate_email(&user.email)?;
        self.validate_login(&user.login)?;
        self.validate_birthday(user)?;
        Ok(())
    }

    fn validate_email(&self, email: &str) -> DomainResult<()> {
        if !self.email_pattern.is_match(email) {
            return Err(DomainError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    fn validate_login(&self, login: &str) -> DomainResult<()> {
        if !self.login_pattern.is_match(login) {
            return Err(DomainError::InvalidLogin(login.to_string()));
        }
        Ok(())
    }

    /// Birthday may be absent; today is fine, tomorrow is not
    fn validate_birthday(&self, user: &User) -> DomainResult<()> {
        if let Some(birthday) = user.birthday {
            if birthday > Utc::now().date_naive() {
                return Err(DomainError::BirthdayInFuture);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn user(email: &str, login: &str, name: Option<&str>) -> User {
        User::new(
            None,
            email.to_string(),
            login.to_string(),
            name.map(|n| n.to_string()),
            NaiveDate::from_ymd_opt(1990, 5, 17),
        )
    }

    #[test]
    fn test_valid_user() {
        let rules = UserRules::default();
        assert!(rules.validate(&user("bob@example.com", "bob", Some("Bob"))).is_ok());
    }

    #[test]
    fn test_bad_emails_fail() {
        let rules = UserRules::default();
        for bad in ["", "plainaddress", "no-at.example.com", "a@b", "a@b.", "@example.com"] {
            let result = rules.validate(&user(bad, "bob", None));
            assert_eq!(
                result,
                Err(DomainError::InvalidEmail(bad.to_string())),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_login_with_whitespace_fails() {
        let rules = UserRules::default();
        for bad in ["", "bob smith", " bob", "bob\t"] {
            let result = rules.validate(&user("bob@example.com", bad, None));
            assert_eq!(result, Err(DomainError::InvalidLogin(bad.to_string())));
        }
    }

    #[test]
    fn test_future_birthday_fails() {
        let rules = UserRules::default();
        let mut u = user("bob@example.com", "bob", None);
        u.birthday = Some(Utc::now().date_naive() + Duration::days(1));
        assert_eq!(rules.validate(&u), Err(DomainError::BirthdayInFuture));
    }

    #[test]
    fn test_today_and_absent_birthday_pass() {
        let rules = UserRules::default();
        let mut u = user("bob@example.com", "bob", None);

        u.birthday = Some(Utc::now().date_naive());
        assert!(rules.validate(&u).is_ok());

        u.birthday = None;
        assert!(rules.validate(&u).is_ok());
    }

    #[test]
    fn test_blank_name_normalizes_to_login() {
        assert_eq!(user("bob@example.com", "bob", None).name, "bob");
        assert_eq!(user("bob@example.com", "bob", Some("")).name, "bob");
        assert_eq!(user("bob@example.com", "bob", Some("   ")).name, "bob");
        assert_eq!(user("bob@example.com", "bob", Some("Bob")).name, "Bob");
    }
}
