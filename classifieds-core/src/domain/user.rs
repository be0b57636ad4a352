use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::validation::ValidationErrors;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid")
});

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        phone: String,
        password_hash: String,
        profile_pic: Option<String>,
    ) -> Self {
        Self {
            name,
            email: normalize_email(&email),
            phone,
            password_hash,
            profile_pic,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }
}

/// The user record without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub profile_pic: Option<String>,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(
                "name",
                format!("name must be at least {} characters long", MIN_NAME_LEN),
            );
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            errors.push("email", "please enter a valid email address");
        }
        let phone = self.phone.trim();
        if phone.len() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
            errors.push(
                "phone",
                format!("phone number must be {} digits", PHONE_DIGITS),
            );
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(
                "password",
                format!(
                    "password must be at least {} characters long",
                    MIN_PASSWORD_LEN
                ),
            );
        }
        if self.password != self.confirm_password {
            errors.push("confirm_password", "passwords do not match");
        }
        if self
            .profile_pic
            .as_deref()
            .is_none_or(|pic| pic.trim().is_empty())
        {
            errors.push("profile_pic", "please select a profile picture");
        }

        errors.into_result()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
