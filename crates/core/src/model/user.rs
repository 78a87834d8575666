use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// A candidate using the practice app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    avatar: Option<String>,
}

impl User {
    /// # Errors
    ///
    /// Returns `UserError` if the name is blank or the email is malformed.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: Option<String>,
    ) -> Result<Self, UserError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        let email = normalize_email(&email.into())?;
        Ok(Self {
            id,
            name,
            email,
            avatar,
        })
    }

    /// Returns a copy with a different id. Used when a repository assigns ids.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Up to two leading characters of the name, shown when there is no avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect()
    }
}

/// Lowercases and trims an email, checking it has the `local@domain.tld` shape.
///
/// # Errors
///
/// Returns `UserError::InvalidEmail` when the shape does not match.
pub fn normalize_email(raw: &str) -> Result<String, UserError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(UserError::InvalidEmail(raw.to_owned()))
    }
}
