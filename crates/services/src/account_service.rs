use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use prep_core::model::{User, UserId, normalize_email};
use storage::repository::{StorageError, UserRepository};

use crate::Clock;
use crate::error::AccountError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The signed-in user, passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    user: User,
    signed_in_at: DateTime<Utc>,
}

impl UserSession {
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id()
    }

    #[must_use]
    pub fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }
}

/// Sign-in and registration over the user repository.
///
/// Passwords must be present but are not checked against anything.
#[derive(Clone)]
pub struct AccountService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// # Errors
    ///
    /// Returns `AccountError` for missing fields, a malformed email, or an
    /// email with no account.
    pub async fn sign_in(&self, form: &SignInForm) -> Result<UserSession, AccountError> {
        if form.email.trim().is_empty() {
            return Err(AccountError::MissingEmail);
        }
        if form.password.is_empty() {
            return Err(AccountError::MissingPassword);
        }
        let email = normalize_email(&form.email)?;
        let found = self.users.find_user_by_email(&email).await?;
        let Some(user) = found else {
            return Err(AccountError::UnknownAccount(email));
        };

        info!(user_id = %user.id(), "signed in");
        Ok(self.open(user))
    }

    /// # Errors
    ///
    /// Returns `AccountError` for missing or invalid fields, or
    /// `AccountError::EmailTaken` if the email is already registered.
    pub async fn register(&self, form: &RegistrationForm) -> Result<UserSession, AccountError> {
        if form.email.trim().is_empty() {
            return Err(AccountError::MissingEmail);
        }
        if form.password.is_empty() {
            return Err(AccountError::MissingPassword);
        }
        let user = User::new(UserId::new(0), form.name.as_str(), form.email.as_str(), None)?;
        let user = match self.users.insert_user(user).await {
            Ok(user) => user,
            Err(StorageError::Conflict) => return Err(AccountError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id(), "registered");
        Ok(self.open(user))
    }

    /// End a session. The value is consumed so it cannot be used afterwards.
    pub fn sign_out(&self, session: UserSession) {
        info!(user_id = %session.user_id(), "signed out");
    }

    fn open(&self, user: User) -> UserSession {
        UserSession {
            user,
            signed_in_at: self.clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::UserError;
    use prep_core::time::{fixed_clock, fixed_now};
    use storage::Storage;

    fn service() -> AccountService {
        AccountService::new(fixed_clock(), Storage::seeded().unwrap().users)
    }

    fn sign_in_form(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn demo_user_signs_in() {
        let session = service()
            .sign_in(&sign_in_form("Alex@Example.com", "anything"))
            .await
            .unwrap();
        assert_eq!(session.user().name(), "Alex Johnson");
        assert_eq!(session.signed_in_at(), fixed_now());
    }

    #[tokio::test]
    async fn missing_fields_are_reported_first() {
        let service = service();
        assert!(matches!(
            service.sign_in(&sign_in_form(" ", "x")).await,
            Err(AccountError::MissingEmail)
        ));
        assert!(matches!(
            service.sign_in(&sign_in_form("alex@example.com", "")).await,
            Err(AccountError::MissingPassword)
        ));
        assert!(matches!(
            service.sign_in(&sign_in_form("nobody", "x")).await,
            Err(AccountError::User(UserError::InvalidEmail(_)))
        ));
        assert!(matches!(
            service.sign_in(&sign_in_form("nobody@example.com", "x")).await,
            Err(AccountError::UnknownAccount(_))
        ));
    }

    #[tokio::test]
    async fn registration_creates_account_once() {
        let service = service();
        let form = RegistrationForm {
            name: "Jamie Doe".into(),
            email: "jamie@example.com".into(),
            password: "secret".into(),
        };
        let session = service.register(&form).await.unwrap();
        assert_eq!(session.user().email(), "jamie@example.com");

        assert!(matches!(
            service.register(&form).await,
            Err(AccountError::EmailTaken)
        ));

        let again = service
            .sign_in(&sign_in_form("jamie@example.com", "other"))
            .await
            .unwrap();
        assert_eq!(again.user_id(), session.user_id());
        service.sign_out(again);
    }

    #[tokio::test]
    async fn registration_requires_a_name() {
        let form = RegistrationForm {
            name: "  ".into(),
            email: "jamie@example.com".into(),
            password: "secret".into(),
        };
        assert!(matches!(
            service().register(&form).await,
            Err(AccountError::User(UserError::EmptyName))
        ));
    }
}
