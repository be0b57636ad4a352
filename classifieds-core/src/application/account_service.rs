use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::data::session_repository::SessionRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::session::Session;
use crate::domain::user::{SignupForm, User, UserProfile, normalize_email};
use crate::infrastructure::security::{hash_password, password_matches};

/// Signup, login and the persisted current-session pointer.
pub struct AccountService<R: UserRepository + 'static, S: SessionRepository + 'static> {
    users: Arc<R>,
    sessions: Arc<S>,
}

impl<R: UserRepository + 'static, S: SessionRepository + 'static> Clone for AccountService<R, S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<R, S> AccountService<R, S>
where
    R: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    pub fn new(users: Arc<R>, sessions: Arc<S>) -> Self {
        Self { users, sessions }
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn create_account(&self, form: SignupForm) -> Result<UserProfile, DomainError> {
        form.validate()?;

        let hash = hash_password(&form.password)?;
        let user = User::new(
            form.name.trim().to_string(),
            form.email,
            form.phone.trim().to_string(),
            hash,
            form.profile_pic,
        );
        let user = self.users.create(user).await?;
        Ok(user.profile())
    }

    /// Checks credentials and, on success only, stores the new session.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(email.clone()))?;

        if !password_matches(password, &user.password_hash) {
            warn!(email = %email, "login rejected");
            return Err(DomainError::InvalidCredentials);
        }

        let session = Session::new(&user);
        self.sessions.save(&session).await?;
        info!(email = %email, "logged in");
        Ok(session)
    }

    pub async fn current_session(&self) -> Result<Option<Session>, DomainError> {
        self.sessions.load().await
    }

    /// The current session, or `Forbidden` when nobody is logged in.
    pub async fn require_session(&self) -> Result<Session, DomainError> {
        self.current_session()
            .await?
            .ok_or_else(|| DomainError::Forbidden("please log in first".into()))
    }

    #[instrument(skip(self))]
    pub async fn clear_session(&self) -> Result<(), DomainError> {
        self.sessions.clear().await
    }

    pub async fn get_user(&self, email: &str) -> Result<UserProfile, DomainError> {
        self.users
            .find_by_email(email)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| DomainError::UserNotFound(normalize_email(email)))
    }
}
