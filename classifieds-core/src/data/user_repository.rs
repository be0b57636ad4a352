use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::data::kv_store::{KeyValueStore, read_json, write_json};
use crate::domain::error::DomainError;
use crate::domain::user::{User, normalize_email};

const USER_KEY_PREFIX: &str = "user_";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}

pub fn user_key(email: &str) -> String {
    format!("{}{}", USER_KEY_PREFIX, normalize_email(email))
}

pub struct KvUserRepository<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> KvUserRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore> UserRepository for KvUserRepository<S> {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let key = user_key(&user.email);
        if self.store.get(&key).await?.is_some() {
            return Err(DomainError::UserAlreadyExists(user.email));
        }

        write_json(self.store.as_ref(), &key, &user)
            .await
            .map_err(|e| {
                error!("failed to create user: {}", e);
                e
            })?;

        info!(email = %user.email, "user created");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        read_json(self.store.as_ref(), &user_key(email))
            .await
            .map_err(|e| {
                error!("failed to find user by email {}: {}", email, e);
                e
            })
    }
}
