use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::data::kv_store::{KeyValueStore, read_json, write_json};
use crate::domain::error::DomainError;
use crate::domain::session::Session;

pub const SESSION_KEY: &str = "currentUser";

/// Persists the last logged-in session so a later process can resume it.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> Result<(), DomainError>;
    async fn load(&self) -> Result<Option<Session>, DomainError>;
    async fn clear(&self) -> Result<(), DomainError>;
}

pub struct KvSessionRepository<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> KvSessionRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore> SessionRepository for KvSessionRepository<S> {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        write_json(self.store.as_ref(), SESSION_KEY, session).await?;
        info!(email = %session.email(), "session stored");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>, DomainError> {
        read_json(self.store.as_ref(), SESSION_KEY).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.store.remove(SESSION_KEY).await
    }
}
