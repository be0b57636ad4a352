use std::sync::Arc;

use tracing::info;

use crate::application::account_service::AccountService;
use crate::application::ad_service::AdService;
use crate::data::ad_repository::KvAdRepository;
use crate::data::kv_store::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::data::session_repository::KvSessionRepository;
use crate::data::user_repository::KvUserRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;

pub type Accounts<S> = AccountService<KvUserRepository<S>, KvSessionRepository<S>>;
pub type Ads<S> = AdService<KvAdRepository<S>>;

/// Both services wired onto one shared key-value store.
pub struct AppContext<S: KeyValueStore + 'static> {
    pub accounts: Accounts<S>,
    pub ads: Ads<S>,
}

impl<S: KeyValueStore + 'static> AppContext<S> {
    pub fn new(store: Arc<S>) -> Self {
        let user_repo = Arc::new(KvUserRepository::new(Arc::clone(&store)));
        let session_repo = Arc::new(KvSessionRepository::new(Arc::clone(&store)));
        let ad_repo = Arc::new(KvAdRepository::new(store));

        Self {
            accounts: AccountService::new(user_repo, session_repo),
            ads: AdService::new(ad_repo),
        }
    }
}

impl AppContext<JsonFileStore> {
    pub async fn open(config: &AppConfig) -> Result<Self, DomainError> {
        let store = JsonFileStore::open(&config.data_file).await?;
        info!(path = %store.path().display(), "data store opened");
        Ok(Self::new(Arc::new(store)))
    }
}

impl AppContext<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
