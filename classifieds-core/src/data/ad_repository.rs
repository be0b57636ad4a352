use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::data::kv_store::{KeyValueStore, read_json, write_json};
use crate::domain::ad::{Ad, AdDraft};
use crate::domain::error::DomainError;
use crate::domain::query::sort_recent_first;

pub const ADS_KEY: &str = "ads";

type AdIndex = BTreeMap<Uuid, Ad>;

#[async_trait]
pub trait AdRepository: Send + Sync {
    async fn create(&self, ad: Ad) -> Result<Ad, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ad>, DomainError>;
    async fn update_ad(&self, id: Uuid, update: AdDraft) -> Result<Option<Ad>, DomainError>;
    /// Returns whether a record was removed.
    async fn delete_ad(&self, id: Uuid) -> Result<bool, DomainError>;
    /// All ads, newest first.
    async fn get_ads(&self) -> Result<Vec<Ad>, DomainError>;
}

/// Ads kept as one id-indexed JSON object under [`ADS_KEY`].
pub struct KvAdRepository<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> KvAdRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<AdIndex, DomainError> {
        Ok(read_json(self.store.as_ref(), ADS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, ads: &AdIndex) -> Result<(), DomainError> {
        write_json(self.store.as_ref(), ADS_KEY, ads)
            .await
            .map_err(|e| {
                error!("failed to write ads: {}", e);
                e
            })
    }
}

#[async_trait]
impl<S: KeyValueStore> AdRepository for KvAdRepository<S> {
    async fn create(&self, ad: Ad) -> Result<Ad, DomainError> {
        let mut ads = self.load().await?;
        if ads.contains_key(&ad.id) {
            return Err(DomainError::Internal(format!("duplicate ad id {}", ad.id)));
        }
        ads.insert(ad.id, ad.clone());
        self.save(&ads).await?;

        info!(ad_id = %ad.id, user_id = %ad.user_id, "ad created");
        Ok(ad)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ad>, DomainError> {
        Ok(self.load().await?.remove(&id))
    }

    async fn update_ad(&self, id: Uuid, update: AdDraft) -> Result<Option<Ad>, DomainError> {
        let mut ads = self.load().await?;
        let Some(ad) = ads.get_mut(&id) else {
            return Ok(None);
        };
        ad.apply(update);
        let updated = ad.clone();
        self.save(&ads).await?;

        info!(ad_id = %id, "ad updated");
        Ok(Some(updated))
    }

    async fn delete_ad(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut ads = self.load().await?;
        if ads.remove(&id).is_none() {
            return Ok(false);
        }
        self.save(&ads).await?;

        info!(ad_id = %id, "ad deleted");
        Ok(true)
    }

    async fn get_ads(&self) -> Result<Vec<Ad>, DomainError> {
        let mut ads: Vec<Ad> = self.load().await?.into_values().collect();
        sort_recent_first(&mut ads);
        Ok(ads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::kv_store::MemoryStore;
    use crate::domain::ad::Currency;
    use chrono::{Duration, Utc};

    fn draft(title: &str) -> AdDraft {
        AdDraft {
            title: title.into(),
            category: "electronics".into(),
            price: "1200".into(),
            currency: Currency::Dollars,
            description: "Barely used".into(),
            location: "Canada".into(),
            thumbnail: Some("thumb.jpg".into()),
            images: vec!["1.jpg".into(), "2.jpg".into()],
        }
    }

    #[tokio::test]
    async fn stores_ads_indexed_by_id() -> Result<(), DomainError> {
        let store = Arc::new(MemoryStore::new());
        let repo = KvAdRepository::new(Arc::clone(&store));
        let ad = repo
            .create(Ad::new("s@x.com".into(), draft("Laptop"), Utc::now()))
            .await?;

        let raw = store.get(ADS_KEY).await?.unwrap_or_default();
        let index: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(index[ad.id.to_string()]["title"], "Laptop");

        assert_eq!(repo.find_by_id(ad.id).await?, Some(ad));
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn get_ads_orders_newest_first() -> Result<(), DomainError> {
        let repo = KvAdRepository::new(Arc::new(MemoryStore::new()));
        let now = Utc::now();
        repo.create(Ad::new("s@x.com".into(), draft("middle"), now))
            .await?;
        repo.create(Ad::new("s@x.com".into(), draft("newest"), now + Duration::seconds(5)))
            .await?;
        repo.create(Ad::new("s@x.com".into(), draft("oldest"), now - Duration::seconds(5)))
            .await?;

        let titles: Vec<String> = repo.get_ads().await?.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() -> Result<(), DomainError> {
        let repo = KvAdRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.update_ad(Uuid::new_v4(), draft("x")).await?, None);
        assert!(!repo.delete_ad(Uuid::new_v4()).await?);

        let ad = repo
            .create(Ad::new("s@x.com".into(), draft("Laptop"), Utc::now()))
            .await?;
        let updated = repo.update_ad(ad.id, draft("Gaming laptop")).await?;
        assert_eq!(updated.map(|a| a.title), Some("Gaming laptop".to_string()));

        assert!(repo.delete_ad(ad.id).await?);
        assert!(repo.get_ads().await?.is_empty());
        Ok(())
    }
}
