use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::data::ad_repository::AdRepository;
use crate::domain::ad::{Ad, AdDraft};
use crate::domain::error::DomainError;
use crate::domain::query::AdQuery;
use crate::domain::session::Session;

pub struct AdService<R: AdRepository + 'static> {
    repo: Arc<R>,
}

impl<R: AdRepository + 'static> Clone for AdService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> AdService<R>
where
    R: AdRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Ad>, DomainError> {
        self.repo.get_ads().await
    }

    pub async fn query(&self, query: &AdQuery) -> Result<Vec<Ad>, DomainError> {
        let ads = self.repo.get_ads().await?;
        Ok(ads.into_iter().filter(|ad| query.matches(ad)).collect())
    }

    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<Ad>, DomainError> {
        self.query(&AdQuery::new().owner(email)).await
    }

    pub async fn search(
        &self,
        text: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Ad>, DomainError> {
        let mut query = AdQuery::new();
        if let Some(text) = text {
            query = query.text(text);
        }
        if let Some(category) = category {
            query = query.category(category);
        }
        self.query(&query).await
    }

    /// Empty `location` returns every ad.
    pub async fn filter_by_location(&self, location: &str) -> Result<Vec<Ad>, DomainError> {
        self.query(&AdQuery::new().location(location)).await
    }

    pub async fn get_ad(&self, id: Uuid) -> Result<Ad, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AdNotFound(id))
    }

    #[instrument(skip(self, session, draft), fields(user_id = %session.email()))]
    pub async fn create_ad(&self, session: &Session, draft: AdDraft) -> Result<Ad, DomainError> {
        draft.validate()?;

        let latest = self.repo.get_ads().await?.first().map(|ad| ad.created_at);
        let ad = Ad::new(
            session.email().to_string(),
            draft,
            next_created_at(Utc::now(), latest),
        );
        self.repo.create(ad).await
    }

    /// Replaces every editable field of an ad owned by the session's user.
    #[instrument(skip(self, session, draft), fields(user_id = %session.email()))]
    pub async fn update_ad(
        &self,
        session: &Session,
        id: Uuid,
        draft: AdDraft,
    ) -> Result<Ad, DomainError> {
        draft.validate()?;

        let existing = self.get_ad(id).await?;
        ensure_owner(&existing, session)?;

        self.repo
            .update_ad(id, draft)
            .await?
            .ok_or(DomainError::AdNotFound(id))
    }

    /// Removing an id that does not exist is a no-op; returns whether an ad
    /// was removed.
    #[instrument(skip(self, session), fields(user_id = %session.email()))]
    pub async fn remove_ad(&self, session: &Session, id: Uuid) -> Result<bool, DomainError> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            info!(ad_id = %id, "nothing to remove");
            return Ok(false);
        };
        ensure_owner(&existing, session)?;
        self.repo.delete_ad(id).await
    }
}

fn ensure_owner(ad: &Ad, session: &Session) -> Result<(), DomainError> {
    if ad.is_owned_by(session.email()) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "ad {} belongs to another user",
            ad.id
        )))
    }
}

/// Creation times strictly increase, so a newer ad always sorts first even
/// when the clock stalls or steps back.
fn next_created_at(now: DateTime<Utc>, latest: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match latest {
        Some(latest) if latest >= now => latest + Duration::microseconds(1),
        _ => now,
    }
}
