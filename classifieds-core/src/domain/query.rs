use crate::domain::ad::Ad;

/// Filter over the ad collection. Every set criterion must match. Blank
/// text, category and location count as unset; an owner is always kept, so a
/// blank owner matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdQuery {
    pub text: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub owner: Option<String>,
}

impl AdQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = non_blank(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(category.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    pub fn owner(mut self, email: impl Into<String>) -> Self {
        self.owner = Some(email.into());
        self
    }

    pub fn matches(&self, ad: &Ad) -> bool {
        if let Some(text) = &self.text {
            if !fold(&ad.title).contains(&fold(text)) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if fold(&ad.category) != fold(category) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if ad.location != *location {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if !ad.is_owned_by(owner) {
                return false;
            }
        }
        true
    }
}

/// Most recent first; ids break timestamp ties.
pub fn sort_recent_first(ads: &mut [Ad]) {
    ads.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Case folding shared by every case-insensitive comparison.
fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ad::{AdDraft, Currency};
    use chrono::{Duration, Utc};

    fn ad(title: &str, category: &str, location: &str, owner: &str) -> Ad {
        Ad::new(
            owner.into(),
            AdDraft {
                title: title.into(),
                category: category.into(),
                price: "100".into(),
                currency: Currency::Dollars,
                description: "desc".into(),
                location: location.into(),
                thumbnail: Some("thumb".into()),
                images: vec!["img".into()],
            },
            Utc::now(),
        )
    }

    #[test]
    fn empty_query_matches_everything() {
        let a = ad("Bike", "vehicles", "India", "a@x.com");
        assert!(AdQuery::new().matches(&a));
        assert!(AdQuery::new().text("  ").location("").matches(&a));
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let a = ad("iPhone 13 Pro", "electronics", "India", "a@x.com");
        assert!(AdQuery::new().text("PHONE").matches(&a));
        assert!(!AdQuery::new().text("android").matches(&a));
    }

    #[test]
    fn category_match_is_exact_ignoring_case() {
        let a = ad("Villa", "Property", "Spain", "a@x.com");
        assert!(AdQuery::new().category("property").matches(&a));
        assert!(!AdQuery::new().category("prop").matches(&a));
    }

    #[test]
    fn location_match_is_exact() {
        let a = ad("Villa", "property", "Sri Lanka", "a@x.com");
        assert!(AdQuery::new().location("Sri Lanka").matches(&a));
        assert!(!AdQuery::new().location("sri lanka").matches(&a));
    }

    #[test]
    fn criteria_compose_with_and() {
        let a = ad("Samsung phone", "electronics", "India", "a@x.com");
        assert!(AdQuery::new().text("phone").category("electronics").matches(&a));
        assert!(!AdQuery::new().text("phone").category("vehicles").matches(&a));
    }

    #[test]
    fn category_folds_non_ascii_case() {
        let a = ad("Kaffeemaschine", "GERÄTE", "Germany", "a@x.com");
        assert!(AdQuery::new().category("geräte").matches(&a));
        assert!(AdQuery::new().text("MASCHINE").matches(&a));
    }

    #[test]
    fn blank_owner_matches_nothing() {
        let a = ad("Bike", "vehicles", "India", "a@x.com");
        assert!(!AdQuery::new().owner("").matches(&a));
        assert!(!AdQuery::new().owner("   ").matches(&a));
        assert!(AdQuery::new().owner(" A@X.com ").matches(&a));
    }

    #[test]
    fn sorts_newest_first() {
        let mut older = ad("old", "jobs", "Peru", "a@x.com");
        older.created_at = Utc::now() - Duration::hours(1);
        let newer = ad("new", "jobs", "Peru", "a@x.com");

        let mut ads = vec![older, newer];
        sort_recent_first(&mut ads);
        assert_eq!(ads[0].title, "new");
    }
}
