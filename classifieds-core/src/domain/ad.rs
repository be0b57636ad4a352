use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::normalize_email;
use crate::domain::validation::ValidationErrors;

pub const MAX_IMAGES: usize = 4;

pub const CATEGORIES: &[&str] = &["vehicles", "property", "electronics", "jobs", "services"];

pub const LOCATIONS: &[&str] = &[
    "Sri Lanka",
    "India",
    "United States",
    "United Kingdom",
    "Australia",
    "Canada",
    "Germany",
    "France",
    "Japan",
    "China",
    "Brazil",
    "Russia",
    "South Africa",
    "Mexico",
    "Italy",
    "Spain",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Switzerland",
    "Austria",
    "Belgium",
    "Poland",
    "Ukraine",
    "Turkey",
    "Egypt",
    "Nigeria",
    "Kenya",
    "South Korea",
    "Thailand",
    "Vietnam",
    "Indonesia",
    "Malaysia",
    "Singapore",
    "Philippines",
    "New Zealand",
    "Argentina",
    "Chile",
    "Colombia",
    "Peru",
    "Saudi Arabia",
    "United Arab Emirates",
    "Qatar",
    "Pakistan",
    "Bangladesh",
    "Afghanistan",
    "Iraq",
    "Iran",
    "Israel",
    "Portugal",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "Rs.")]
    Rupees,
    #[serde(rename = "$")]
    Dollars,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Rupees => "Rs.",
            Currency::Dollars => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rs." | "rs" | "lkr" => Ok(Currency::Rupees),
            "$" | "usd" => Ok(Currency::Dollars),
            other => Err(format!("unknown currency: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub price: String,
    #[serde(default)]
    pub currency: Currency,
    pub description: String,
    pub location: String,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Ad {
    /// Builds a new listing from an already validated draft.
    pub fn new(user_id: String, draft: AdDraft, created_at: DateTime<Utc>) -> Self {
        let mut ad = Self {
            id: Uuid::new_v4(),
            title: String::new(),
            category: String::new(),
            price: String::new(),
            currency: Currency::default(),
            description: String::new(),
            location: String::new(),
            thumbnail: None,
            images: Vec::new(),
            user_id,
            created_at,
        };
        ad.apply(draft);
        ad
    }

    /// Overwrites the owner-editable fields. Id, owner and creation time stay.
    pub fn apply(&mut self, draft: AdDraft) {
        let AdDraft {
            title,
            category,
            price,
            currency,
            description,
            location,
            thumbnail,
            images,
        } = draft;
        self.title = title.trim().to_string();
        self.category = category.trim().to_string();
        self.price = price.trim().to_string();
        self.currency = currency;
        self.description = description;
        self.location = location.trim().to_string();
        self.thumbnail = thumbnail;
        self.images = images;
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        normalize_email(&self.user_id) == normalize_email(email)
    }
}

impl fmt::Display for Ad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} {} | {} | {} | posted {} by {}",
            self.id,
            self.title,
            self.currency,
            self.price,
            self.category,
            self.location,
            self.created_at.to_rfc3339(),
            self.user_id
        )
    }
}

/// Owner-editable fields of an ad, used both to create and to update one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdDraft {
    pub title: String,
    pub category: String,
    pub price: String,
    pub currency: Currency,
    pub description: String,
    pub location: String,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
}

impl AdDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();

        errors.require("title", &self.title);
        errors.require("category", &self.category);
        if errors.require("price", &self.price) && !is_valid_price(&self.price) {
            errors.push("price", "price must be a non-negative number");
        }
        errors.require("description", &self.description);
        errors.require("location", &self.location);
        errors.require("thumbnail", self.thumbnail.as_deref().unwrap_or_default());

        if self.images.iter().any(|img| img.trim().is_empty()) {
            errors.push("images", "image references must not be empty");
        } else if self.images.is_empty() {
            errors.push("images", "at least one image is required");
        } else if self.images.len() > MAX_IMAGES {
            errors.push(
                "images",
                format!("at most {} images are allowed", MAX_IMAGES),
            );
        }

        errors.into_result()
    }
}

impl From<&Ad> for AdDraft {
    fn from(ad: &Ad) -> Self {
        Self {
            title: ad.title.clone(),
            category: ad.category.clone(),
            price: ad.price.clone(),
            currency: ad.currency,
            description: ad.description.clone(),
            location: ad.location.clone(),
            thumbnail: ad.thumbnail.clone(),
            images: ad.images.clone(),
        }
    }
}

fn is_valid_price(price: &str) -> bool {
    price
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .is_ok_and(|value| value.is_finite() && value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AdDraft {
        AdDraft {
            title: "Toyota Aqua 2015".into(),
            category: "vehicles".into(),
            price: "5,250,000".into(),
            currency: Currency::Rupees,
            description: "Single owner, full service history".into(),
            location: "Sri Lanka".into(),
            thumbnail: Some("file:///ads/aqua.jpg".into()),
            images: vec!["file:///ads/aqua-1.jpg".into()],
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn missing_fields_are_all_named() {
        let err = AdDraft::default().validate().unwrap_err();
        assert_eq!(
            err.invalid_fields(),
            vec![
                "title",
                "category",
                "price",
                "description",
                "location",
                "thumbnail",
                "images"
            ]
        );
    }

    #[test]
    fn rejects_more_than_four_images() {
        let mut d = draft();
        d.images = (0..5).map(|i| format!("file:///ads/{}.jpg", i)).collect();
        assert_eq!(d.validate().unwrap_err().invalid_fields(), vec!["images"]);
    }

    #[test]
    fn rejects_non_numeric_price() {
        let mut d = draft();
        d.price = "negotiable".into();
        assert_eq!(d.validate().unwrap_err().invalid_fields(), vec!["price"]);
    }

    #[test]
    fn currency_uses_display_symbols_on_the_wire() {
        assert_eq!(serde_json::to_string(&Currency::Rupees).unwrap(), "\"Rs.\"");
        assert_eq!(serde_json::to_string(&Currency::Dollars).unwrap(), "\"$\"");
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Dollars);
        assert!("eur".parse::<Currency>().is_err());
    }

    #[test]
    fn ownership_folds_case_beyond_ascii() {
        let ad = Ad::new("ömer@example.com".into(), draft(), Utc::now());
        assert!(ad.is_owned_by("ÖMER@Example.com"));
        assert!(ad.is_owned_by(" ömer@example.com "));
        assert!(!ad.is_owned_by("omer@example.com"));
        assert!(!ad.is_owned_by(""));
    }

    #[test]
    fn apply_keeps_identity() {
        let mut ad = Ad::new("seller@example.com".into(), draft(), Utc::now());
        let (id, created_at) = (ad.id, ad.created_at);

        let mut patch = draft();
        patch.title = "Toyota Aqua 2016".into();
        ad.apply(patch);

        assert_eq!(ad.id, id);
        assert_eq!(ad.created_at, created_at);
        assert_eq!(ad.user_id, "seller@example.com");
        assert_eq!(ad.title, "Toyota Aqua 2016");
    }
}
