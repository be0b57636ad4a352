//! Local classifieds: user accounts and ad listings kept in a flat
//! key-value store.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;

pub use application::context::AppContext;
pub use domain::ad::{Ad, AdDraft, Currency};
pub use domain::error::DomainError;
pub use domain::query::AdQuery;
pub use domain::session::Session;
pub use domain::user::{SignupForm, UserProfile};
pub use infrastructure::config::{AppConfig, LogFormat};
