pub mod ad;
pub mod error;
pub mod query;
pub mod session;
pub mod user;
pub mod validation;
