pub mod account_service;
pub mod ad_service;
pub mod context;
