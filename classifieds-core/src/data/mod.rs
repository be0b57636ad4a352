pub mod ad_repository;
pub mod kv_store;
pub mod session_repository;
pub mod user_repository;
