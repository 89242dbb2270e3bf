pub mod resource;
pub mod templates;
pub mod user_store;
