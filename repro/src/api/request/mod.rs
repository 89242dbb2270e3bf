pub mod current_user;
pub mod error_query;
