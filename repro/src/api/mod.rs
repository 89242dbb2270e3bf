pub mod types;

mod asset_api;
mod request;
mod session_api;
mod user_api;

#[cfg(test)]
mod tests;

pub use asset_api::*;
pub use request::*;
pub use session_api::*;
pub use user_api::*;

use actix_web::{web, Scope};

/// Every page of the portal, mounted under `base_path`.
pub fn scope(base_path: &str) -> Scope {
    web::scope(base_path)
        .service(stylesheet)
        .service(login_page)
        .service(login)
        .service(logout)
        .service(user_home)
        .service(change_fullname_page)
        .service(change_fullname)
}
