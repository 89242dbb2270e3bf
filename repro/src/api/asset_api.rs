use actix_web::{get, HttpResponse};

use crate::resources::templates::STYLESHEET;

#[get("/repro_style.css")]
pub async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok().content_type("text/css; charset=utf-8").body(STYLESHEET)
}
