use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

use crate::errors::ReproError;

pub type Response = Result<HttpResponse, ReproError>;

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}
