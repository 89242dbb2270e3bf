use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum RedisError {
    PoolError(deadpool_redis::PoolError),
    RedisError(deadpool_redis::redis::RedisError),
}

impl fmt::Display for RedisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedisError::PoolError(e) => write!(f, "Pool Error: {}", e),
            RedisError::RedisError(e) => write!(f, "Redis Error: {}", e),
        }
    }
}

impl Error for RedisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RedisError::PoolError(e) => Some(e),
            RedisError::RedisError(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub enum ReproError {
    ConfigError(String),
    ClientSessionError(String),
    TemplateError(String),
    RedisError(RedisError),
}

impl fmt::Display for ReproError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReproError::ConfigError(e) => write!(f, "Config Error: {}", e),
            ReproError::ClientSessionError(e) => write!(f, "Session Error: {}", e),
            ReproError::TemplateError(e) => write!(f, "Template Error: {}", e),
            ReproError::RedisError(e) => write!(f, "Redis Error: \n{}", e),
        }
    }
}

impl Error for ReproError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReproError::ConfigError(_) => None,
            ReproError::ClientSessionError(_) => None,
            ReproError::TemplateError(_) => None,
            ReproError::RedisError(e) => Some(e),
        }
    }
}

/// Pages never show internal details, the cause only goes to the log.
impl ResponseError for ReproError {
    fn error_response(&self) -> HttpResponse {
        log::error!("Internal Server Error: {}", self);

        HttpResponse::InternalServerError()
            .content_type(ContentType::plaintext())
            .body("An internal error occurred.  Please contact an administrator.")
    }
}

impl From<deadpool_redis::PoolError> for ReproError {
    fn from(e: deadpool_redis::PoolError) -> Self {
        ReproError::RedisError(RedisError::PoolError(e))
    }
}

impl From<deadpool_redis::redis::RedisError> for ReproError {
    fn from(e: deadpool_redis::redis::RedisError) -> Self {
        ReproError::RedisError(RedisError::RedisError(e))
    }
}

impl From<handlebars::RenderError> for ReproError {
    fn from(e: handlebars::RenderError) -> Self {
        ReproError::TemplateError(e.to_string())
    }
}

impl From<handlebars::TemplateError> for ReproError {
    fn from(e: handlebars::TemplateError) -> Self {
        ReproError::TemplateError(e.to_string())
    }
}
