use actix_web::cookie::Key;
use deadpool_redis::Pool;

use crate::app::{Config, RedisCfg, StoreBackend};
use crate::errors::ReproError;
use crate::resources::user_store::{MemoryUserStore, RedisUserStore, UserStore};

/// Resource's should be alive during application runtime.
/// It's usually related to external services like the redis pool.
#[allow(async_fn_in_trait)]
pub trait Resource<'a>: Sized {
    type Cfg;

    async fn init_resource(config: Self::Cfg) -> Result<Self, ReproError>;
}

impl<'a> Resource<'a> for Pool {
    type Cfg = &'a RedisCfg;

    async fn init_resource(config: Self::Cfg) -> Result<Self, ReproError> {
        let cfg = deadpool_redis::Config::from_url(config.url.as_str());

        cfg.create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| ReproError::ConfigError(format!("Failed to create redis pool: {}", e)))
    }
}

impl<'a> Resource<'a> for UserStore {
    type Cfg = &'a Config;

    async fn init_resource(config: Self::Cfg) -> Result<Self, ReproError> {
        match (config.store.backend, &config.redis) {
            (StoreBackend::Redis, Some(redis)) => {
                let pool = Pool::init_resource(redis).await?;

                Ok(UserStore::Redis(RedisUserStore::new(pool)))
            }
            (StoreBackend::Redis, None) => Err(ReproError::ConfigError("Missing redis config".to_string())),
            (StoreBackend::Memory, _) => {
                log::warn!("Using in-memory user store, changes are lost on restart");

                Ok(UserStore::Memory(MemoryUserStore::new(config.users.clone())))
            }
        }
    }
}

/// Expects a secret that already passed config validation (at least 64 bytes).
impl<'a> Resource<'a> for Key {
    type Cfg = &'a str;

    async fn init_resource(secret_key: Self::Cfg) -> Result<Self, ReproError> {
        Ok(Key::from(secret_key.as_bytes()))
    }
}
