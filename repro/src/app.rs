use std::{env, fs};

use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie;
use actix_web::cookie::Key;
use serde::Deserialize;

use crate::constants::SESSION_COOKIE_NAME;
use crate::errors::ReproError;
use crate::models::user::User;
use crate::resources::resource::Resource;
use crate::resources::templates::Templates;
use crate::resources::user_store::UserStore;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreCfg {
    pub backend: StoreBackend,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RedisCfg {
    pub url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,

    /// Path prefix the pages are mounted under, e.g. `/repro`. Empty for the root.
    #[serde(default)]
    pub base_path: String,

    pub secret_key: String,

    #[serde(default = "default_session_expiration_in_days")]
    pub session_expiration_in_days: i64,

    #[serde(default)]
    pub cookie_secure: bool,

    pub store: StoreCfg,
    pub redis: Option<RedisCfg>,

    /// Seed users for the memory backend. Passwords are bcrypt hashes.
    #[serde(default)]
    pub users: Vec<User>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_session_expiration_in_days() -> i64 {
    1
}

impl Config {
    /// Reads `config.{ENV}.toml` from the working directory.
    pub fn load() -> Result<Self, ReproError> {
        dotenv::dotenv().ok();

        let env = env::var("ENV").map_err(|_| ReproError::ConfigError("ENV must be set".to_string()))?;
        let config_file = format!("config.{}.toml", env);
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| ReproError::ConfigError(format!("Unable to read {}: {}", config_file, e)))?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ReproError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ReproError::ConfigError(format!("Unable to parse TOML: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ReproError> {
        if self.secret_key.len() < 64 {
            return Err(ReproError::ConfigError(
                "secret_key must be at least 64 bytes long".to_string(),
            ));
        }

        if !self.base_path.is_empty() && (!self.base_path.starts_with('/') || self.base_path.ends_with('/')) {
            return Err(ReproError::ConfigError(format!(
                "base_path must start with '/' and must not end with '/', got '{}'",
                self.base_path
            )));
        }

        if self.store.backend == StoreBackend::Redis && self.redis.is_none() {
            return Err(ReproError::ConfigError(
                "[redis] section is required for the redis store".to_string(),
            ));
        }

        if self.session_expiration_in_days < 1 {
            return Err(ReproError::ConfigError(
                "session_expiration_in_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Long lived resources shared by all workers.
pub struct App {
    pub config: Config,
    pub user_store: UserStore,
    pub templates: Templates,
    secret_key: Key,
}

impl App {
    pub async fn new() -> Result<Self, ReproError> {
        let config = Config::load()?;

        Self::from_config(config).await
    }

    pub async fn from_config(config: Config) -> Result<Self, ReproError> {
        let user_store = UserStore::init_resource(&config).await?;
        let secret_key = Key::init_resource(config.secret_key.as_str()).await?;
        let templates = Templates::new()?;

        Ok(Self {
            config,
            user_store,
            templates,
            secret_key,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.config.host.clone(), self.config.port)
    }

    pub fn session_middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        let ttl = PersistentSession::default()
            .session_ttl(cookie::time::Duration::days(self.config.session_expiration_in_days));
        let cookie_path = if self.config.base_path.is_empty() {
            "/".to_string()
        } else {
            self.config.base_path.clone()
        };

        SessionMiddleware::builder(CookieSessionStore::default(), self.secret_key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_string())
            .cookie_path(cookie_path)
            .cookie_secure(self.config.cookie_secure)
            .session_lifecycle(ttl)
            .build()
    }
}

#[cfg(test)]
impl App {
    pub fn for_tests(base_path: &str, users: Vec<User>) -> Self {
        use crate::resources::user_store::MemoryUserStore;

        let config = Config {
            host: default_host(),
            port: 0,
            base_path: base_path.to_string(),
            secret_key: String::new(),
            session_expiration_in_days: 1,
            cookie_secure: false,
            store: StoreCfg {
                backend: StoreBackend::Memory,
            },
            redis: None,
            users: vec![],
        };

        Self {
            config,
            user_store: UserStore::Memory(MemoryUserStore::new(users)),
            templates: Templates::new().expect("Templates should be valid"),
            secret_key: Key::generate(),
        }
    }
}
