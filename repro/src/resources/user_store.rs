use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::Pool;

use crate::errors::ReproError;
use crate::models::user::User;

const USER_KEY_PREFIX: &str = "repro:user";

const PASSWORD_FIELD: &str = "password";
const FULLNAME_FIELD: &str = "fullname";
const AUTH_TOKEN_FIELD: &str = "auth_token";
const UPDATED_AT_FIELD: &str = "updated_at";

/// Persistence for user records. Every method reports a missing user
/// through its return value, errors are reserved for the backend itself.
pub enum UserStore {
    Redis(RedisUserStore),
    Memory(MemoryUserStore),
}

impl UserStore {
    pub async fn find_user(&self, username: &str) -> Result<Option<User>, ReproError> {
        match self {
            UserStore::Redis(store) => store.find_user(username).await,
            UserStore::Memory(store) => Ok(store.find_user(username)),
        }
    }

    /// Returns `false` when no user with `username` exists.
    pub async fn update_fullname(&self, username: &str, fullname: &str) -> Result<bool, ReproError> {
        match self {
            UserStore::Redis(store) => store.update_fullname(username, fullname).await,
            UserStore::Memory(store) => Ok(store.update_fullname(username, fullname)),
        }
    }

    /// `None` clears the token, which invalidates every session of the user.
    pub async fn set_auth_token(&self, username: &str, auth_token: Option<&str>) -> Result<bool, ReproError> {
        match self {
            UserStore::Redis(store) => store.set_auth_token(username, auth_token).await,
            UserStore::Memory(store) => Ok(store.set_auth_token(username, auth_token)),
        }
    }
}

pub struct RedisUserStore {
    pool: Pool,
}

impl RedisUserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn user_key(username: &str) -> String {
        format!("{}:{}", USER_KEY_PREFIX, username)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, ReproError> {
        let mut conn = self.pool.get().await?;
        let fields: HashMap<String, String> = conn.hgetall(Self::user_key(username)).await?;

        if fields.is_empty() {
            return Ok(None);
        }

        Ok(Some(user_from_fields(username, fields)))
    }

    async fn update_fullname(&self, username: &str, fullname: &str) -> Result<bool, ReproError> {
        let key = Self::user_key(username);
        let mut conn = self.pool.get().await?;

        if !conn.exists::<_, bool>(&key).await? {
            return Ok(false);
        }

        let fields = [
            (FULLNAME_FIELD, fullname.to_string()),
            (UPDATED_AT_FIELD, Utc::now().to_rfc3339()),
        ];
        conn.hset_multiple::<_, _, _, ()>(&key, &fields).await?;

        Ok(true)
    }

    async fn set_auth_token(&self, username: &str, auth_token: Option<&str>) -> Result<bool, ReproError> {
        let key = Self::user_key(username);
        let mut conn = self.pool.get().await?;

        if !conn.exists::<_, bool>(&key).await? {
            return Ok(false);
        }

        match auth_token {
            Some(token) => conn.hset::<_, _, _, ()>(&key, AUTH_TOKEN_FIELD, token).await?,
            None => conn.hdel::<_, _, ()>(&key, AUTH_TOKEN_FIELD).await?,
        }

        Ok(true)
    }
}

fn user_from_fields(username: &str, mut fields: HashMap<String, String>) -> User {
    let updated_at = fields
        .remove(UPDATED_AT_FIELD)
        .and_then(|value| DateTime::parse_from_rfc3339(&value).ok())
        .map(|value| value.with_timezone(&Utc));

    User {
        username: username.to_string(),
        password: fields.remove(PASSWORD_FIELD).unwrap_or_default(),
        fullname: fields.remove(FULLNAME_FIELD).unwrap_or_default(),
        auth_token: fields.remove(AUTH_TOKEN_FIELD),
        updated_at,
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        let store = Self::default();

        for user in users {
            store.users.insert(user.username.clone(), user);
        }

        store
    }

    fn find_user(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|user| user.clone())
    }

    fn update_fullname(&self, username: &str, fullname: &str) -> bool {
        match self.users.get_mut(username) {
            Some(mut user) => {
                user.fullname = fullname.to_string();
                user.updated_at = Some(Utc::now());

                true
            }
            None => false,
        }
    }

    fn set_auth_token(&self, username: &str, auth_token: Option<&str>) -> bool {
        match self.users.get_mut(username) {
            Some(mut user) => {
                user.auth_token = auth_token.map(str::to_string);

                true
            }
            None => false,
        }
    }
}
