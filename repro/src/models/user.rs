pub mod update_fullname;

use crate::constants::AUTH_TOKEN_BYTES;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bcrypt::verify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct User {
    pub username: String,

    /// bcrypt hash, never the plain password
    pub password: String,

    pub fullname: String,

    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn verify_password(&self, password: &str) -> bool {
        verify(password, &self.password).unwrap_or_else(|e| {
            log::warn!("Stored password for {} is not a valid bcrypt hash: {}", self.username, e);

            false
        })
    }
}

/// What the `user` cookie carries between requests.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub username: String,

    #[serde(rename = "authToken")]
    pub auth_token: String,
}

impl CurrentUser {
    pub fn from_user(user: &User, auth_token: String) -> Self {
        Self {
            username: user.username.clone(),
            auth_token,
        }
    }
}

/// Why a request could not be tied to a logged in user. The message is shown
/// on the login page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthFailure(pub &'static str);

impl AuthFailure {
    pub fn message(&self) -> &'static str {
        self.0
    }
}

pub fn generate_auth_token() -> String {
    let bytes = rand::random::<[u8; AUTH_TOKEN_BYTES]>();

    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
impl User {
    /// Low bcrypt cost so tests stay fast.
    pub fn new(username: &str, plain_password: &str, fullname: &str) -> Self {
        let mut user = User {
            username: username.to_string(),
            password: plain_password.to_string(),
            fullname: fullname.to_string(),
            ..Default::default()
        };

        user.set_password(4).expect("Could not hash test password");

        user
    }

    pub fn set_password(&mut self, cost: u32) -> Result<(), bcrypt::BcryptError> {
        self.password = bcrypt::hash(&self.password, cost)?;

        Ok(())
    }
}
