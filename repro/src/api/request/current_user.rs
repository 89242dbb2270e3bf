use actix_session::Session;
use log::{error, warn};

use crate::constants::{
    CURRENT_USER_KEY, EXPIRED_SESSION_ERROR, NOT_LOGGED_IN_ERROR, SESSION_STORE_ERROR, UNKNOWN_USER_ERROR,
};
use crate::errors::ReproError;
use crate::models::user::{AuthFailure, CurrentUser, User};
use crate::resources::user_store::UserStore;

pub fn set_current_user(client_session: &Session, current_user: &CurrentUser) -> Result<(), ReproError> {
    client_session.renew();
    client_session.insert(CURRENT_USER_KEY, current_user).map_err(|e| {
        error!("Could not set current user. {}", e);

        ReproError::ClientSessionError("Could not set current user.".to_string())
    })?;

    Ok(())
}

pub fn get_current_user(client_session: &Session) -> Option<CurrentUser> {
    client_session
        .get::<CurrentUser>(CURRENT_USER_KEY)
        .map_err(|e| warn!("Could not get current user. {}", e))
        .ok()
        .flatten()
}

/// Ties the request to a logged in user. The cookie alone is not enough:
/// its token has to match the one stored for the user, so logging out or
/// logging in elsewhere invalidates older cookies.
pub async fn check_session(client_session: &Session, store: &UserStore) -> Result<CurrentUser, AuthFailure> {
    authenticate(client_session, store).await.map(|(current_user, _)| current_user)
}

/// Like [`check_session`], but hands back the stored user record.
pub async fn check_session_user(client_session: &Session, store: &UserStore) -> Result<User, AuthFailure> {
    authenticate(client_session, store).await.map(|(_, user)| user)
}

async fn authenticate(client_session: &Session, store: &UserStore) -> Result<(CurrentUser, User), AuthFailure> {
    let current_user = get_current_user(client_session).ok_or(AuthFailure(NOT_LOGGED_IN_ERROR))?;

    match store.find_user(&current_user.username).await {
        Ok(Some(user)) if token_matches(&user, &current_user) => Ok((current_user, user)),
        Ok(Some(_)) => Err(AuthFailure(EXPIRED_SESSION_ERROR)),
        Ok(None) => Err(AuthFailure(UNKNOWN_USER_ERROR)),
        Err(e) => {
            error!("Could not verify session of {}: {}", current_user.username, e);

            Err(AuthFailure(SESSION_STORE_ERROR))
        }
    }
}

fn token_matches(user: &User, current_user: &CurrentUser) -> bool {
    user.auth_token.as_deref() == Some(current_user.auth_token.as_str())
}
