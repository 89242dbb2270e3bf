use actix_session::Session;
use actix_web::{get, post, web};
use log::info;
use serde::Deserialize;

use crate::api::current_user::{check_session, set_current_user};
use crate::api::error_query::ErrorQuery;
use crate::api::types::{html, Redirect, Response};
use crate::app::App;
use crate::constants::{INVALID_LOGIN_ERROR, LOGIN_PAGE};
use crate::models::user::{generate_auth_token, CurrentUser};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[get("/index.php")]
pub async fn login_page(app: web::Data<App>, query: web::Query<ErrorQuery>) -> Response {
    let body = app.templates.render_login(query.error())?;

    Ok(html(body))
}

#[post("/login.php")]
pub async fn login(app: web::Data<App>, client_session: Session, form: Option<web::Form<LoginForm>>) -> Response {
    let base_path = &app.config.base_path;

    let Some(form) = form else {
        return Ok(Redirect::login(INVALID_LOGIN_ERROR).into_response(base_path));
    };

    let user = match app.user_store.find_user(&form.username).await? {
        Some(user) if user.verify_password(&form.password) => user,
        _ => {
            info!("Failed login attempt for {}", form.username);

            return Ok(Redirect::login(INVALID_LOGIN_ERROR).into_response(base_path));
        }
    };

    let auth_token = generate_auth_token();
    app.user_store.set_auth_token(&user.username, Some(&auth_token)).await?;

    set_current_user(&client_session, &CurrentUser::from_user(&user, auth_token))?;

    info!("{} logged in", user.username);

    Ok(Redirect::user_home().into_response(base_path))
}

/// Only a valid session clears the stored token, a stale cookie must not log
/// out a newer session of the same user.
#[get("/logout.php")]
pub async fn logout(app: web::Data<App>, client_session: Session) -> Response {
    if let Ok(current_user) = check_session(&client_session, &app.user_store).await {
        app.user_store.set_auth_token(&current_user.username, None).await?;

        info!("{} logged out", current_user.username);
    }

    client_session.purge();

    Ok(Redirect::to(LOGIN_PAGE).into_response(&app.config.base_path))
}
