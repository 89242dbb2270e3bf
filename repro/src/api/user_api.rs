use actix_session::Session;
use actix_web::{get, route, web};

use crate::api::current_user::{check_session, check_session_user};
use crate::api::error_query::ErrorQuery;
use crate::api::types::{html, Redirect, Response};
use crate::app::App;
use crate::constants::{BLANK_FULLNAME_ERROR, MISSING_FULLNAME_ERROR};
use crate::models::user::update_fullname::{
    change_failed_page, changed_page, update_fullname, FullnameChangeRequest, FullnameOutcome,
};

#[get("/userhome.php")]
pub async fn user_home(app: web::Data<App>, client_session: Session) -> Response {
    match check_session_user(&client_session, &app.user_store).await {
        Ok(user) => Ok(html(app.templates.render_user_home(&user)?)),
        Err(failure) => Ok(Redirect::login(failure.message()).into_response(&app.config.base_path)),
    }
}

#[get("/changefullname.php")]
pub async fn change_fullname_page(
    app: web::Data<App>,
    client_session: Session,
    query: web::Query<ErrorQuery>,
) -> Response {
    match check_session_user(&client_session, &app.user_store).await {
        Ok(user) => Ok(html(app.templates.render_change_fullname(&user, query.error())?)),
        Err(failure) => Ok(Redirect::login(failure.message()).into_response(&app.config.base_path)),
    }
}

/// Accepts GET as well, so a direct visit without a form body lands on the
/// missing fullname redirect instead of a 405. The body is read as raw pairs
/// so a repeated field does not discard the whole form.
#[route("/updatefullname.php", method = "GET", method = "POST")]
pub async fn change_fullname(
    app: web::Data<App>,
    client_session: Session,
    form: Option<web::Form<Vec<(String, String)>>>,
) -> Response {
    let current_user = check_session(&client_session, &app.user_store).await;
    let request = form
        .map(|form| FullnameChangeRequest::from_pairs(form.into_inner()))
        .unwrap_or_default();

    let redirect = match update_fullname(current_user, request, &app.user_store).await {
        FullnameOutcome::LoginRequired(failure) => Redirect::login(failure.message()),
        FullnameOutcome::Cancelled => Redirect::user_home(),
        FullnameOutcome::MissingFullname => Redirect::change_fullname(MISSING_FULLNAME_ERROR),
        FullnameOutcome::BlankFullname => Redirect::change_fullname(BLANK_FULLNAME_ERROR),
        FullnameOutcome::Changed(fullname) => return Ok(html(app.templates.render_page(&changed_page(&fullname))?)),
        FullnameOutcome::ChangeFailed => return Ok(html(app.templates.render_page(&change_failed_page())?)),
    };

    Ok(redirect.into_response(&app.config.base_path))
}
