use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use crate::app::App as ReproApp;
use crate::constants::{
    BLANK_FULLNAME_ERROR, EXPIRED_SESSION_ERROR, INVALID_LOGIN_ERROR, MISSING_FULLNAME_ERROR, NOT_LOGGED_IN_ERROR,
    SESSION_COOKIE_NAME,
};
use crate::models::user::User;

fn repro(base_path: &str) -> web::Data<ReproApp> {
    web::Data::new(ReproApp::for_tests(
        base_path,
        vec![User::new("alice", "secret", "Alice"), User::new("bob", "hunter2", "Bob")],
    ))
}

macro_rules! init_app {
    ($repro:expr) => {
        test::init_service(
            App::new()
                .wrap($repro.session_middleware())
                .app_data($repro.clone())
                .service(super::scope(&$repro.config.base_path)),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $uri:expr, $username:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_form(vec![("username", $username), ("password", $password)])
            .to_request();
        let res = test::call_service(&$app, req).await;
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(|cookie| cookie.into_owned());

        (res, cookie)
    }};
}

fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn with_error(page: &str, error: &str) -> String {
    format!("/{}?error={}", page, urlencoding::encode(error))
}

async fn fullname_of(repro: &web::Data<ReproApp>, username: &str) -> String {
    repro.user_store.find_user(username).await.unwrap().unwrap().fullname
}

#[actix_web::test]
async fn update_without_session_redirects_to_login() {
    let repro = repro("");
    let app = init_app!(repro);

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .set_form(vec![("submit", "Save"), ("newfullname", "Alice Smith")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), with_error("index.php", NOT_LOGGED_IN_ERROR));
    assert_eq!(fullname_of(&repro, "alice").await, "Alice");
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let repro = repro("");
    let app = init_app!(repro);

    let (res, cookie) = login!(app, "/login.php", "alice", "wrong");

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), with_error("index.php", INVALID_LOGIN_ERROR));
    assert!(cookie.is_none());
}

#[actix_web::test]
async fn login_with_unknown_user() {
    let repro = repro("");
    let app = init_app!(repro);

    let (res, _) = login!(app, "/login.php", "mallory", "secret");

    assert_eq!(location(&res), with_error("index.php", INVALID_LOGIN_ERROR));
}

#[actix_web::test]
async fn login_then_user_home() {
    let repro = repro("");
    let app = init_app!(repro);

    let (res, cookie) = login!(app, "/login.php", "alice", "secret");
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/userhome.php");

    let req = test::TestRequest::get()
        .uri("/userhome.php")
        .cookie(cookie.expect("login should set the session cookie"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert!(body.contains("<td>alice</td>"));
    assert!(body.contains("<td>Alice</td>"));
}

#[actix_web::test]
async fn user_home_without_session() {
    let repro = repro("");
    let app = init_app!(repro);

    let req = test::TestRequest::get().uri("/userhome.php").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(location(&res), with_error("index.php", NOT_LOGGED_IN_ERROR));
}

#[actix_web::test]
async fn cancel_redirects_home() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie.unwrap())
        .set_form(vec![("submit", "Cancel"), ("newfullname", "Alice Smith")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/userhome.php");
    assert_eq!(fullname_of(&repro, "alice").await, "Alice");
}

#[actix_web::test]
async fn missing_fullname_redirects_to_form() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");
    let cookie = cookie.unwrap();

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie.clone())
        .set_form(vec![("submit", "Save")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), with_error("changefullname.php", MISSING_FULLNAME_ERROR));

    // a plain visit without any form body
    let req = test::TestRequest::get()
        .uri("/updatefullname.php")
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(location(&res), with_error("changefullname.php", MISSING_FULLNAME_ERROR));
}

#[actix_web::test]
async fn blank_fullname_redirects_to_form() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie.unwrap())
        .set_form(vec![("submit", "Save"), ("newfullname", "")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), with_error("changefullname.php", BLANK_FULLNAME_ERROR));
    assert_eq!(fullname_of(&repro, "alice").await, "Alice");
}

#[actix_web::test]
async fn fullname_changed() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie.unwrap())
        .set_form(vec![("submit", "Save"), ("newfullname", "Alice Smith")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = test::read_body(res).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert!(body.contains("<title>Fullname changed</title>"));
    assert!(body.contains("Fullname changed to <em>Alice Smith</em>."));
    assert_eq!(fullname_of(&repro, "alice").await, "Alice Smith");
    assert_eq!(fullname_of(&repro, "bob").await, "Bob");
}

#[actix_web::test]
async fn logout_invalidates_old_cookie() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");
    let cookie = cookie.unwrap();

    let req = test::TestRequest::get()
        .uri("/logout.php")
        .cookie(cookie.clone())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(location(&res), "/index.php");

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie)
        .set_form(vec![("submit", "Save"), ("newfullname", "Alice Smith")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(location(&res), with_error("index.php", EXPIRED_SESSION_ERROR));
    assert_eq!(fullname_of(&repro, "alice").await, "Alice");
}

#[actix_web::test]
async fn new_login_replaces_previous_session() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, first) = login!(app, "/login.php", "alice", "secret");
    let (_, second) = login!(app, "/login.php", "alice", "secret");

    let req = test::TestRequest::get()
        .uri("/userhome.php")
        .cookie(first.unwrap())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(location(&res), with_error("index.php", EXPIRED_SESSION_ERROR));

    let req = test::TestRequest::get()
        .uri("/userhome.php")
        .cookie(second.unwrap())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn pages_under_base_path() {
    let repro = repro("/repro");
    let app = init_app!(repro);

    let (res, cookie) = login!(app, "/repro/login.php", "bob", "hunter2");
    assert_eq!(location(&res), "/repro/userhome.php");

    let req = test::TestRequest::post()
        .uri("/repro/updatefullname.php")
        .cookie(cookie.unwrap())
        .set_form(vec![("submit", "Cancel")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(location(&res), "/repro/userhome.php");

    let req = test::TestRequest::post()
        .uri("/repro/updatefullname.php")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(location(&res), format!("/repro{}", with_error("index.php", NOT_LOGGED_IN_ERROR)));
}

#[actix_web::test]
async fn change_form_shows_escaped_error() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");

    let req = test::TestRequest::get()
        .uri("/changefullname.php?error=%3Cb%3Eoops%3C%2Fb%3E")
        .cookie(cookie.unwrap())
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert!(body.contains("&lt;b&gt;oops&lt;/b&gt;"));
    assert!(body.contains(r#"name="newfullname""#));
}

#[actix_web::test]
async fn login_page_and_stylesheet() {
    let repro = repro("");
    let app = init_app!(repro);

    let req = test::TestRequest::get()
        .uri("/index.php?error=Please%20log%20in.")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("Please log in."));
    assert!(body.contains(r#"action="login.php""#));

    let req = test::TestRequest::get().uri("/repro_style.css").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );
}

#[actix_web::test]
async fn repeated_submit_keeps_last_value() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");
    let cookie = cookie.unwrap();

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie.clone())
        .set_form(vec![("newfullname", "Alice Smith"), ("submit", "Save"), ("submit", "Cancel")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/userhome.php");
    assert_eq!(fullname_of(&repro, "alice").await, "Alice");

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie)
        .set_form(vec![("newfullname", "Alice Smith"), ("submit", "Cancel"), ("submit", "Save")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(fullname_of(&repro, "alice").await, "Alice Smith");
}

#[actix_web::test]
async fn changed_page_echoes_stored_fullname() {
    let repro = repro("");
    let app = init_app!(repro);
    let (_, cookie) = login!(app, "/login.php", "alice", "secret");

    let req = test::TestRequest::post()
        .uri("/updatefullname.php")
        .cookie(cookie.unwrap())
        .set_form(vec![("submit", "Save"), ("newfullname", "Smith <Jr>")])
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert!(body.contains("Fullname changed to <em>Smith <Jr></em>."));
    assert_eq!(fullname_of(&repro, "alice").await, "Smith <Jr>");
}
