use actix_web::http::header;
use actix_web::HttpResponse;

use crate::constants::{CHANGE_FULLNAME_PAGE, LOGIN_PAGE, USER_HOME_PAGE};

/// A `302 Found` to one of the portal pages. Query values are kept apart
/// from the path and only percent-encoded when the `Location` is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    page: &'static str,
    query: Vec<(&'static str, String)>,
}

impl Redirect {
    pub fn to(page: &'static str) -> Self {
        Self { page, query: vec![] }
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn login(error: &str) -> Self {
        Self::to(LOGIN_PAGE).with_query("error", error)
    }

    pub fn user_home() -> Self {
        Self::to(USER_HOME_PAGE)
    }

    pub fn change_fullname(error: &str) -> Self {
        Self::to(CHANGE_FULLNAME_PAGE).with_query("error", error)
    }

    pub fn location(&self, base_path: &str) -> String {
        let mut location = format!("{}/{}", base_path, self.page);

        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                .collect::<Vec<String>>()
                .join("&");

            location.push('?');
            location.push_str(&query);
        }

        location
    }

    pub fn into_response(self, base_path: &str) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location(base_path)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn location_without_query() {
        assert_eq!(Redirect::user_home().location(""), "/userhome.php");
        assert_eq!(Redirect::user_home().location("/repro"), "/repro/userhome.php");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let redirect = Redirect::login("Bad & wrong? <x>=1");

        assert_eq!(redirect.location(""), "/index.php?error=Bad%20%26%20wrong%3F%20%3Cx%3E%3D1");
    }

    #[test]
    fn multiple_query_values() {
        let redirect = Redirect::to("index.php").with_query("a", "1").with_query("b", "two words");

        assert_eq!(redirect.location("/r"), "/r/index.php?a=1&b=two%20words");
    }

    #[test]
    fn response_is_found_with_location() {
        let res = Redirect::change_fullname("The new fullname must not be blank.").into_response("");

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/changefullname.php?error=The%20new%20fullname%20must%20not%20be%20blank."
        );
    }
}
