use handlebars::Handlebars;
use serde_json::json;

use crate::errors::ReproError;
use crate::models::user::User;

const RESULT_PAGE: &str = "result";
const LOGIN_PAGE: &str = "login";
const USER_HOME_PAGE: &str = "userhome";
const CHANGE_FULLNAME_PAGE: &str = "changefullname";

pub const STYLESHEET: &str = include_str!("./templates/repro_style.css");

/// Slots of the shared result page. `msg` is inserted unescaped, so callers
/// must sanitize anything user supplied before putting it there.
pub struct Page {
    pub title: &'static str,
    pub heading: &'static str,
    pub msg: String,
}

pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, ReproError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        registry.register_template_string(RESULT_PAGE, include_str!("./templates/result.html"))?;
        registry.register_template_string(LOGIN_PAGE, include_str!("./templates/login.html"))?;
        registry.register_template_string(USER_HOME_PAGE, include_str!("./templates/userhome.html"))?;
        registry.register_template_string(CHANGE_FULLNAME_PAGE, include_str!("./templates/changefullname.html"))?;

        Ok(Self { registry })
    }

    pub fn render_page(&self, page: &Page) -> Result<String, ReproError> {
        let ctx = json!({
            "title": page.title,
            "heading": page.heading,
            "msg": page.msg,
        });

        Ok(self.registry.render(RESULT_PAGE, &ctx)?)
    }

    pub fn render_login(&self, error: Option<&str>) -> Result<String, ReproError> {
        Ok(self.registry.render(LOGIN_PAGE, &json!({ "error": error }))?)
    }

    pub fn render_user_home(&self, user: &User) -> Result<String, ReproError> {
        let ctx = json!({
            "username": user.username,
            "fullname": user.fullname,
        });

        Ok(self.registry.render(USER_HOME_PAGE, &ctx)?)
    }

    pub fn render_change_fullname(&self, user: &User, error: Option<&str>) -> Result<String, ReproError> {
        let ctx = json!({
            "fullname": user.fullname,
            "error": error,
        });

        Ok(self.registry.render(CHANGE_FULLNAME_PAGE, &ctx)?)
    }
}
