pub const LOGIN_PAGE: &str = "index.php";
pub const USER_HOME_PAGE: &str = "userhome.php";
pub const CHANGE_FULLNAME_PAGE: &str = "changefullname.php";

pub const SESSION_COOKIE_NAME: &str = "user";
pub const CURRENT_USER_KEY: &str = "current_user";

pub const CANCEL_ACTION: &str = "Cancel";

pub const MISSING_FULLNAME_ERROR: &str = "No new fullname was provided.  Please enter one and click Save.  \
                                          If this error reoccurs, contact an administrator.";
pub const BLANK_FULLNAME_ERROR: &str = "The new fullname must not be blank.";
pub const INVALID_LOGIN_ERROR: &str = "Invalid username or password.";

pub const NOT_LOGGED_IN_ERROR: &str = "You must log in to access this page.";
pub const UNKNOWN_USER_ERROR: &str = "Your account could not be found.  Please log in again.";
pub const EXPIRED_SESSION_ERROR: &str = "Your session has expired.  Please log in again.";
pub const SESSION_STORE_ERROR: &str = "Unable to verify your session.  Please try again later.";

pub const AUTH_TOKEN_BYTES: usize = 32;
