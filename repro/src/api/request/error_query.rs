use serde::Deserialize;

/// `?error=...` carried by redirects back to a form page.
#[derive(Deserialize)]
pub struct ErrorQuery {
    pub error: Option<String>,
}

impl ErrorQuery {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|error| !error.is_empty())
    }
}
