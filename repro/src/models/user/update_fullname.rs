use log::{debug, error};

use crate::constants::CANCEL_ACTION;
use crate::models::user::{AuthFailure, CurrentUser};
use crate::resources::templates::Page;
use crate::resources::user_store::UserStore;

/// Form body posted by the change-fullname page. Both fields are optional:
/// a request without a parsable body ends up with neither.
#[derive(Default, Debug, Clone)]
pub struct FullnameChangeRequest {
    pub submit: Option<String>,
    pub newfullname: Option<String>,
}

impl FullnameChangeRequest {
    /// Builds the request from raw form pairs. A repeated key keeps its last
    /// value and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().fold(Self::default(), |mut request, (key, value)| {
            match key.as_str() {
                "submit" => request.submit = Some(value),
                "newfullname" => request.newfullname = Some(value),
                _ => {}
            }

            request
        })
    }

    pub fn is_cancel(&self) -> bool {
        self.submit.as_deref() == Some(CANCEL_ACTION)
    }
}

#[derive(Debug, PartialEq)]
pub enum FullnameOutcome {
    LoginRequired(AuthFailure),
    Cancelled,
    MissingFullname,
    BlankFullname,
    Changed(String),
    ChangeFailed,
}

/// The new fullname goes into the message as given, markup included.
pub fn changed_page(fullname: &str) -> Page {
    Page {
        title: "Fullname changed",
        heading: "Fullname changed",
        msg: format!("Fullname changed to <em>{}</em>.", fullname),
    }
}

pub fn change_failed_page() -> Page {
    Page {
        title: "Error while changing fullname",
        heading: "Error while changing fullname",
        msg: "An error occurred while attempting to change your fullname.  Please contact an administrator."
            .to_string(),
    }
}

/// Runs the change-fullname decision sequence. The store is only touched once
/// the session is valid, the request is not a cancel and the new fullname is
/// non-blank.
pub async fn update_fullname(
    current_user: Result<CurrentUser, AuthFailure>,
    request: FullnameChangeRequest,
    store: &UserStore,
) -> FullnameOutcome {
    debug!("============= Update Fullname ===============");

    let current_user = match current_user {
        Ok(current_user) => current_user,
        Err(failure) => {
            debug!("Authentication failed");

            return FullnameOutcome::LoginRequired(failure);
        }
    };

    debug!("Checking for cancel");
    if request.is_cancel() {
        debug!("...cancel");

        return FullnameOutcome::Cancelled;
    }

    debug!("Checking post");
    let new_fullname = match request.newfullname {
        Some(new_fullname) => new_fullname,
        None => {
            debug!("...not set");

            return FullnameOutcome::MissingFullname;
        }
    };

    debug!("Checking blank -- {}", new_fullname);
    if new_fullname.trim().is_empty() {
        debug!("...Empty");

        return FullnameOutcome::BlankFullname;
    }

    match store.update_fullname(&current_user.username, &new_fullname).await {
        Ok(true) => FullnameOutcome::Changed(new_fullname),
        Ok(false) => {
            error!("Could not change fullname of {}: user not found", current_user.username);

            FullnameOutcome::ChangeFailed
        }
        Err(e) => {
            error!("Could not change fullname of {}: {}", current_user.username, e);

            FullnameOutcome::ChangeFailed
        }
    }
}
