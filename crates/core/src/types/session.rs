//! The admin "logged in" flag.
//!
//! This is a UI convenience gate, not an authentication mechanism: it carries
//! no token and no signature, and nothing re-validates it against the API.
//! Anyone able to set it can see the admin screens; the REST backend is what
//! must protect its own data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presumed admin login state, as written after a successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFlag {
    pub is_logged_in: bool,
    pub username: String,
    pub login_time: DateTime<Utc>,
    /// Whether the flag should outlive the browser session.
    pub remember_me: bool,
}

impl SessionFlag {
    /// Flag for a login that just succeeded.
    #[must_use]
    pub fn logged_in(username: impl Into<String>, remember_me: bool) -> Self {
        Self {
            is_logged_in: true,
            username: username.into(),
            login_time: Utc::now(),
            remember_me,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_uses_camel_case_keys() {
        let flag = SessionFlag::logged_in("admin", true);
        let value = serde_json::to_value(&flag).unwrap();
        assert_eq!(value["isLoggedIn"], true);
        assert_eq!(value["username"], "admin");
        assert_eq!(value["rememberMe"], true);
        assert!(value["loginTime"].is_string());
    }
}
