//! Session middleware configuration for admin.
//!
//! Sessions live in process memory: the only thing stored is the login
//! flag, and losing it on restart just means logging in again. Cookies end
//! with the browser session unless the login asked to be remembered, in
//! which case [`set_session_flag`](super::set_session_flag) switches that one
//! session to an inactivity expiry.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "maktaba_admin_session";

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
