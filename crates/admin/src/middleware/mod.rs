//! HTTP middleware for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with an in-memory store)
//!
//! Access to the console is gated per handler by the
//! [`RequireAdminFlag`](auth::RequireAdminFlag) extractor rather than by a
//! layer, so the login page and health check need no exemption list.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminFlag, clear_session_flag, current_flag, set_session_flag};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
