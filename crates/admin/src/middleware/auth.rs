//! The admin session gate.
//!
//! Protected handlers take [`RequireAdminFlag`], which reads the
//! [`SessionFlag`] written after a successful login. The flag is a UI gate,
//! not an authentication mechanism: nothing re-checks it against the API.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tower_sessions::{Expiry, Session, cookie::time::Duration};

use maktaba_core::SessionFlag;

/// Where unflagged visitors are sent.
pub const LOGIN_PATH: &str = "/admin-login";

/// Session keys for admin state.
pub mod keys {
    /// Key for the login flag.
    pub const SESSION_FLAG: &str = "maktaba_admin";
}

/// Extractor that requires the login flag.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminFlag(flag): RequireAdminFlag,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", flag.username)
/// }
/// ```
pub struct RequireAdminFlag(pub SessionFlag);

/// Error returned when the login flag is missing.
#[derive(Debug)]
pub enum AdminFlagRejection {
    /// Redirect to the login page (full page loads).
    RedirectToLogin,
    /// Tell HTMX to navigate to the login page (fragment requests).
    HtmxRedirect,
    /// No session layer is installed.
    Unavailable,
}

impl IntoResponse for AdminFlagRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::HtmxRedirect => (
                StatusCode::UNAUTHORIZED,
                AppendHeaders([("HX-Redirect", LOGIN_PATH)]),
            )
                .into_response(),
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminFlag
where
    S: Send + Sync,
{
    type Rejection = AdminFlagRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminFlagRejection::Unavailable)?;

        let flag = current_flag(session).await.ok().flatten().ok_or_else(|| {
            if parts.headers.contains_key("hx-request") {
                AdminFlagRejection::HtmxRedirect
            } else {
                AdminFlagRejection::RedirectToLogin
            }
        })?;

        Ok(Self(flag))
    }
}

/// Read the login flag, ignoring one that is stored but not set.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_flag(
    session: &Session,
) -> Result<Option<SessionFlag>, tower_sessions::session::Error> {
    Ok(session
        .get::<SessionFlag>(keys::SESSION_FLAG)
        .await?
        .filter(|flag| flag.is_logged_in))
}

/// Store the login flag under a fresh session id.
///
/// A remembered login keeps its cookie for `remember_me_days` of inactivity;
/// otherwise the cookie ends with the browser session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_session_flag(
    session: &Session,
    flag: &SessionFlag,
    remember_me_days: i64,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    if flag.remember_me {
        session.set_expiry(Some(Expiry::OnInactivity(Duration::days(remember_me_days))));
    }
    session.insert(keys::SESSION_FLAG, flag).await
}

/// Drop the login flag and everything else in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear_session_flag(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Request, header};
    use tower_sessions::MemoryStore;

    use super::*;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn extract(session: Option<Session>, htmx: bool) -> Result<SessionFlag, Response> {
        let mut builder = Request::builder().uri("/admin");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        RequireAdminFlag::from_request_parts(&mut parts, &())
            .await
            .map(|RequireAdminFlag(flag)| flag)
            .map_err(IntoResponse::into_response)
    }

    #[tokio::test]
    async fn test_unflagged_visit_redirects_to_login() {
        let response = extract(Some(new_session()), false).await.unwrap_err();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_unflagged_htmx_request_gets_hx_redirect() {
        let response = extract(Some(new_session()), true).await.unwrap_err();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["HX-Redirect"], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_missing_session_layer_is_server_error() {
        let response = extract(None, false).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_flag_round_trip_and_logout() {
        let session = new_session();
        let flag = SessionFlag::logged_in("admin", false);

        set_session_flag(&session, &flag, 30).await.unwrap();
        assert_eq!(extract(Some(session.clone()), false).await.unwrap(), flag);
        assert!(session.expiry().is_none());

        clear_session_flag(&session).await.unwrap();
        assert!(current_flag(&session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remember_me_sets_inactivity_expiry() {
        let session = new_session();

        set_session_flag(&session, &SessionFlag::logged_in("admin", true), 30)
            .await
            .unwrap();

        assert!(matches!(
            session.expiry(),
            Some(Expiry::OnInactivity(d)) if d == Duration::days(30)
        ));
    }

    #[tokio::test]
    async fn test_cleared_flag_value_does_not_pass() {
        let session = new_session();
        let mut flag = SessionFlag::logged_in("admin", false);
        flag.is_logged_in = false;
        session.insert(keys::SESSION_FLAG, &flag).await.unwrap();

        assert!(current_flag(&session).await.unwrap().is_none());
    }
}
