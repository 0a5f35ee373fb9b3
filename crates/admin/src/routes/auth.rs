//! Login flag route handlers.
//!
//! Credentials are checked once by the REST API; on success the admin app
//! stores a [`SessionFlag`] and trusts it until logout. There is no token.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use maktaba_client::CatalogApi;
use maktaba_core::SessionFlag;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::LOGIN_PATH;
use crate::middleware::{clear_session_flag, current_flag, set_session_flag};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub error: Option<String>,
}

/// Login form data. Deliberately not `Debug`: it carries the password.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Checkbox; present only when ticked.
    pub remember_me: Option<String>,
}

/// Render the login page, or skip it when already flagged.
///
/// GET /admin-login
#[instrument(skip_all)]
pub async fn login_page(session: Session) -> Result<Response> {
    if current_flag(&session).await?.is_some() {
        return Ok(Redirect::to("/admin").into_response());
    }
    Ok(LoginTemplate {
        username: String::new(),
        error: None,
    }
    .into_response())
}

/// Check credentials with the API and set the flag.
///
/// POST /admin-login
#[instrument(skip_all, fields(username = %form.username.trim()))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let username = form.username.trim().to_string();
    let password = SecretString::from(form.password);
    let retry = |error: String| {
        LoginTemplate {
            username: username.clone(),
            error: Some(error),
        }
        .into_response()
    };

    if username.is_empty() || password.expose_secret().is_empty() {
        return Ok(retry("Enter your username and password".to_string()));
    }

    match state.api().login(&username, &password).await {
        Ok(response) if response.is_logged_in => {
            let flag = SessionFlag::logged_in(response.username, form.remember_me.is_some());
            set_session_flag(&session, &flag, state.config().remember_me_days).await?;
            set_sentry_user(&flag.username);
            tracing::info!(remember_me = flag.remember_me, "Admin logged in");
            Ok(Redirect::to("/admin").into_response())
        }
        Ok(_) => Ok(retry("Login failed".to_string())),
        Err(e) => {
            tracing::warn!(error = %e, "Login rejected");
            Ok(retry(e.user_message("Login failed")))
        }
    }
}

/// Clear the flag.
///
/// POST /admin/logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_session_flag(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to(LOGIN_PATH))
}
