//! Authentication route handlers.
//!
//! Handles credential login, registration, and logout. Auth failures come
//! back as `?error=` codes on the form pages; successful logins honor an
//! internal `?redirect=` target so checkout can resume where it left off.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use primrose_core::Cart;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user, write_cart};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub redirect: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error display and post-login redirect.
#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
    pub redirect: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub redirect: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Only internal paths may be used as post-login targets.
fn sanitize_redirect(target: Option<String>) -> Option<String> {
    target.filter(|t| t.starts_with('/') && !t.starts_with("//"))
}

fn error_text(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password".to_owned(),
        "email_taken" => "An account with this email already exists".to_owned(),
        "password_mismatch" => "Passwords must match".to_owned(),
        "name_too_short" => "Username must be at least 4 characters".to_owned(),
        "password_too_short" => "Password must be at least 6 characters".to_owned(),
        "invalid_email" => "Invalid email format".to_owned(),
        "session" => "Session error, please try again".to_owned(),
        other => other.to_owned(),
    }
}

async fn establish_session(
    session: &Session,
    user: &crate::models::User,
) -> Result<(), tower_sessions::session::Error> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    };
    set_current_user(session, &current).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// An already-authenticated user is sent straight to their destination.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<AuthQuery>,
) -> Response {
    let redirect = sanitize_redirect(query.redirect);

    if user.is_some() {
        let target = redirect.unwrap_or_else(|| "/".to_owned());
        return Redirect::to(&target).into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(error_text),
        redirect,
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => {
            if let Err(e) = establish_session(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            let target = sanitize_redirect(form.redirect).unwrap_or_else(|| "/".to_owned());
            Redirect::to(&target).into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
///
/// An already-authenticated user has nothing to register for.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<AuthQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    RegisterTemplate {
        error: query.error.as_deref().map(error_text),
    }
    .into_response()
}

/// Handle registration form submission.
///
/// A successful registration logs the user straight in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }

    let auth = AuthService::new(state.pool());

    match auth.register(&form.name, &form.email, &form.password).await {
        Ok(user) => {
            if let Err(e) = establish_session(&session, &user).await {
                tracing::error!("Failed to set session after registration: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/auth/register?error=email_taken").into_response()
        }
        Err(AuthError::InvalidName(_)) => {
            Redirect::to("/auth/register?error=name_too_short").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/auth/register?error=password_too_short").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/auth/register?error=invalid_email").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            Redirect::to("/auth/register?error=failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the session and resets the cart cookie: line items and the
/// in-progress checkout selections all belong to the departing user.
#[instrument(skip(session, jar))]
pub async fn logout(session: Session, jar: CookieJar) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();

    let jar = write_cart(jar, &Cart::default());

    (jar, Redirect::to("/")).into_response()
}
