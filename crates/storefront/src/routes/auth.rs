//! Authentication route handlers.
//!
//! Sign-in checks the credentials against the store API and keeps the
//! matching user in the session. There is no registration here: the sign-up
//! link points at `/sign-up`, and the social buttons open the provider's own
//! sign-in page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use boutique_core::{Email, EmailError};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::StoreApi;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{PageContext, clear_current_user, flash, set_current_user};
use crate::models::Notice;
use crate::models::notice::messages;
use crate::services::auth::{LoginOutcome, authenticate};
use crate::state::AppState;

/// Where the sign-up link points.
pub const SIGN_UP_PATH: &str = "/sign-up";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// Missing fields deserialize as empty so they are reported as incomplete
/// rather than rejected by the extractor.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Social Login
// =============================================================================

/// An external sign-in page opened in a new tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialProvider {
    pub name: &'static str,
    pub url: &'static str,
    /// CSS modifier for the button.
    pub slug: &'static str,
}

/// Social sign-in buttons, in display order.
pub const SOCIAL_PROVIDERS: [SocialProvider; 2] = [
    SocialProvider {
        name: "Google",
        url: "https://accounts.google.com/signin",
        slug: "google",
    },
    SocialProvider {
        name: "Facebook",
        url: "https://www.facebook.com/login",
        slug: "facebook",
    },
];

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    /// Email to prefill after a failed attempt.
    pub email: String,
    pub providers: &'static [SocialProvider],
    pub sign_up_path: &'static str,
}

impl LoginTemplate {
    fn new(page: PageContext, email: String) -> Self {
        Self {
            page,
            email,
            providers: &SOCIAL_PROVIDERS,
            sign_up_path: SIGN_UP_PATH,
        }
    }
}

// =============================================================================
// Login
// =============================================================================

/// What a login submission leads to.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginReply {
    /// Signed in; go to the listing.
    SignedIn,
    /// Show the form again with a notice.
    Retry {
        status: StatusCode,
        email: String,
        notice: Notice,
    },
}

impl LoginReply {
    fn retry(status: StatusCode, email: &str, message: &str) -> Self {
        Self::Retry {
            status,
            email: email.trim().to_string(),
            notice: Notice::error(message),
        }
    }
}

/// Check a login submission and sign the user in on success.
///
/// The session is written exactly once, and only when the API returned at
/// least one matching account.
///
/// # Errors
///
/// Returns an error if the session cannot be updated.
pub async fn submit_login<A: StoreApi>(
    api: &A,
    session: &Session,
    form: LoginForm,
) -> Result<LoginReply, AppError> {
    let password = SecretString::from(form.password);
    if password.expose_secret().is_empty() {
        return Ok(LoginReply::retry(
            StatusCode::UNPROCESSABLE_ENTITY,
            &form.email,
            messages::INCOMPLETE_CREDENTIALS,
        ));
    }

    let email = match form.email.parse::<Email>() {
        Ok(email) => email,
        Err(EmailError::Empty) => {
            return Ok(LoginReply::retry(
                StatusCode::UNPROCESSABLE_ENTITY,
                &form.email,
                messages::INCOMPLETE_CREDENTIALS,
            ));
        }
        // No account can match an address that does not parse
        Err(_) => {
            return Ok(LoginReply::retry(
                StatusCode::UNAUTHORIZED,
                &form.email,
                messages::INVALID_CREDENTIALS,
            ));
        }
    };

    match authenticate(api, &email, &password).await {
        Ok(LoginOutcome::Authenticated(user)) => {
            set_current_user(session, &user).await?;
            set_sentry_user(&user.id, user.email.as_deref());
            Ok(LoginReply::SignedIn)
        }
        Ok(LoginOutcome::Rejected) => Ok(LoginReply::retry(
            StatusCode::UNAUTHORIZED,
            email.as_str(),
            messages::INVALID_CREDENTIALS,
        )),
        Err(e) => {
            tracing::error!(error = %e, "Error during login");
            Ok(LoginReply::retry(
                StatusCode::BAD_GATEWAY,
                email.as_str(),
                messages::LOGIN_FAILED,
            ))
        }
    }
}

/// Display the login page.
pub async fn login_page(page: PageContext) -> impl IntoResponse {
    LoginTemplate::new(page, String::new())
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    Ok(match submit_login(state.api(), &session, form).await? {
        LoginReply::SignedIn => Redirect::to("/").into_response(),
        LoginReply::Retry {
            status,
            email,
            notice,
        } => (
            status,
            LoginTemplate::new(page.with_notice(Some(notice)), email),
        )
            .into_response(),
    })
}

/// Handle logout.
///
/// `Clear-Site-Data` empties the browser caches, service worker caches
/// included, so nothing rendered for this shopper outlives the session.
///
/// # Errors
///
/// Returns an error if the session cannot be updated.
pub async fn logout(session: Session) -> Result<Response, AppError> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    flash(&session, &Notice::info(messages::SIGNED_OUT)).await;
    Ok((
        [(HeaderName::from_static("clear-site-data"), "\"cache\"")],
        Redirect::to("/"),
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use boutique_core::UserId;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::api::User;
    use crate::api::fake::{Call, FakeApi};
    use crate::middleware::current_user;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn api() -> FakeApi {
        let user = User {
            id: UserId::new(5),
            email: Some("ana@example.com".to_string()),
            name: Some("Ana".to_string()),
        };
        FakeApi {
            users: vec![(
                "ana@example.com".to_string(),
                "hunter22".to_string(),
                user,
            )],
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn test_matching_credentials_sign_in() {
        let api = api();
        let session = session();

        let reply = submit_login(&api, &session, form(" ana@example.com ", "hunter22"))
            .await
            .unwrap();

        assert_eq!(reply, LoginReply::SignedIn);
        let user = current_user(&session).await.unwrap();
        assert_eq!(user.id, UserId::new(5));
        assert_eq!(user.display_name(), "Ana");
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_session_empty() {
        let api = api();
        let session = session();

        let reply = submit_login(&api, &session, form("ana@example.com", "nope"))
            .await
            .unwrap();

        assert_eq!(
            reply,
            LoginReply::Retry {
                status: StatusCode::UNAUTHORIZED,
                email: "ana@example.com".to_string(),
                notice: Notice::error("Invalid username or password"),
            }
        );
        assert!(current_user(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_fields_skip_the_api() {
        let api = api();
        let session = session();

        for (email, password) in [("", "hunter22"), ("ana@example.com", ""), ("  ", "x")] {
            let reply = submit_login(&api, &session, form(email, password))
                .await
                .unwrap();
            match reply {
                LoginReply::Retry { status, notice, .. } => {
                    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                    assert_eq!(notice.message, "Please enter your email and password.");
                }
                LoginReply::SignedIn => panic!("empty credentials signed in"),
            }
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_shows_generic_notice() {
        let api = FakeApi::failing();
        let session = session();

        let reply = submit_login(&api, &session, form("ana@example.com", "hunter22"))
            .await
            .unwrap();

        match reply {
            LoginReply::Retry { status, notice, .. } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(
                    notice.message,
                    "An error occurred during login. Please try again."
                );
            }
            LoginReply::SignedIn => panic!("failed lookup signed in"),
        }
        assert_eq!(
            api.calls(),
            vec![Call::Login("ana@example.com".to_string())]
        );
        assert!(current_user(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_user() {
        let api = api();
        let session = session();
        submit_login(&api, &session, form("ana@example.com", "hunter22"))
            .await
            .unwrap();

        let response = logout(session.clone()).await.unwrap();

        assert!(current_user(&session).await.is_none());
        assert_eq!(response.headers()["clear-site-data"], "\"cache\"");
        assert_eq!(response.headers()["location"], "/");
    }
}
