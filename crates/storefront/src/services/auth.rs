//! Sign-in against the store API.

use boutique_core::Email;
use secrecy::SecretString;
use tracing::instrument;

use crate::api::{ApiError, StoreApi};
use crate::models::CurrentUser;

/// Result of checking a pair of credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The first account matching the credentials.
    Authenticated(CurrentUser),
    /// No account matched.
    Rejected,
}

/// Check credentials with the store API.
///
/// The first matching account wins; any further matches are ignored.
///
/// # Errors
///
/// Returns the API error when the lookup itself fails.
#[instrument(skip(api, password), fields(email_domain = %email.domain()))]
pub async fn authenticate<A: StoreApi>(
    api: &A,
    email: &Email,
    password: &SecretString,
) -> Result<LoginOutcome, ApiError> {
    let users = api.login_user(email, password).await?;

    match users.into_iter().next() {
        Some(user) => {
            tracing::info!(user_id = %user.id, "Login successful");
            Ok(LoginOutcome::Authenticated(user.into()))
        }
        None => {
            tracing::info!("Login rejected");
            Ok(LoginOutcome::Rejected)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::UserId;

    use super::*;
    use crate::api::User;
    use crate::api::fake::{Call, FakeApi};

    fn user(id: i64) -> User {
        User {
            id: UserId::new(id),
            email: Some(format!("user{id}@example.com")),
            name: None,
        }
    }

    fn api() -> FakeApi {
        FakeApi {
            users: vec![
                ("ana@example.com".into(), "pw".into(), user(1)),
                ("ana@example.com".into(), "pw".into(), user(2)),
            ],
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn test_first_match_is_authenticated() {
        let api = api();
        let email = Email::parse("ana@example.com").unwrap();
        let outcome = authenticate(&api, &email, &SecretString::from("pw"))
            .await
            .unwrap();

        match outcome {
            LoginOutcome::Authenticated(current) => assert_eq!(current.id, UserId::new(1)),
            LoginOutcome::Rejected => panic!("expected a user"),
        }
        assert_eq!(api.calls(), vec![Call::Login("ana@example.com".into())]);
    }

    #[tokio::test]
    async fn test_no_match_is_rejected() {
        let api = api();
        let email = Email::parse("ana@example.com").unwrap();
        let outcome = authenticate(&api, &email, &SecretString::from("wrong"))
            .await
            .unwrap();
        assert_eq!(outcome, LoginOutcome::Rejected);
    }

    #[tokio::test]
    async fn test_api_failure_is_returned() {
        let api = FakeApi::failing();
        let email = Email::parse("ana@example.com").unwrap();
        let result = authenticate(&api, &email, &SecretString::from("pw")).await;
        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    }
}
