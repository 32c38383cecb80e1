//! Driven port for the platform's password authentication.
//!
//! Adapters exchange validated credentials for a platform session. The
//! domain never sees HTTP status codes; adapters classify failures into the
//! variants below.

use async_trait::async_trait;

use crate::domain::{AccessToken, AuthSession, SignInCredentials, SignUpRequest, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by the auth platform.
    pub enum AuthGatewayError {
        /// Email and password did not match an account.
        InvalidCredentials => "invalid email or password",
        /// An account with the email already exists.
        AccountExists => "an account with this email already exists",
        /// The platform refused the request, e.g. a weak password.
        Rejected { message: String } => "auth platform rejected request: {message}",
        /// The platform could not be reached.
        Transport { message: String } => "auth platform unreachable: {message}",
        /// The platform answered with an unexpected body.
        Decode { message: String } => "auth platform response malformed: {message}",
    }
}

/// Port for signing users in and creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, AuthGatewayError>;

    /// Create an account; the full name is stored as user metadata.
    ///
    /// The returned session has no access token when the platform requires
    /// email confirmation first.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession, AuthGatewayError>;
}

/// Password accepted by every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";
/// Fixture account holding the admin role.
pub const FIXTURE_ADMIN_EMAIL: &str = "admin@smartline.test";
/// Fixture account holding the passenger role.
pub const FIXTURE_PASSENGER_EMAIL: &str = "rider@smartline.test";
/// User id of [`FIXTURE_ADMIN_EMAIL`].
pub const FIXTURE_ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// User id of [`FIXTURE_PASSENGER_EMAIL`].
pub const FIXTURE_PASSENGER_ID: &str = "123e4567-e89b-12d3-a456-426614174001";

/// In-memory auth used when no platform is configured.
///
/// Two fixed accounts sign in with [`FIXTURE_PASSWORD`]; every sign-up
/// succeeds with a fresh user id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

fn fixture_session(id: &str, email: &str) -> Result<AuthSession, AuthGatewayError> {
    let user_id =
        UserId::new(id).map_err(|err| AuthGatewayError::decode(format!("fixture id: {err}")))?;
    fixture_session_for(user_id, email)
}

fn fixture_session_for(user_id: UserId, email: &str) -> Result<AuthSession, AuthGatewayError> {
    let token = AccessToken::new(format!("fixture-token-{user_id}"))
        .map_err(|err| AuthGatewayError::decode(format!("fixture token: {err}")))?;
    Ok(AuthSession {
        user_id,
        email: email.to_owned(),
        access_token: Some(token),
    })
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, AuthGatewayError> {
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(AuthGatewayError::InvalidCredentials);
        }
        match credentials.email() {
            FIXTURE_ADMIN_EMAIL => fixture_session(FIXTURE_ADMIN_ID, FIXTURE_ADMIN_EMAIL),
            FIXTURE_PASSENGER_EMAIL => {
                fixture_session(FIXTURE_PASSENGER_ID, FIXTURE_PASSENGER_EMAIL)
            }
            _ => Err(AuthGatewayError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession, AuthGatewayError> {
        if matches!(request.email(), FIXTURE_ADMIN_EMAIL | FIXTURE_PASSENGER_EMAIL) {
            return Err(AuthGatewayError::AccountExists);
        }
        fixture_session_for(UserId::random(), request.email())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FIXTURE_ADMIN_EMAIL, "password", Some(FIXTURE_ADMIN_ID))]
    #[case(FIXTURE_PASSENGER_EMAIL, "password", Some(FIXTURE_PASSENGER_ID))]
    #[case(FIXTURE_ADMIN_EMAIL, "wrong", None)]
    #[case("stranger@example.com", "password", None)]
    #[tokio::test]
    async fn fixture_sign_in_accepts_known_accounts(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: Option<&str>,
    ) {
        let creds = SignInCredentials::try_from_parts(email, password).expect("credentials");
        let result = FixtureAuthGateway.sign_in(&creds).await;
        match (expected, result) {
            (Some(id), Ok(session)) => {
                assert_eq!(session.user_id.to_string(), id);
                assert!(session.access_token.is_some());
            }
            (None, Err(err)) => assert_eq!(err, AuthGatewayError::InvalidCredentials),
            (Some(_), Err(err)) => panic!("expected success, got error: {err:?}"),
            (None, Ok(session)) => panic!("expected failure, got session: {session:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_sign_up_rejects_existing_email() {
        let request = SignUpRequest::try_from_parts("Admin", FIXTURE_ADMIN_EMAIL, "pw")
            .expect("request");
        assert_eq!(
            FixtureAuthGateway.sign_up(&request).await.err(),
            Some(AuthGatewayError::AccountExists)
        );
    }

    #[rstest]
    fn constructors_build_messages() {
        assert_eq!(
            AuthGatewayError::rejected("weak password").to_string(),
            "auth platform rejected request: weak password"
        );
    }
}
