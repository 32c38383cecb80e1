//! Account access service.
//!
//! Implements the [`AccountAccess`] driving port on top of the
//! [`AuthGateway`] driven port and translates platform failures into domain
//! errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{AccountAccess, AuthGateway, AuthGatewayError};
use crate::domain::{AuthSession, Error, SignInCredentials, SignUpRequest};

/// Map auth platform failures onto domain errors.
pub(crate) fn map_auth_error(error: AuthGatewayError) -> Error {
    match error {
        AuthGatewayError::InvalidCredentials => {
            Error::unauthorized("invalid email or password")
        }
        AuthGatewayError::AccountExists => Error::conflict("an account with this email already exists")
            .with_details(json!({ "field": "email", "code": "account_exists" })),
        AuthGatewayError::Rejected { message } => Error::invalid_request(message),
        AuthGatewayError::Transport { message } => {
            Error::service_unavailable(format!("auth platform unavailable: {message}"))
        }
        AuthGatewayError::Decode { message } => {
            Error::internal(format!("auth platform response malformed: {message}"))
        }
    }
}

/// Account service backed by an auth gateway.
#[derive(Clone)]
pub struct AccountAccessService<G: ?Sized> {
    gateway: Arc<G>,
}

impl<G: ?Sized> AccountAccessService<G> {
    /// Create the service over `gateway`.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G> AccountAccess for AccountAccessService<G>
where
    G: AuthGateway + ?Sized,
{
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, Error> {
        match self.gateway.sign_in(credentials).await {
            Ok(session) => {
                info!(user_id = %session.user_id, "user signed in");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "sign-in failed");
                Err(map_auth_error(err))
            }
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession, Error> {
        match self.gateway.sign_up(request).await {
            Ok(session) => {
                info!(
                    user_id = %session.user_id,
                    confirmed = session.access_token.is_some(),
                    "account created"
                );
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "sign-up failed");
                Err(map_auth_error(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockAuthGateway;
    use crate::domain::{ErrorCode, UserId};
    use rstest::rstest;

    fn credentials() -> SignInCredentials {
        SignInCredentials::try_from_parts("rider@example.com", "pw").expect("credentials")
    }

    #[rstest]
    #[case(AuthGatewayError::InvalidCredentials, ErrorCode::Unauthorized)]
    #[case(AuthGatewayError::AccountExists, ErrorCode::Conflict)]
    #[case(AuthGatewayError::rejected("weak"), ErrorCode::InvalidRequest)]
    #[case(AuthGatewayError::transport("refused"), ErrorCode::ServiceUnavailable)]
    #[case(AuthGatewayError::decode("bad json"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn sign_in_maps_gateway_errors(
        #[case] failure: AuthGatewayError,
        #[case] expected: ErrorCode,
    ) {
        let mut gateway = MockAuthGateway::new();
        gateway
            .expect_sign_in()
            .times(1)
            .return_once(move |_| Err(failure));
        let service = AccountAccessService::new(Arc::new(gateway));

        let err = service
            .sign_in(&credentials())
            .await
            .expect_err("gateway failure surfaces");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_passes_session_through() {
        let user_id = UserId::random();
        let mut gateway = MockAuthGateway::new();
        gateway
            .expect_sign_up()
            .withf(|request| request.full_name() == "Maria Garcia")
            .times(1)
            .return_once(move |request| {
                Ok(AuthSession {
                    user_id,
                    email: request.email().to_owned(),
                    access_token: None,
                })
            });
        let service = AccountAccessService::new(Arc::new(gateway));
        let request = SignUpRequest::try_from_parts("Maria Garcia", "maria@example.com", "pw")
            .expect("request");

        let session = service.sign_up(&request).await.expect("sign-up succeeds");
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.email, "maria@example.com");
    }
}
