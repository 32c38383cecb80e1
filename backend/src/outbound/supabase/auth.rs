//! Password auth against the platform's auth server (`/auth/v1`).

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::domain::ports::{AuthGateway, AuthGatewayError};
use crate::domain::{AuthSession, SignInCredentials, SignUpRequest};

use super::client::{status_message, RawResponse, SupabaseClient};
use super::dto::{
    AuthErrorDto, AuthSessionDto, PasswordGrantDto, SignUpDto, SignUpMetadataDto,
    SignUpResponseDto,
};

const INVALID_CREDENTIAL_CODES: [&str; 2] = ["invalid_grant", "invalid_credentials"];
const ACCOUNT_EXISTS_CODES: [&str; 2] = ["user_already_exists", "email_exists"];

/// Auth gateway backed by the platform's password grant and sign-up
/// endpoints.
#[derive(Debug, Clone)]
pub struct SupabaseAuthGateway {
    client: SupabaseClient,
}

impl SupabaseAuthGateway {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuthGateway {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, AuthGatewayError> {
        let mut url = self.client.endpoint(["auth", "v1", "token"]);
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self
            .client
            .request(Method::POST, url, None)
            .json(&PasswordGrantDto {
                email: credentials.email(),
                password: credentials.password(),
            });
        let response = SupabaseClient::send(request)
            .await
            .map_err(map_transport_error)?;
        debug!(status = response.status.as_u16(), "password grant answered");
        if !response.status.is_success() {
            return Err(map_status_error(&response));
        }
        let dto: AuthSessionDto = decode(&response.body)?;
        dto.into_domain(credentials.email())
            .map_err(AuthGatewayError::decode)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession, AuthGatewayError> {
        let url = self.client.endpoint(["auth", "v1", "signup"]);
        let builder = self
            .client
            .request(Method::POST, url, None)
            .json(&SignUpDto {
                email: request.email(),
                password: request.password(),
                data: SignUpMetadataDto {
                    full_name: request.full_name(),
                },
            });
        let response = SupabaseClient::send(builder)
            .await
            .map_err(map_transport_error)?;
        debug!(status = response.status.as_u16(), "sign-up answered");
        if !response.status.is_success() {
            return Err(map_status_error(&response));
        }
        let dto: SignUpResponseDto = decode(&response.body)?;
        dto.into_domain(request.email())
            .map_err(AuthGatewayError::decode)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, AuthGatewayError> {
    serde_json::from_slice(body).map_err(|err| AuthGatewayError::decode(err.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> AuthGatewayError {
    AuthGatewayError::transport(error.to_string())
}

fn map_status_error(response: &RawResponse) -> AuthGatewayError {
    classify_failure(response.status, &response.body)
}

fn classify_failure(status: StatusCode, body: &[u8]) -> AuthGatewayError {
    let error: AuthErrorDto = serde_json::from_slice(body).unwrap_or_default();
    let code = error.code().unwrap_or_default();
    let description = error.description().unwrap_or_default();

    if INVALID_CREDENTIAL_CODES.contains(&code) {
        return AuthGatewayError::invalid_credentials();
    }
    if ACCOUNT_EXISTS_CODES.contains(&code)
        || description.to_ascii_lowercase().contains("already registered")
    {
        return AuthGatewayError::account_exists();
    }
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return AuthGatewayError::transport(status_message(status, body));
    }
    if description.is_empty() {
        AuthGatewayError::rejected(status_message(status, body))
    } else {
        AuthGatewayError::rejected(description)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for auth failure classification.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::legacy_invalid_grant(
        StatusCode::BAD_REQUEST,
        r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        AuthGatewayError::invalid_credentials()
    )]
    #[case::invalid_credentials_code(
        StatusCode::BAD_REQUEST,
        r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        AuthGatewayError::invalid_credentials()
    )]
    #[case::user_exists_code(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
        AuthGatewayError::account_exists()
    )]
    #[case::user_exists_message(
        StatusCode::BAD_REQUEST,
        r#"{"msg":"User already registered"}"#,
        AuthGatewayError::account_exists()
    )]
    #[case::weak_password(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"error_code":"weak_password","msg":"Password should be at least 6 characters"}"#,
        AuthGatewayError::rejected("Password should be at least 6 characters")
    )]
    #[case::throttled(
        StatusCode::TOO_MANY_REQUESTS,
        "",
        AuthGatewayError::transport("status 429")
    )]
    #[case::gateway_down(
        StatusCode::BAD_GATEWAY,
        "<html>bad gateway</html>",
        AuthGatewayError::transport("status 502: <html>bad gateway</html>")
    )]
    #[case::opaque_rejection(
        StatusCode::FORBIDDEN,
        "nope",
        AuthGatewayError::rejected("status 403: nope")
    )]
    fn classifies_failures(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: AuthGatewayError,
    ) {
        assert_eq!(classify_failure(status, body.as_bytes()), expected);
    }

    #[rstest]
    fn malformed_success_body_is_a_decode_error() {
        let err = decode::<AuthSessionDto>(b"{}").expect_err("missing fields");
        assert!(matches!(err, AuthGatewayError::Decode { .. }));
    }
}
