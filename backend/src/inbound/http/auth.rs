//! Passenger sign-in, sign-up and sign-out.
//!
//! ```text
//! POST /api/v1/auth/sign-in {"email":"rider@example.com","password":"secret"}
//! POST /api/v1/auth/sign-up {"fullName":"Sarah Johnson","email":"...","password":"..."}
//! POST /api/v1/auth/sign-out
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{AuthSession, Error, FormKind, SignInCredentials, SignUpRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

/// Request body for `POST /api/v1/auth/sign-in`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInPayload {
    #[schema(example = "rider@example.com")]
    pub email: String,
    #[schema(value_type = String, example = "secret")]
    pub password: Zeroizing<String>,
}

/// Request body for `POST /api/v1/auth/sign-up`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    #[schema(example = "Sarah Johnson")]
    pub full_name: String,
    #[schema(example = "rider@example.com")]
    pub email: String,
    #[schema(value_type = String, example = "secret")]
    pub password: Zeroizing<String>,
}

/// Who is now signed in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    pub email: String,
    /// False when the platform asks the user to confirm their email first.
    pub signed_in: bool,
}

impl From<&AuthSession> for AuthResponse {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session.user_id.to_string(),
            email: session.email.clone(),
            signed_in: session.access_token.is_some(),
        }
    }
}

/// Authenticate with email and password and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 409, description = "Submission already in flight", body = Error),
        (status = 503, description = "Auth platform unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInPayload>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials = SignInCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| field_error(&err))?;
    let _permit = state.begin_submission(&session, FormKind::SignIn)?;
    let auth = state.accounts.sign_in(&credentials).await?;
    session.persist_auth(&auth)?;
    Ok(web::Json(AuthResponse::from(&auth)))
}

/// Create a passenger account and start a session when the platform
/// issues one.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = SignUpPayload,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Account exists or submission in flight", body = Error),
        (status = 503, description = "Auth platform unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpPayload>,
) -> ApiResult<HttpResponse> {
    let request =
        SignUpRequest::try_from_parts(&payload.full_name, &payload.email, &payload.password)
            .map_err(|err| field_error(&err))?;
    let _permit = state.begin_submission(&session, FormKind::SignUp)?;
    let auth = state.accounts.sign_up(&request).await?;
    session.persist_auth(&auth)?;
    Ok(HttpResponse::Created().json(AuthResponse::from(&auth)))
}

/// End the session; the language choice survives.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[post("/auth/sign-out")]
pub async fn sign_out(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        info!(%user_id, "user signed out");
    }
    session.sign_out()?;
    Ok(HttpResponse::NoContent().finish())
}
