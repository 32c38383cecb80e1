//! Portal users: identifiers, roles and the profile shown on the dashboard.
//!
//! Profiles are owned by the backend platform; the portal only mirrors the
//! row shape so it can render the dashboard and gate admin operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors for user primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Access token was blank.
    #[error("access token must not be empty")]
    EmptyAccessToken,
}

/// Stable user identifier issued by the auth platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new(" ").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bearer token the platform issued for a signed-in user.
///
/// Row-level security on the platform is evaluated against this token, so
/// every data call made on behalf of a user carries it. The secret is wiped
/// from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Validate and wrap a raw bearer token.
    pub fn new(token: impl Into<String>) -> Result<Self, UserValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(UserValidationError::EmptyAccessToken);
        }
        Ok(Self(Zeroizing::new(token)))
    }

    /// Borrow the raw token for an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// The signed-in caller on whose behalf a data call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Authenticated user id.
    pub user_id: UserId,
    /// Bearer token scoped to that user.
    pub access_token: AccessToken,
}

impl Caller {
    /// Bundle a user id with its access token.
    pub fn new(user_id: UserId, access_token: AccessToken) -> Self {
        Self {
            user_id,
            access_token,
        }
    }
}

/// Role recorded on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Rider booking trips.
    Passenger,
    /// Approved driver.
    Driver,
    /// Operator reviewing driver applications.
    Admin,
}

/// Profile row mirrored from the `profiles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(example = "Sarah Johnson")]
    pub full_name: String,
    #[schema(example = "sarah@example.com")]
    pub email: String,
    pub role: UserRole,
    #[schema(example = 4.8)]
    pub rating: f64,
    #[schema(example = 12)]
    pub total_rides: u32,
    pub is_verified: bool,
}

impl UserProfile {
    /// Whether the profile may use the admin view.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Outcome of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Authenticated user.
    pub user_id: UserId,
    /// Email the platform has on record.
    pub email: String,
    /// Bearer token for subsequent data calls. Absent when the platform
    /// requires email confirmation before issuing a session.
    pub access_token: Option<AccessToken>,
}

impl AuthSession {
    /// The caller identity, when the platform issued a token.
    pub fn caller(&self) -> Option<Caller> {
        self.access_token
            .clone()
            .map(|token| Caller::new(self.user_id, token))
    }
}
