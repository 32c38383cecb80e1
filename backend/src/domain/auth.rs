//! Passenger sign-in and sign-up forms.
//!
//! Keep inbound payload parsing outside the domain: handlers build these
//! values through the fallible constructors, which apply the same required
//! field rules the sign-up page enforces before anything reaches the auth
//! platform.

use thiserror::Error;
use zeroize::Zeroizing;

use super::form::{looks_like_email, required, FieldViolation};

/// Reasons a sign-in or sign-up form is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFormError {
    /// Email was missing or blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Full name was missing or blank.
    #[error("full name must not be empty")]
    EmptyFullName,
}

impl FieldViolation for AuthFormError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
            Self::EmptyFullName => "fullName",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::EmptyFullName => "empty_full_name",
        }
    }
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed, non-empty and shaped like an address.
/// - `password` is non-empty and kept verbatim; it is zeroised on drop.
///
/// # Examples
/// ```
/// use smartline::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts(" rider@example.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "rider@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthFormError> {
        let email = required(email).ok_or(AuthFormError::EmptyEmail)?;
        if !looks_like_email(email) {
            return Err(AuthFormError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(AuthFormError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up form: credentials plus the display name stored on the
/// new profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    full_name: String,
    credentials: SignInCredentials,
}

impl SignUpRequest {
    /// Validate raw form values in on-screen order: name, email, password.
    pub fn try_from_parts(
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthFormError> {
        let full_name = required(full_name).ok_or(AuthFormError::EmptyFullName)?;
        let credentials = SignInCredentials::try_from_parts(email, password)?;
        Ok(Self {
            full_name: full_name.to_owned(),
            credentials,
        })
    }

    /// Display name recorded as user metadata.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        self.credentials.email()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        self.credentials.password()
    }
}
