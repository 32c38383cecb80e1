//! Driver application form and its validation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::documents::{DocumentKind, UploadedFile};
use crate::domain::form::{looks_like_email, required, FieldViolation};

/// Identity document the applicant declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentityType {
    NationalId,
    Passport,
    DriverLicense,
}

impl IdentityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NationalId => "national_id",
            Self::Passport => "passport",
            Self::DriverLicense => "driver_license",
        }
    }
}

/// Error returned when parsing an unknown identity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIdentityTypeError;

impl fmt::Display for ParseIdentityTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid identity type")
    }
}

impl std::error::Error for ParseIdentityTypeError {}

impl FromStr for IdentityType {
    type Err = ParseIdentityTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "national_id" => Ok(Self::NationalId),
            "passport" => Ok(Self::Passport),
            "driver_license" => Ok(Self::DriverLicense),
            _ => Err(ParseIdentityTypeError),
        }
    }
}

/// Validation errors raised by [`DriverApplicationDraft::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverApplicationError {
    EmptyFirstName,
    EmptyLastName,
    EmptyEmail,
    InvalidEmail,
    EmptyPhone,
    MissingIdentityType,
    InvalidIdentityType,
    EmptyIdentityNumber,
    EmptyPassword,
    PasswordMismatch,
    MissingDocument { kind: DocumentKind },
    TooManyFiles { kind: DocumentKind },
    EmptyFileName { kind: DocumentKind },
    EmptyFile { kind: DocumentKind },
    UnsupportedContentType { kind: DocumentKind },
}

impl fmt::Display for DriverApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => f.write_str("first name must not be empty"),
            Self::EmptyLastName => f.write_str("last name must not be empty"),
            Self::EmptyEmail => f.write_str("email must not be empty"),
            Self::InvalidEmail => f.write_str("email must be a valid address"),
            Self::EmptyPhone => f.write_str("phone number must not be empty"),
            Self::MissingIdentityType => f.write_str("identity type must be selected"),
            Self::InvalidIdentityType => {
                f.write_str("identity type must be national_id, passport or driver_license")
            }
            Self::EmptyIdentityNumber => f.write_str("identity number must not be empty"),
            Self::EmptyPassword => f.write_str("password must not be empty"),
            Self::PasswordMismatch => f.write_str("password confirmation does not match"),
            Self::MissingDocument { kind } => write!(f, "{kind} is required"),
            Self::TooManyFiles { kind } => write!(f, "{kind} accepts a single file"),
            Self::EmptyFileName { kind } => write!(f, "{kind} file name must not be empty"),
            Self::EmptyFile { kind } => write!(f, "{kind} file must not be empty"),
            Self::UnsupportedContentType { kind } => {
                write!(f, "{kind} must be an image or a PDF document")
            }
        }
    }
}

impl std::error::Error for DriverApplicationError {}

impl FieldViolation for DriverApplicationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => "firstName",
            Self::EmptyLastName => "lastName",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPhone => "phone",
            Self::MissingIdentityType | Self::InvalidIdentityType => "identityType",
            Self::EmptyIdentityNumber => "identityNumber",
            Self::EmptyPassword => "password",
            Self::PasswordMismatch => "passwordConfirmation",
            Self::MissingDocument { kind }
            | Self::TooManyFiles { kind }
            | Self::EmptyFileName { kind }
            | Self::EmptyFile { kind }
            | Self::UnsupportedContentType { kind } => kind.field_name(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => "empty_first_name",
            Self::EmptyLastName => "empty_last_name",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPhone => "empty_phone",
            Self::MissingIdentityType => "missing_identity_type",
            Self::InvalidIdentityType => "invalid_identity_type",
            Self::EmptyIdentityNumber => "empty_identity_number",
            Self::EmptyPassword => "empty_password",
            Self::PasswordMismatch => "password_mismatch",
            Self::MissingDocument { .. } => "missing_document",
            Self::TooManyFiles { .. } => "too_many_files",
            Self::EmptyFileName { .. } => "empty_file_name",
            Self::EmptyFile { .. } => "empty_file",
            Self::UnsupportedContentType { .. } => "unsupported_content_type",
        }
    }
}

/// Raw application as submitted, before validation.
#[derive(Debug, Clone, Default)]
pub struct DriverApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub identity_type: String,
    pub identity_number: String,
    pub password: Zeroizing<String>,
    pub password_confirmation: Zeroizing<String>,
    pub documents: BTreeMap<DocumentKind, Vec<UploadedFile>>,
}

/// Validated driver application.
///
/// ## Invariants
/// - Text fields are trimmed and non-empty; the password matches its
///   confirmation.
/// - Every required document slot holds at least one accepted file and the
///   photo slot holds exactly one.
#[derive(Debug, Clone)]
pub struct DriverApplicationForm {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    identity_type: IdentityType,
    identity_number: String,
    password: Zeroizing<String>,
    documents: BTreeMap<DocumentKind, Vec<UploadedFile>>,
}

impl DriverApplicationDraft {
    /// Validate the draft in on-screen order and stop at the first failure.
    pub fn validate(self) -> Result<DriverApplicationForm, DriverApplicationError> {
        use DriverApplicationError as E;

        let first_name = required(&self.first_name).ok_or(E::EmptyFirstName)?;
        let last_name = required(&self.last_name).ok_or(E::EmptyLastName)?;
        let email = required(&self.email).ok_or(E::EmptyEmail)?;
        if !looks_like_email(email) {
            return Err(E::InvalidEmail);
        }
        let phone = required(&self.phone).ok_or(E::EmptyPhone)?;
        let identity_type = required(&self.identity_type)
            .ok_or(E::MissingIdentityType)?
            .parse::<IdentityType>()
            .map_err(|_| E::InvalidIdentityType)?;
        let identity_number = required(&self.identity_number).ok_or(E::EmptyIdentityNumber)?;
        if self.password.is_empty() {
            return Err(E::EmptyPassword);
        }
        if *self.password != *self.password_confirmation {
            return Err(E::PasswordMismatch);
        }

        for kind in DocumentKind::ALL {
            validate_slot(kind, self.documents.get(&kind).map(Vec::as_slice).unwrap_or_default())?;
        }

        Ok(DriverApplicationForm {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            identity_type,
            identity_number: identity_number.to_owned(),
            password: self.password,
            documents: self
                .documents
                .into_iter()
                .filter(|(_, files)| !files.is_empty())
                .collect(),
        })
    }
}

fn validate_slot(kind: DocumentKind, files: &[UploadedFile]) -> Result<(), DriverApplicationError> {
    use DriverApplicationError as E;

    if files.is_empty() {
        return if kind.is_required() {
            Err(E::MissingDocument { kind })
        } else {
            Ok(())
        };
    }
    if !kind.accepts_multiple() && files.len() > 1 {
        return Err(E::TooManyFiles { kind });
    }
    for file in files {
        if file.file_name.trim().is_empty() {
            return Err(E::EmptyFileName { kind });
        }
        if file.bytes.is_empty() {
            return Err(E::EmptyFile { kind });
        }
        if !file.has_accepted_content_type() {
            return Err(E::UnsupportedContentType { kind });
        }
    }
    Ok(())
}

impl DriverApplicationForm {
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Display name recorded on the applicant's account.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    pub fn identity_type(&self) -> IdentityType {
        self.identity_type
    }

    pub fn identity_number(&self) -> &str {
        self.identity_number.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Files attached to `kind`, empty for an omitted optional slot.
    #[cfg(test)]
    pub(crate) fn files(&self, kind: DocumentKind) -> &[UploadedFile] {
        self.documents.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every attached file with its slot and zero-based index, in upload
    /// order: the photo first, then each document slot in declaration order.
    pub fn uploads(&self) -> impl Iterator<Item = (DocumentKind, usize, &UploadedFile)> + '_ {
        self.documents.iter().flat_map(|(kind, files)| {
            files
                .iter()
                .enumerate()
                .map(move |(index, file)| (*kind, index, file))
        })
    }

    /// Number of files the application carries.
    pub fn upload_count(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }
}
