//! Driving port for submitting a driver application.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AuthSession, DocumentKind, DriverApplicationForm, Error};

/// A file that reached storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub kind: DocumentKind,
    pub index: usize,
    pub url: String,
}

/// A file that failed to upload; its URL is missing from the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpload {
    pub kind: DocumentKind,
    pub index: usize,
    #[schema(example = "car_front_photo_0.jpg")]
    pub file_name: String,
}

/// Outcome of a driver application.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReceipt {
    pub application_id: Uuid,
    pub session: AuthSession,
    pub uploaded: Vec<UploadedDocument>,
    pub failed: Vec<FailedUpload>,
}

/// Domain use-case port for driver onboarding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRegistration: Send + Sync {
    /// Create the applicant's account, store their documents one after the
    /// other and record a pending application.
    ///
    /// Upload failures do not abort the submission; they are reported in the
    /// receipt.
    async fn register(&self, form: DriverApplicationForm) -> Result<RegistrationReceipt, Error>;
}
