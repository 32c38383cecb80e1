//! Driver application records and their review lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::documents::StoredDocument;
use super::form::{DriverApplicationForm, IdentityType};
use crate::domain::UserId;

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted and awaiting review.
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Apply an admin decision.
    ///
    /// Only pending applications can be decided; a decided application keeps
    /// its status.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::{ApplicationStatus, ReviewDecision};
    ///
    /// assert_eq!(
    ///     ApplicationStatus::Pending.review(ReviewDecision::Approved),
    ///     Ok(ApplicationStatus::Approved),
    /// );
    /// assert!(ApplicationStatus::Rejected.review(ReviewDecision::Approved).is_err());
    /// ```
    pub fn review(self, decision: ReviewDecision) -> Result<Self, AlreadyReviewed> {
        match self {
            Self::Pending => Ok(decision.into()),
            decided => Err(AlreadyReviewed { current: decided }),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome an admin can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ApplicationStatus {
    fn from(value: ReviewDecision) -> Self {
        match value {
            ReviewDecision::Approved => Self::Approved,
            ReviewDecision::Rejected => Self::Rejected,
        }
    }
}

/// Error returned when reviewing an application that is no longer pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyReviewed {
    pub current: ApplicationStatus,
}

impl fmt::Display for AlreadyReviewed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "application was already {}", self.current)
    }
}

impl std::error::Error for AlreadyReviewed {}

/// Application row as listed in the admin view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverApplication {
    pub id: Uuid,
    #[schema(value_type = Option<String>)]
    pub user_id: Option<UserId>,
    #[schema(example = "Ahmed")]
    pub first_name: String,
    #[schema(example = "Al-Rashid")]
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub identity_type: Option<IdentityType>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    #[schema(example = 1250.5)]
    pub earnings: f64,
    pub total_trips: u32,
    #[schema(example = 4.7)]
    pub rating: f64,
    pub driver_photo_url: Option<String>,
    #[serde(default)]
    pub documents: Vec<StoredDocument>,
}

/// Application row ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDriverApplication {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub identity_type: IdentityType,
    pub identity_number: String,
    pub status: ApplicationStatus,
    pub driver_photo_url: Option<String>,
    pub documents: Vec<StoredDocument>,
}

impl NewDriverApplication {
    /// Pending row for `form`, carrying the URLs of the files that reached
    /// storage.
    pub fn pending(
        form: &DriverApplicationForm,
        user_id: UserId,
        driver_photo_url: Option<String>,
        documents: Vec<StoredDocument>,
    ) -> Self {
        Self {
            user_id,
            first_name: form.first_name().to_owned(),
            last_name: form.last_name().to_owned(),
            email: form.email().to_owned(),
            phone: form.phone().to_owned(),
            identity_type: form.identity_type(),
            identity_number: form.identity_number().to_owned(),
            status: ApplicationStatus::Pending,
            driver_photo_url,
            documents,
        }
    }
}
