//! Driving port for the admin review of driver applications.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Caller, DashboardStats, DriverApplication, Error, ReviewDecision};

/// Domain use-case port for admins.
///
/// Every operation fails with `forbidden` unless the caller's profile holds
/// the admin role.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverReview: Send + Sync {
    /// All applications, newest first.
    async fn list_applications(&self, caller: &Caller) -> Result<Vec<DriverApplication>, Error>;

    /// Approve or reject a pending application.
    async fn review(
        &self,
        caller: &Caller,
        application_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<DriverApplication, Error>;

    /// Fleet summary for the dashboard cards.
    async fn stats(&self, caller: &Caller) -> Result<DashboardStats, Error>;
}
