//! Admin review service for driver applications.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::driver_registration_service::map_application_error;
use crate::domain::ports::{DriverApplicationRepository, DriverReview, ProfileRepository};
use crate::domain::{
    AlreadyReviewed, ApplicationStatus, Caller, DashboardStats, DriverApplication, Error,
    ReviewDecision,
};

/// Review service over profiles (for the role check) and applications.
pub struct DriverReviewService<P: ?Sized, R: ?Sized> {
    profiles: Arc<P>,
    applications: Arc<R>,
}

impl<P: ?Sized, R: ?Sized> DriverReviewService<P, R> {
    pub fn new(profiles: Arc<P>, applications: Arc<R>) -> Self {
        Self {
            profiles,
            applications,
        }
    }
}

impl<P, R> DriverReviewService<P, R>
where
    P: ProfileRepository + ?Sized,
    R: DriverApplicationRepository + ?Sized,
{
    async fn require_admin(&self, caller: &Caller) -> Result<(), Error> {
        let profile = self
            .profiles
            .find_profile(caller)
            .await
            .map_err(|err| Error::service_unavailable(format!("profile lookup failed: {err}")))?;
        match profile {
            Some(profile) if profile.is_admin() => Ok(()),
            _ => Err(Error::forbidden("admin role required")),
        }
    }

    async fn find_existing(
        &self,
        caller: &Caller,
        application_id: Uuid,
    ) -> Result<DriverApplication, Error> {
        self.applications
            .find_application(caller, application_id)
            .await
            .map_err(map_application_error)?
            .ok_or_else(|| Error::not_found(format!("application {application_id} not found")))
    }
}

fn already_reviewed(err: AlreadyReviewed) -> Error {
    Error::conflict(err.to_string()).with_details(json!({
        "code": "already_reviewed",
        "status": err.current,
    }))
}

#[async_trait]
impl<P, R> DriverReview for DriverReviewService<P, R>
where
    P: ProfileRepository + ?Sized,
    R: DriverApplicationRepository + ?Sized,
{
    async fn list_applications(&self, caller: &Caller) -> Result<Vec<DriverApplication>, Error> {
        self.require_admin(caller).await?;
        let mut applications = self
            .applications
            .list_applications(caller)
            .await
            .map_err(map_application_error)?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    async fn review(
        &self,
        caller: &Caller,
        application_id: Uuid,
        decision: ReviewDecision,
    ) -> Result<DriverApplication, Error> {
        self.require_admin(caller).await?;
        let current = self.find_existing(caller, application_id).await?;
        let next = current.status.review(decision).map_err(already_reviewed)?;
        let updated = match self
            .applications
            .update_status(caller, application_id, current.status, next)
            .await
            .map_err(map_application_error)?
        {
            Some(updated) => updated,
            None => {
                // Another review landed between the read and the update.
                let latest = self.find_existing(caller, application_id).await?;
                return Err(already_reviewed(AlreadyReviewed {
                    current: latest.status,
                }));
            }
        };
        info!(
            admin_id = %caller.user_id,
            %application_id,
            status = %updated.status,
            "driver application reviewed"
        );
        Ok(updated)
    }

    async fn stats(&self, caller: &Caller) -> Result<DashboardStats, Error> {
        self.require_admin(caller).await?;
        let approved = self
            .applications
            .approved_metrics(caller)
            .await
            .map_err(map_application_error)?;
        let pending = self
            .applications
            .count_with_status(caller, ApplicationStatus::Pending)
            .await
            .map_err(map_application_error)?;
        Ok(DashboardStats::summarise(&approved, pending))
    }
}
