//! Driven port for the `driver_applications` table.
//!
//! Inserts run on behalf of the applicant (or anonymously when the platform
//! withheld a token pending email confirmation); reads and updates run on
//! behalf of an admin caller.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{
    AccessToken, ApplicationStatus, Caller, DriverApplication, DriverMetrics, IdentityType,
    NewDriverApplication,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading or writing driver applications.
    pub enum DriverApplicationRepositoryError {
        /// The platform could not be reached.
        Connection { message: String } =>
            "driver application repository connection failed: {message}",
        /// The platform rejected the caller's token.
        Unauthorized { message: String } =>
            "driver application repository unauthorised: {message}",
        /// The query, insert or update failed.
        Query { message: String } =>
            "driver application repository query failed: {message}",
    }
}

/// Port for storing and reviewing driver applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverApplicationRepository: Send + Sync {
    /// Insert a new application row.
    async fn insert_application(
        &self,
        access_token: Option<AccessToken>,
        application: &NewDriverApplication,
    ) -> Result<DriverApplication, DriverApplicationRepositoryError>;

    /// Every application, newest first.
    async fn list_applications(
        &self,
        caller: &Caller,
    ) -> Result<Vec<DriverApplication>, DriverApplicationRepositoryError>;

    /// One application by id.
    async fn find_application(
        &self,
        caller: &Caller,
        id: Uuid,
    ) -> Result<Option<DriverApplication>, DriverApplicationRepositoryError>;

    /// Move an application from `from` to `to` and return the updated row.
    ///
    /// The status check and the write happen in one platform call. `None`
    /// means no row with `id` was in `from` when the update ran.
    async fn update_status(
        &self,
        caller: &Caller,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<DriverApplication>, DriverApplicationRepositoryError>;

    /// Number of applications in `status`.
    async fn count_with_status(
        &self,
        caller: &Caller,
        status: ApplicationStatus,
    ) -> Result<u64, DriverApplicationRepositoryError>;

    /// Rating and earnings of every approved driver.
    async fn approved_metrics(
        &self,
        caller: &Caller,
    ) -> Result<Vec<DriverMetrics>, DriverApplicationRepositoryError>;
}

/// Id of the fixture application awaiting review.
pub const FIXTURE_PENDING_APPLICATION_ID: Uuid = Uuid::from_u128(0xA11CE);
/// Id of the fixture application already approved.
pub const FIXTURE_APPROVED_APPLICATION_ID: Uuid = Uuid::from_u128(0xB0B);

/// Fixture applications: one pending, one approved.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDriverApplicationRepository;

fn fixture_applications() -> Vec<DriverApplication> {
    let now = Utc::now();
    vec![
        DriverApplication {
            id: FIXTURE_PENDING_APPLICATION_ID,
            user_id: None,
            first_name: "Omar".to_owned(),
            last_name: "Haddad".to_owned(),
            email: "omar@example.com".to_owned(),
            phone: "+966500000001".to_owned(),
            identity_type: Some(IdentityType::NationalId),
            status: ApplicationStatus::Pending,
            created_at: now - Duration::hours(1),
            earnings: 0.0,
            total_trips: 0,
            rating: 0.0,
            driver_photo_url: None,
            documents: Vec::new(),
        },
        DriverApplication {
            id: FIXTURE_APPROVED_APPLICATION_ID,
            user_id: None,
            first_name: "Layla".to_owned(),
            last_name: "Nasser".to_owned(),
            email: "layla@example.com".to_owned(),
            phone: "+966500000002".to_owned(),
            identity_type: Some(IdentityType::Passport),
            status: ApplicationStatus::Approved,
            created_at: now - Duration::days(30),
            earnings: 1250.5,
            total_trips: 96,
            rating: 4.7,
            driver_photo_url: None,
            documents: Vec::new(),
        },
    ]
}

#[async_trait]
impl DriverApplicationRepository for FixtureDriverApplicationRepository {
    async fn insert_application(
        &self,
        _access_token: Option<AccessToken>,
        application: &NewDriverApplication,
    ) -> Result<DriverApplication, DriverApplicationRepositoryError> {
        Ok(DriverApplication {
            id: Uuid::new_v4(),
            user_id: Some(application.user_id),
            first_name: application.first_name.clone(),
            last_name: application.last_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            identity_type: Some(application.identity_type),
            status: application.status,
            created_at: Utc::now(),
            earnings: 0.0,
            total_trips: 0,
            rating: 0.0,
            driver_photo_url: application.driver_photo_url.clone(),
            documents: application.documents.clone(),
        })
    }

    async fn list_applications(
        &self,
        _caller: &Caller,
    ) -> Result<Vec<DriverApplication>, DriverApplicationRepositoryError> {
        Ok(fixture_applications())
    }

    async fn find_application(
        &self,
        _caller: &Caller,
        id: Uuid,
    ) -> Result<Option<DriverApplication>, DriverApplicationRepositoryError> {
        Ok(fixture_applications().into_iter().find(|app| app.id == id))
    }

    async fn update_status(
        &self,
        _caller: &Caller,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<DriverApplication>, DriverApplicationRepositoryError> {
        Ok(fixture_applications()
            .into_iter()
            .find(|app| app.id == id && app.status == from)
            .map(|app| DriverApplication { status: to, ..app }))
    }

    async fn count_with_status(
        &self,
        _caller: &Caller,
        status: ApplicationStatus,
    ) -> Result<u64, DriverApplicationRepositoryError> {
        Ok(fixture_applications()
            .iter()
            .filter(|app| app.status == status)
            .count() as u64)
    }

    async fn approved_metrics(
        &self,
        _caller: &Caller,
    ) -> Result<Vec<DriverMetrics>, DriverApplicationRepositoryError> {
        Ok(fixture_applications()
            .into_iter()
            .filter(|app| app.status == ApplicationStatus::Approved)
            .map(|app| DriverMetrics {
                rating: Some(app.rating),
                earnings: Some(app.earnings),
            })
            .collect())
    }
}
