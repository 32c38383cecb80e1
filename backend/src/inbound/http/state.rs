//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they stay testable without a platform.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{AccountAccess, DriverRegistration, DriverReview, PassengerDashboard};
use crate::domain::{Catalogue, Error, FormKind, SubmissionGuard, SubmissionPermit};

use super::session::SessionContext;

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountAccess>,
    pub dashboard: Arc<dyn PassengerDashboard>,
    pub registration: Arc<dyn DriverRegistration>,
    pub review: Arc<dyn DriverReview>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountAccess>,
    pub dashboard: Arc<dyn PassengerDashboard>,
    pub registration: Arc<dyn DriverRegistration>,
    pub review: Arc<dyn DriverReview>,
    pub catalogue: Arc<Catalogue>,
    pub submissions: SubmissionGuard,
}

impl HttpState {
    /// Construct state from the ports and the loaded catalogue.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use smartline::domain::ports::{
    ///     FixtureAuthGateway, FixtureDocumentStorage, FixtureDriverApplicationRepository,
    ///     FixtureProfileRepository, FixtureRideRepository,
    /// };
    /// use smartline::domain::{
    ///     AccountAccessService, Catalogue, DriverRegistrationService, DriverReviewService,
    ///     PassengerDashboardService,
    /// };
    /// use smartline::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let profiles = Arc::new(FixtureProfileRepository);
    /// let applications = Arc::new(FixtureDriverApplicationRepository);
    /// let ports = HttpStatePorts {
    ///     accounts: Arc::new(AccountAccessService::new(Arc::new(FixtureAuthGateway))),
    ///     dashboard: Arc::new(PassengerDashboardService::new(
    ///         profiles.clone(),
    ///         Arc::new(FixtureRideRepository),
    ///     )),
    ///     registration: Arc::new(DriverRegistrationService::new(
    ///         Arc::new(FixtureAuthGateway),
    ///         Arc::new(FixtureDocumentStorage::default()),
    ///         applications.clone(),
    ///     )),
    ///     review: Arc::new(DriverReviewService::new(profiles, applications)),
    /// };
    /// let state = HttpState::new(ports, Arc::new(Catalogue::bundled().unwrap()));
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, catalogue: Arc<Catalogue>) -> Self {
        let HttpStatePorts {
            accounts,
            dashboard,
            registration,
            review,
        } = ports;
        Self {
            accounts,
            dashboard,
            registration,
            review,
            catalogue,
            submissions: SubmissionGuard::new(),
        }
    }

    /// Claim the single in-flight slot for this browser's `form`.
    ///
    /// A second submission while the first is pending is rejected with
    /// `409 Conflict`.
    pub fn begin_submission(
        &self,
        session: &SessionContext,
        form: FormKind,
    ) -> Result<SubmissionPermit, Error> {
        let submitter: Uuid = session.submitter_id()?;
        self.submissions
            .try_acquire(submitter, form)
            .map_err(|err| {
                Error::conflict(err.to_string()).with_details(serde_json::json!({
                    "form": err.form.as_str(),
                    "code": "submission_in_flight",
                }))
            })
    }
}
