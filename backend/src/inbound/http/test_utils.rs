//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

/// Cookie session middleware with a fresh key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie a response set.
///
/// # Panics
///
/// Panics when the response did not set the cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// HTTP state wired to real services over the in-memory fixture adapters.
pub fn fixture_http_state() -> crate::inbound::http::state::HttpState {
    use std::sync::Arc;

    use crate::domain::ports::{
        FixtureAuthGateway, FixtureDocumentStorage, FixtureDriverApplicationRepository,
        FixtureProfileRepository, FixtureRideRepository,
    };
    use crate::domain::{
        AccountAccessService, Catalogue, DriverRegistrationService, DriverReviewService,
        PassengerDashboardService,
    };
    use crate::inbound::http::state::{HttpState, HttpStatePorts};

    let profiles = Arc::new(FixtureProfileRepository);
    let applications = Arc::new(FixtureDriverApplicationRepository);
    let ports = HttpStatePorts {
        accounts: Arc::new(AccountAccessService::new(Arc::new(FixtureAuthGateway))),
        dashboard: Arc::new(PassengerDashboardService::new(
            profiles.clone(),
            Arc::new(FixtureRideRepository),
        )),
        registration: Arc::new(DriverRegistrationService::new(
            Arc::new(FixtureAuthGateway),
            Arc::new(FixtureDocumentStorage::default()),
            applications.clone(),
        )),
        review: Arc::new(DriverReviewService::new(profiles, applications)),
    };
    HttpState::new(ports, Arc::new(Catalogue::bundled().expect("bundled catalogue")))
}
