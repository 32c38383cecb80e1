//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use smartline::domain::ports::{
    AuthGateway, DocumentStorage, DriverApplicationRepository, FixtureAuthGateway,
    FixtureDocumentStorage, FixtureDriverApplicationRepository, FixtureProfileRepository,
    FixtureRideRepository, ProfileRepository, RideRepository,
};
use smartline::domain::{
    AccountAccessService, Catalogue, DriverRegistrationService, DriverReviewService,
    PassengerDashboardService,
};
use smartline::inbound::http::state::{HttpState, HttpStatePorts};
use smartline::outbound::supabase::{
    SupabaseAuthGateway, SupabaseClient, SupabaseDocumentStorage,
    SupabaseDriverApplicationRepository, SupabaseProfileRepository, SupabaseRideRepository,
};

use super::ServerConfig;

/// Driven adapters shared by the domain services.
struct Adapters {
    auth: Arc<dyn AuthGateway>,
    storage: Arc<dyn DocumentStorage>,
    profiles: Arc<dyn ProfileRepository>,
    rides: Arc<dyn RideRepository>,
    applications: Arc<dyn DriverApplicationRepository>,
}

impl Adapters {
    fn fixtures(bind_addr: std::net::SocketAddr) -> Self {
        Self {
            auth: Arc::new(FixtureAuthGateway),
            storage: Arc::new(FixtureDocumentStorage::new(format!("http://{bind_addr}"))),
            profiles: Arc::new(FixtureProfileRepository),
            rides: Arc::new(FixtureRideRepository),
            applications: Arc::new(FixtureDriverApplicationRepository),
        }
    }

    fn supabase(client: &SupabaseClient) -> Self {
        Self {
            auth: Arc::new(SupabaseAuthGateway::new(client.clone())),
            storage: Arc::new(SupabaseDocumentStorage::new(client.clone())),
            profiles: Arc::new(SupabaseProfileRepository::new(client.clone())),
            rides: Arc::new(SupabaseRideRepository::new(client.clone())),
            applications: Arc::new(SupabaseDriverApplicationRepository::new(client.clone())),
        }
    }
}

/// Build the HTTP state, using the platform when configured and the
/// in-memory fixtures otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the platform client or the bundled
/// catalogues cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let adapters = match &config.supabase {
        Some(supabase) => {
            info!(url = %supabase.url, "using platform adapters");
            let client = SupabaseClient::new(supabase.clone()).map_err(std::io::Error::other)?;
            Adapters::supabase(&client)
        }
        None => {
            info!("no platform configured; using fixture adapters");
            Adapters::fixtures(config.bind_addr)
        }
    };
    let catalogue = Catalogue::bundled().map_err(std::io::Error::other)?;
    let untranslated = catalogue.untranslated_keys();
    if !untranslated.is_empty() {
        warn!(keys = ?untranslated, "arabic catalogue is missing translations");
    }

    let Adapters {
        auth,
        storage,
        profiles,
        rides,
        applications,
    } = adapters;
    let ports = HttpStatePorts {
        accounts: Arc::new(AccountAccessService::new(auth.clone())),
        dashboard: Arc::new(PassengerDashboardService::new(profiles.clone(), rides)),
        registration: Arc::new(DriverRegistrationService::new(
            auth,
            storage,
            applications.clone(),
        )),
        review: Arc::new(DriverReviewService::new(profiles, applications)),
    };
    Ok(web::Data::new(HttpState::new(ports, Arc::new(catalogue))))
}
