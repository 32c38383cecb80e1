//! Portal entry-point: loads settings, wires adapters and serves the API.

mod server;

use actix_web::{rt, web};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use smartline::inbound::http::health::HealthState;
use smartline::inbound::http::session_config::{BuildMode, session_settings_from_env};
use smartline::settings::PortalSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortalSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let supabase = settings.supabase_config().map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(session, bind_addr).with_supabase(supabase);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "portal listening");

    let handle = server.handle();
    rt::spawn(async move {
        if rt::signal::ctrl_c().await.is_ok() {
            health_state.begin_draining();
            info!("draining before shutdown");
            handle.stop(true).await;
        }
    });
    server.await
}
