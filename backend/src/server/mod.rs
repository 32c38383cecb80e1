//! HTTP server assembly: session cookies, the `/api/v1` scope and probes.

mod config;
mod state_builders;

pub use config::ServerConfig;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, Scope, web};

use smartline::Trace;
use smartline::inbound::http::admin::{list_applications, review_application, stats};
use smartline::inbound::http::auth::{sign_in, sign_out, sign_up};
use smartline::inbound::http::dashboard::{book_ride, current_profile, recent_rides};
use smartline::inbound::http::drivers::submit_application;
use smartline::inbound::http::error::json_config;
use smartline::inbound::http::feedback::submit_feedback;
use smartline::inbound::http::health::{HealthState, live, ready};
use smartline::inbound::http::i18n::{get_catalogue, get_language, set_language, toggle_language};
use smartline::inbound::http::pages::{get_auth_page, get_home_page};
use smartline::inbound::http::session_config::SessionSettings;

use state_builders::build_http_state;

const SESSION_COOKIE: &str = "session";
const SESSION_TTL_DAYS: i64 = 7;

fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_http_only(true)
        .cookie_secure(settings.cookie_secure)
        .cookie_same_site(settings.same_site)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::days(SESSION_TTL_DAYS)))
        .build()
}

/// Every portal endpoint, in the order the browser reaches them.
fn portal_api() -> Scope {
    web::scope("/api/v1")
        .app_data(json_config())
        // language and copy
        .service(get_catalogue)
        .service(get_language)
        .service(set_language)
        .service(toggle_language)
        .service(get_home_page)
        .service(get_auth_page)
        // accounts
        .service(sign_in)
        .service(sign_up)
        .service(sign_out)
        // passenger
        .service(current_profile)
        .service(recent_rides)
        .service(book_ride)
        .service(submit_feedback)
        // drivers and admins
        .service(submit_application)
        .service(list_applications)
        .service(review_application)
        .service(stats)
}

#[cfg(debug_assertions)]
fn api_docs() -> utoipa_swagger_ui::SwaggerUi {
    use utoipa::OpenApi;

    utoipa_swagger_ui::SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", smartline::ApiDoc::openapi())
}

/// Bind the portal and flip the readiness probe.
///
/// # Errors
/// Fails when the platform client cannot be built or the address is taken.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        session, bind_addr, ..
    } = config;
    let probes = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(probes.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(portal_api().wrap(session_middleware(&session)))
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app = app.service(api_docs());
        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
