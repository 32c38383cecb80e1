//! Portal server harness for behaviour tests.
//!
//! Owns a single-threaded Tokio runtime plus a `LocalSet` because Actix
//! uses `spawn_local` internally. The server runs on fixture adapters and is
//! stopped when the world is dropped.

use std::cell::RefCell;
use std::net::TcpListener;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use smartline::Trace;
use smartline::domain::ports::{
    FixtureAuthGateway, FixtureDocumentStorage, FixtureDriverApplicationRepository,
    FixtureProfileRepository, FixtureRideRepository,
};
use smartline::domain::{
    AccountAccessService, Catalogue, DriverRegistrationService, DriverReviewService,
    PassengerDashboardService,
};
use smartline::inbound::http::admin::{list_applications, review_application, stats};
use smartline::inbound::http::auth::{sign_in, sign_out, sign_up};
use smartline::inbound::http::dashboard::{book_ride, current_profile, recent_rides};
use smartline::inbound::http::drivers::submit_application;
use smartline::inbound::http::error::json_config;
use smartline::inbound::http::feedback::submit_feedback;
use smartline::inbound::http::i18n::{get_catalogue, get_language, set_language, toggle_language};
use smartline::inbound::http::pages::{get_auth_page, get_home_page};
use smartline::inbound::http::state::{HttpState, HttpStatePorts};

/// Last response seen by a scenario.
#[derive(Debug, Default)]
pub struct LastResponse {
    pub status: u16,
    pub body: Value,
}

pub struct PortalWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    cookie: RefCell<Option<String>>,
    last: RefCell<Option<LastResponse>>,
}

fn fixture_state() -> HttpState {
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

async fn spawn_portal() -> (String, ServerHandle) {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind portal");
    let addr = listener.local_addr().expect("portal addr");
    let state = web::Data::new(fixture_state());

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        let api = web::scope("/api/v1")
            .wrap(session)
            .app_data(json_config())
            .service(get_catalogue)
            .service(get_language)
            .service(set_language)
            .service(toggle_language)
            .service(get_home_page)
            .service(get_auth_page)
            .service(sign_in)
            .service(sign_up)
            .service(sign_out)
            .service(current_profile)
            .service(recent_rides)
            .service(book_ride)
            .service(submit_application)
            .service(list_applications)
            .service(review_application)
            .service(stats)
            .service(submit_feedback);
        App::new().app_data(state.clone()).wrap(Trace).service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{addr}"), handle)
}

impl PortalWorld {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let (base_url, server) = local.block_on(&runtime, spawn_portal());
        Self {
            runtime,
            local,
            base_url,
            server,
            cookie: RefCell::new(None),
            last: RefCell::new(None),
        }
    }

    /// Send a request carrying the session cookie and remember the response
    /// and any refreshed cookie.
    pub fn request(&self, method: Method, path: &str, payload: Option<Value>) {
        let url = format!("{}{path}", self.base_url);
        let cookie = self.cookie.borrow().clone();
        let (status, set_cookie, body) = self.local.block_on(&self.runtime, async move {
            let mut request = Client::default().request(method, url);
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await.expect("request"),
                None => request.send().await.expect("request"),
            };
            let set_cookie = response
                .headers()
                .get(header::SET_COOKIE)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(';').next())
                .map(str::to_owned);
            let bytes = response.body().await.expect("body");
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (response.status().as_u16(), set_cookie, body)
        });
        if let Some(cookie) = set_cookie {
            *self.cookie.borrow_mut() = Some(cookie);
        }
        *self.last.borrow_mut() = Some(LastResponse { status, body });
    }

    pub fn with_last<R>(&self, f: impl FnOnce(&LastResponse) -> R) -> R {
        f(self.last.borrow().as_ref().expect("a request was sent"))
    }
}

impl Drop for PortalWorld {
    fn drop(&mut self) {
        let server = self.server.clone();
        self.local.block_on(&self.runtime, async move {
            server.stop(true).await;
        });
    }
}
