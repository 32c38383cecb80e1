//! OpenAPI documentation for the portal API.
//!
//! Served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump` for the frontend's client generator.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{FailedUpload, UploadedDocument};
use crate::domain::{
    AuthPage, DashboardStats, DriverApplication, Error, ErrorCode, HomePage, Language, Ride,
    TextDirection, UserProfile,
};
use crate::inbound::http::admin::ReviewPayload;
use crate::inbound::http::auth::{AuthResponse, SignInPayload, SignUpPayload};
use crate::inbound::http::dashboard::BookRidePayload;
use crate::inbound::http::drivers::{
    DocumentFilePayload, DriverApplicationPayload, DriverApplicationResponse,
};
use crate::inbound::http::feedback::{FeedbackAcknowledgement, FeedbackPayload};
use crate::inbound::http::i18n::{CatalogueResponse, LanguageRequest, LanguageResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/sign-in or sign-up.",
            ))),
        );
    }
}

/// OpenAPI document for the portal API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SmartLine portal API",
        description = "Bilingual ride-hailing portal: pages, accounts, bookings, driver onboarding and admin review."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::i18n::get_catalogue,
        crate::inbound::http::i18n::get_language,
        crate::inbound::http::i18n::set_language,
        crate::inbound::http::i18n::toggle_language,
        crate::inbound::http::pages::get_home_page,
        crate::inbound::http::pages::get_auth_page,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::dashboard::current_profile,
        crate::inbound::http::dashboard::recent_rides,
        crate::inbound::http::dashboard::book_ride,
        crate::inbound::http::drivers::submit_application,
        crate::inbound::http::admin::list_applications,
        crate::inbound::http::admin::review_application,
        crate::inbound::http::admin::stats,
        crate::inbound::http::feedback::submit_feedback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Language,
        TextDirection,
        CatalogueResponse,
        LanguageRequest,
        LanguageResponse,
        HomePage,
        AuthPage,
        SignInPayload,
        SignUpPayload,
        AuthResponse,
        UserProfile,
        Ride,
        BookRidePayload,
        DocumentFilePayload,
        DriverApplicationPayload,
        DriverApplicationResponse,
        UploadedDocument,
        FailedUpload,
        DriverApplication,
        ReviewPayload,
        DashboardStats,
        FeedbackPayload,
        FeedbackAcknowledgement,
    )),
    tags(
        (name = "i18n", description = "Catalogues and the session language"),
        (name = "pages", description = "Localised page models"),
        (name = "auth", description = "Sign-in, sign-up and sign-out"),
        (name = "dashboard", description = "Passenger profile and rides"),
        (name = "drivers", description = "Driver onboarding"),
        (name = "admin", description = "Review of driver applications"),
        (name = "feedback", description = "Visitor feedback"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
