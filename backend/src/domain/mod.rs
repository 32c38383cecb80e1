//! Domain primitives, use-case services and ports.
//!
//! Purpose: define strongly typed portal entities and the rules the portal
//! enforces before anything reaches the backend platform. Keep types
//! transport agnostic; inbound and outbound adapters translate at the edges.
//!
//! Public surface:
//! - Error / ErrorCode: error payload shared by every operation.
//! - Language / Catalogue: bilingual copy with direction handling.
//! - Form types (SignInCredentials, DriverApplicationDraft, BookingRequest,
//!   Feedback) that reject empty submissions.
//! - Services implementing the driving ports in [`ports`].

mod account_service;
mod auth;
mod driver_registration_service;
mod driver_review_service;
mod drivers;
pub mod error;
mod feedback;
pub(crate) mod form;
mod localization;
mod passenger_service;
pub mod ports;
mod ride;
mod site;
mod submission_guard;
mod trace_id;
mod user;

pub use self::account_service::AccountAccessService;
pub use self::auth::{AuthFormError, SignInCredentials, SignUpRequest};
pub use self::driver_registration_service::DriverRegistrationService;
pub use self::driver_review_service::DriverReviewService;
pub use self::drivers::{
    file_extension, storage_path, AlreadyReviewed, ApplicationStatus, DashboardStats,
    DocumentKind, DriverApplication, DriverApplicationDraft, DriverApplicationError,
    DriverApplicationForm, DriverMetrics, IdentityType, NewDriverApplication,
    ParseDocumentKindError, ParseIdentityTypeError, ReviewDecision, StorageBucket,
    StoredDocument, UploadedFile,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::feedback::{Feedback, FeedbackError, Rating};
pub use self::form::FieldViolation;
pub use self::localization::{
    Catalogue, CatalogueError, Language, TextDirection, UnsupportedLanguage,
};
pub use self::passenger_service::PassengerDashboardService;
pub use self::ride::{
    estimate_fare, BookingError, BookingRequest, Coordinates, NewRide, Ride, RideStatus,
    VehicleType, MAX_ESTIMATED_FARE, MIN_ESTIMATED_FARE, PLACEHOLDER_DESTINATION,
    PLACEHOLDER_PICKUP, RECENT_RIDES_LIMIT,
};
pub use self::site::{
    auth_page, home_page, AuthMode, AuthPage, ChoiceOption, DriverFormModel, FormField,
    HomePage, InputKind, Section, SectionId, SignupRole, REFERRAL_CODE,
};
pub use self::submission_guard::{FormKind, SubmissionGuard, SubmissionInFlight, SubmissionPermit};
pub use self::trace_id::TraceId;
pub use self::user::{
    AccessToken, AuthSession, Caller, UserId, UserProfile, UserRole, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use smartline::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
