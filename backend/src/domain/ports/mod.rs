//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_access;
mod auth_gateway;
mod document_storage;
mod driver_application_repository;
mod driver_registration;
mod driver_review;
mod passenger_dashboard;
mod profile_repository;
mod ride_repository;

#[cfg(test)]
pub use account_access::MockAccountAccess;
pub use account_access::AccountAccess;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{
    AuthGateway, AuthGatewayError, FixtureAuthGateway, FIXTURE_ADMIN_EMAIL, FIXTURE_ADMIN_ID,
    FIXTURE_PASSENGER_EMAIL, FIXTURE_PASSENGER_ID, FIXTURE_PASSWORD,
};
#[cfg(test)]
pub use document_storage::MockDocumentStorage;
pub use document_storage::{DocumentStorage, DocumentStorageError, FixtureDocumentStorage};
#[cfg(test)]
pub use driver_application_repository::MockDriverApplicationRepository;
pub use driver_application_repository::{
    DriverApplicationRepository, DriverApplicationRepositoryError,
    FixtureDriverApplicationRepository, FIXTURE_APPROVED_APPLICATION_ID,
    FIXTURE_PENDING_APPLICATION_ID,
};
#[cfg(test)]
pub use driver_registration::MockDriverRegistration;
pub use driver_registration::{
    DriverRegistration, FailedUpload, RegistrationReceipt, UploadedDocument,
};
#[cfg(test)]
pub use driver_review::MockDriverReview;
pub use driver_review::DriverReview;
#[cfg(test)]
pub use passenger_dashboard::MockPassengerDashboard;
pub use passenger_dashboard::PassengerDashboard;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{FixtureProfileRepository, ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use ride_repository::MockRideRepository;
pub use ride_repository::{FixtureRideRepository, RideRepository, RideRepositoryError};
