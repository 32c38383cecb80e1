//! Driver onboarding: the application form, its documents and the admin
//! review that follows.
//!
//! Prospective drivers submit personal details plus a set of document
//! slots. Files are stored in object storage under the applicant's user id
//! and the application row records the public URLs of whatever reached
//! storage. Admins later approve or reject pending applications.

mod application;
mod documents;
mod form;
mod stats;

pub use application::{
    AlreadyReviewed, ApplicationStatus, DriverApplication, NewDriverApplication, ReviewDecision,
};
pub use documents::{
    file_extension, storage_path, DocumentKind, ParseDocumentKindError, StorageBucket,
    StoredDocument, UploadedFile,
};
pub use form::{
    DriverApplicationDraft, DriverApplicationError, DriverApplicationForm, IdentityType,
    ParseIdentityTypeError,
};
pub use stats::{DashboardStats, DriverMetrics};
