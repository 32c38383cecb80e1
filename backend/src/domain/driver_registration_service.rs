//! Driver onboarding service.
//!
//! Submission runs in a fixed order: create the applicant's account, upload
//! the photo, upload every document slot in declaration order, then record
//! the application. Uploads are awaited one at a time. A failed upload is
//! logged and leaves its URL out of the application; the remaining uploads
//! still run and nothing already stored is removed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::account_service::map_auth_error;
use crate::domain::ports::{
    AuthGateway, DocumentStorage, DriverApplicationRepository, DriverApplicationRepositoryError,
    DriverRegistration, FailedUpload, RegistrationReceipt, UploadedDocument,
};
use crate::domain::{
    storage_path, DocumentKind, DriverApplicationForm, Error, NewDriverApplication,
    SignUpRequest, StoredDocument,
};

pub(crate) fn map_application_error(error: DriverApplicationRepositoryError) -> Error {
    match error {
        DriverApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application store unavailable: {message}"))
        }
        DriverApplicationRepositoryError::Unauthorized { message } => {
            Error::unauthorized(format!("session rejected: {message}"))
        }
        DriverApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application store error: {message}"))
        }
    }
}

/// Driver registration over auth, storage and the application table.
pub struct DriverRegistrationService<A: ?Sized, S: ?Sized, R: ?Sized> {
    auth: Arc<A>,
    storage: Arc<S>,
    applications: Arc<R>,
}

impl<A: ?Sized, S: ?Sized, R: ?Sized> DriverRegistrationService<A, S, R> {
    pub fn new(auth: Arc<A>, storage: Arc<S>, applications: Arc<R>) -> Self {
        Self {
            auth,
            storage,
            applications,
        }
    }
}

#[async_trait]
impl<A, S, R> DriverRegistration for DriverRegistrationService<A, S, R>
where
    A: AuthGateway + ?Sized,
    S: DocumentStorage + ?Sized,
    R: DriverApplicationRepository + ?Sized,
{
    async fn register(&self, form: DriverApplicationForm) -> Result<RegistrationReceipt, Error> {
        let sign_up = SignUpRequest::try_from_parts(&form.full_name(), form.email(), form.password())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let session = self.auth.sign_up(&sign_up).await.map_err(|err| {
            warn!(error = %err, "driver sign-up failed");
            map_auth_error(err)
        })?;
        let user_id = session.user_id;
        let token = session.access_token.clone();

        let total = form.upload_count();
        info!(%user_id, files = total, "uploading driver documents");
        let mut driver_photo_url = None;
        let mut documents = Vec::with_capacity(total);
        let mut uploaded = Vec::with_capacity(total);
        let mut failed = Vec::new();

        for (kind, index, file) in form.uploads() {
            let bucket = kind.bucket();
            let path = storage_path(user_id, kind, index, &file.file_name);
            match self.storage.upload(token.clone(), bucket, &path, file).await {
                Ok(()) => {
                    let url = self.storage.public_url(bucket, &path);
                    if kind == DocumentKind::DriverPhoto {
                        driver_photo_url = Some(url.clone());
                    } else {
                        documents.push(StoredDocument {
                            kind,
                            url: url.clone(),
                        });
                    }
                    uploaded.push(UploadedDocument { kind, index, url });
                }
                Err(err) => {
                    warn!(
                        %user_id,
                        document = %kind,
                        index,
                        %bucket,
                        path = %path,
                        error = %err,
                        "driver document upload failed"
                    );
                    failed.push(FailedUpload {
                        kind,
                        index,
                        file_name: file.file_name.clone(),
                    });
                }
            }
        }

        let row = NewDriverApplication::pending(&form, user_id, driver_photo_url, documents);
        let application = self
            .applications
            .insert_application(token, &row)
            .await
            .map_err(map_application_error)?;

        info!(
            %user_id,
            application_id = %application.id,
            uploaded = uploaded.len(),
            failed = failed.len(),
            "driver application submitted"
        );

        Ok(RegistrationReceipt {
            application_id: application.id,
            session,
            uploaded,
            failed,
        })
    }
}

#[cfg(test)]
#[path = "driver_registration_service_tests.rs"]
mod tests;
