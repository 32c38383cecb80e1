//! Driven port for object storage of driver uploads.

use async_trait::async_trait;

use crate::domain::{AccessToken, StorageBucket, UploadedFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised while storing a file.
    pub enum DocumentStorageError {
        /// The platform could not be reached.
        Transport { message: String } => "storage unreachable: {message}",
        /// The platform refused the object.
        Rejected { message: String } => "storage rejected upload: {message}",
    }
}

/// Port for uploading files and resolving their public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store `file` at `path`, replacing any existing object.
    async fn upload(
        &self,
        access_token: Option<AccessToken>,
        bucket: StorageBucket,
        path: &str,
        file: &UploadedFile,
    ) -> Result<(), DocumentStorageError>;

    /// Public URL of the object at `path`. Computing it performs no I/O.
    fn public_url(&self, bucket: StorageBucket, path: &str) -> String;
}

/// Fixture storage that accepts every upload and keeps nothing.
#[derive(Debug, Clone)]
pub struct FixtureDocumentStorage {
    base_url: String,
}

impl FixtureDocumentStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for FixtureDocumentStorage {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[async_trait]
impl DocumentStorage for FixtureDocumentStorage {
    async fn upload(
        &self,
        _access_token: Option<AccessToken>,
        _bucket: StorageBucket,
        _path: &str,
        _file: &UploadedFile,
    ) -> Result<(), DocumentStorageError> {
        Ok(())
    }

    fn public_url(&self, bucket: StorageBucket, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080/")]
    #[case("http://localhost:8080")]
    fn fixture_public_url_uses_public_prefix(#[case] base: &str) {
        let storage = FixtureDocumentStorage::new(base);
        assert_eq!(
            storage.public_url(StorageBucket::DriverPhotos, "u/driver_photo.png"),
            "http://localhost:8080/storage/v1/object/public/driver-photos/u/driver_photo.png"
        );
    }
}
