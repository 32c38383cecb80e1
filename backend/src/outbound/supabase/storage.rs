//! Object uploads to the platform's storage server (`/storage/v1`).

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::domain::ports::{DocumentStorage, DocumentStorageError};
use crate::domain::{AccessToken, StorageBucket, UploadedFile};

use super::client::{status_message, SupabaseClient};

const UPSERT_HEADER: &str = "x-upsert";

/// Document storage writing into the platform's public buckets.
#[derive(Debug, Clone)]
pub struct SupabaseDocumentStorage {
    client: SupabaseClient,
}

impl SupabaseDocumentStorage {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentStorage for SupabaseDocumentStorage {
    async fn upload(
        &self,
        access_token: Option<AccessToken>,
        bucket: StorageBucket,
        path: &str,
        file: &UploadedFile,
    ) -> Result<(), DocumentStorageError> {
        let url = self.client.endpoint(
            ["storage", "v1", "object", bucket.name()]
                .into_iter()
                .chain(path.split('/')),
        );
        let request = self
            .client
            .request(Method::POST, url, access_token.as_ref())
            .header(UPSERT_HEADER, "true")
            .header(CONTENT_TYPE, file.content_type.as_str())
            .body(file.bytes.clone());
        let response = SupabaseClient::send(request)
            .await
            .map_err(|err| DocumentStorageError::transport(err.to_string()))?;
        debug!(%bucket, status = response.status.as_u16(), "object upload answered");
        if response.status.is_success() {
            Ok(())
        } else {
            Err(map_status_error(response.status, &response.body))
        }
    }

    fn public_url(&self, bucket: StorageBucket, path: &str) -> String {
        self.client.public_object_url(bucket, path)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DocumentStorageError {
    let message = status_message(status, body);
    if status.is_server_error() {
        DocumentStorageError::transport(message)
    } else {
        DocumentStorageError::rejected(message)
    }
}
