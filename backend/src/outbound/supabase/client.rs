//! Shared HTTP plumbing for the Supabase-compatible platform.
//!
//! Every call carries the project's anon key in the `apikey` header and a
//! bearer token: the caller's access token when acting for a signed-in user,
//! otherwise the anon key itself.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};

use crate::domain::{AccessToken, StorageBucket};

const APIKEY_HEADER: &str = "apikey";
const DEFAULT_USER_AGENT: &str = "smartline-portal/0.1";

/// Connection settings for the platform.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Url,
    /// Public anon key of the project.
    pub anon_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Errors raised while building the client.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseClientError {
    #[error("platform URL must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("anon key must not be empty")]
    EmptyAnonKey,
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Status, headers and body of a completed call.
#[derive(Debug)]
pub(super) struct RawResponse {
    pub(super) status: StatusCode,
    pub(super) headers: HeaderMap,
    pub(super) body: Vec<u8>,
}

/// Reqwest client bound to one platform project. Clones share the pool.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base: Url,
    anon_key: Arc<str>,
}

impl SupabaseClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error for non-HTTP URLs, a blank anon key, or when the
    /// reqwest client cannot be constructed.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseClientError> {
        if !matches!(config.url.scheme(), "http" | "https") {
            return Err(SupabaseClientError::UnsupportedScheme(config.url.to_string()));
        }
        if config.anon_key.trim().is_empty() {
            return Err(SupabaseClientError::EmptyAnonKey);
        }
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        let mut base = config.url;
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self {
            http,
            base,
            anon_key: Arc::from(config.anon_key.trim()),
        })
    }

    /// URL of `segments` below the project root. Segments are percent-encoded.
    pub(super) fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Public URL of an object in a public bucket.
    pub fn public_object_url(&self, bucket: StorageBucket, path: &str) -> String {
        self.endpoint(
            ["storage", "v1", "object", "public", bucket.name()]
                .into_iter()
                .chain(path.split('/')),
        )
        .to_string()
    }

    /// Start a request with platform credentials attached.
    pub(super) fn request(
        &self,
        method: Method,
        url: Url,
        access_token: Option<&AccessToken>,
    ) -> RequestBuilder {
        let bearer = access_token.map_or(&*self.anon_key, AccessToken::expose);
        self.http
            .request(method, url)
            .header(APIKEY_HEADER, &*self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
    }

    /// Send `request` and buffer the response.
    pub(super) async fn send(request: RequestBuilder) -> Result<RawResponse, reqwest::Error> {
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// `status N` or `status N: <body>` with the body compacted and capped.
pub(super) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for URL and message helpers.
    use super::*;
    use rstest::rstest;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig {
            url: Url::parse(url).expect("url"),
            anon_key: "anon".to_owned(),
            timeout: Duration::from_secs(5),
        })
        .expect("client")
    }

    #[rstest]
    #[case("https://demo.supabase.co")]
    #[case("https://demo.supabase.co/")]
    fn endpoint_appends_segments(#[case] base: &str) {
        let url = client(base).endpoint(["rest", "v1", "rides"]);
        assert_eq!(url.as_str(), "https://demo.supabase.co/rest/v1/rides");
    }

    #[rstest]
    fn public_url_encodes_path_segments() {
        let url = client("https://demo.supabase.co")
            .public_object_url(StorageBucket::DriverDocuments, "u1/driver card_0.pdf");
        assert_eq!(
            url,
            "https://demo.supabase.co/storage/v1/object/public/driver-documents/u1/driver%20card_0.pdf"
        );
    }

    #[rstest]
    fn rejects_non_http_urls() {
        let err = SupabaseClient::new(SupabaseConfig {
            url: Url::parse("ftp://demo.supabase.co").expect("url"),
            anon_key: "anon".to_owned(),
            timeout: Duration::from_secs(5),
        })
        .expect_err("ftp rejected");
        assert!(matches!(err, SupabaseClientError::UnsupportedScheme(_)));
    }

    #[rstest]
    fn rejects_blank_anon_key() {
        let err = SupabaseClient::new(SupabaseConfig {
            url: Url::parse("https://demo.supabase.co").expect("url"),
            anon_key: "  ".to_owned(),
            timeout: Duration::from_secs(5),
        })
        .expect_err("blank key rejected");
        assert!(matches!(err, SupabaseClientError::EmptyAnonKey));
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(400);
        let message = status_message(StatusCode::BAD_GATEWAY, body.as_bytes());
        assert!(message.starts_with("status 502: "));
        assert!(message.ends_with("..."));
    }
}
