//! Table access through the platform's REST layer (`/rest/v1`).
//!
//! Filters use the `column=op.value` query syntax. Writes ask for the stored
//! row back with `Prefer: return=representation`; counts ask for an exact
//! `Content-Range` total on a `HEAD` request.

use async_trait::async_trait;
use reqwest::header::CONTENT_RANGE;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    DriverApplicationRepository, DriverApplicationRepositoryError, ProfileRepository,
    ProfileRepositoryError, RideRepository, RideRepositoryError,
};
use crate::domain::{
    AccessToken, ApplicationStatus, Caller, DriverApplication, DriverMetrics,
    NewDriverApplication, NewRide, Ride, UserProfile,
};

use super::client::{status_message, SupabaseClient};
use super::dto::{
    DriverApplicationRowDto, MetricsRowDto, NewDriverApplicationRowDto, NewRideRowDto,
    ProfileRowDto, RideRowDto, StatusPatchDto,
};

const PREFER_HEADER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const COUNT_EXACT: &str = "count=exact";

const PROFILES: &str = "profiles";
const RIDES: &str = "rides";
const DRIVER_APPLICATIONS: &str = "driver_applications";

/// Failure classes shared by every table-backed port error.
trait RestFailure: Sized {
    fn transport(message: String) -> Self;
    fn unauthorized(message: String) -> Self;
    fn query(message: String) -> Self;

    fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = status_message(status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::unauthorized(message),
            _ if status.is_server_error() => Self::transport(message),
            _ => Self::query(message),
        }
    }
}

macro_rules! impl_rest_failure {
    ($($error:ty),* $(,)?) => {
        $(
            impl RestFailure for $error {
                fn transport(message: String) -> Self {
                    Self::Connection { message }
                }

                fn unauthorized(message: String) -> Self {
                    Self::Unauthorized { message }
                }

                fn query(message: String) -> Self {
                    Self::Query { message }
                }
            }
        )*
    };
}

impl_rest_failure!(
    ProfileRepositoryError,
    RideRepositoryError,
    DriverApplicationRepositoryError,
);

fn table_url(client: &SupabaseClient, table: &str) -> Url {
    client.endpoint(["rest", "v1", table])
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

async fn fetch_rows<T, E>(
    client: &SupabaseClient,
    method: Method,
    url: Url,
    access_token: Option<&AccessToken>,
    body: Option<&(impl Serialize + Sync)>,
) -> Result<Vec<T>, E>
where
    T: DeserializeOwned,
    E: RestFailure,
{
    let mut request = client.request(method.clone(), url, access_token);
    if let Some(body) = body {
        request = request.header(PREFER_HEADER, RETURN_REPRESENTATION).json(body);
    }
    let response = SupabaseClient::send(request)
        .await
        .map_err(|err| E::transport(err.to_string()))?;
    debug!(%method, status = response.status.as_u16(), "table request answered");
    if !response.status.is_success() {
        return Err(E::from_status(response.status, &response.body));
    }
    serde_json::from_slice(&response.body).map_err(|err| E::query(format!("decode rows: {err}")))
}

async fn select_rows<T: DeserializeOwned, E: RestFailure>(
    client: &SupabaseClient,
    url: Url,
    access_token: &AccessToken,
) -> Result<Vec<T>, E> {
    fetch_rows(client, Method::GET, url, Some(access_token), None::<&()>).await
}

async fn count_rows<E: RestFailure>(
    client: &SupabaseClient,
    url: Url,
    access_token: &AccessToken,
) -> Result<u64, E> {
    let request = client
        .request(Method::HEAD, url, Some(access_token))
        .header(PREFER_HEADER, COUNT_EXACT);
    let response = SupabaseClient::send(request)
        .await
        .map_err(|err| E::transport(err.to_string()))?;
    if !response.status.is_success() {
        return Err(E::from_status(response.status, &response.body));
    }
    let range = response
        .headers
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| E::query("count response lacks Content-Range".to_owned()))?;
    parse_total(range).ok_or_else(|| E::query(format!("unreadable Content-Range: {range}")))
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`.
fn parse_total(range: &str) -> Option<u64> {
    let (_, total) = range.rsplit_once('/')?;
    total.trim().parse().ok()
}

fn decode_all<R, T>(
    rows: Vec<R>,
    into_domain: impl Fn(R) -> Result<T, String>,
) -> Result<Vec<T>, String> {
    rows.into_iter().map(into_domain).collect()
}

/// Profiles read from the `profiles` table.
#[derive(Debug, Clone)]
pub struct SupabaseProfileRepository {
    client: SupabaseClient,
}

impl SupabaseProfileRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    async fn find_profile(&self, caller: &Caller) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let mut url = table_url(&self.client, PROFILES);
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &eq(caller.user_id))
            .append_pair("limit", "1");
        let rows: Vec<ProfileRowDto> =
            select_rows(&self.client, url, &caller.access_token).await?;
        rows.into_iter()
            .next()
            .map(ProfileRowDto::into_domain)
            .transpose()
            .map_err(ProfileRepositoryError::query)
    }
}

/// Rides read from and inserted into the `rides` table.
#[derive(Debug, Clone)]
pub struct SupabaseRideRepository {
    client: SupabaseClient,
}

impl SupabaseRideRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RideRepository for SupabaseRideRepository {
    async fn recent_rides(&self, caller: &Caller, limit: usize) -> Result<Vec<Ride>, RideRepositoryError> {
        let mut url = table_url(&self.client, RIDES);
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("passenger_id", &eq(caller.user_id))
            .append_pair("order", "created_at.desc")
            .append_pair("limit", &limit.to_string());
        let rows: Vec<RideRowDto> = select_rows(&self.client, url, &caller.access_token).await?;
        Ok(rows.into_iter().map(Ride::from).collect())
    }

    async fn insert_ride(&self, caller: &Caller, ride: &NewRide) -> Result<Ride, RideRepositoryError> {
        let url = table_url(&self.client, RIDES);
        let rows: Vec<RideRowDto> = fetch_rows(
            &self.client,
            Method::POST,
            url,
            Some(&caller.access_token),
            Some(&NewRideRowDto::from(ride)),
        )
        .await?;
        rows.into_iter()
            .next()
            .map(Ride::from)
            .ok_or_else(|| RideRepositoryError::query("insert returned no row"))
    }
}

/// Applications stored in the `driver_applications` table.
#[derive(Debug, Clone)]
pub struct SupabaseDriverApplicationRepository {
    client: SupabaseClient,
}

impl SupabaseDriverApplicationRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn applications_url(&self) -> Url {
        table_url(&self.client, DRIVER_APPLICATIONS)
    }
}

fn decode_applications(
    rows: Vec<DriverApplicationRowDto>,
) -> Result<Vec<DriverApplication>, DriverApplicationRepositoryError> {
    decode_all(rows, DriverApplicationRowDto::into_domain)
        .map_err(DriverApplicationRepositoryError::query)
}

#[async_trait]
impl DriverApplicationRepository for SupabaseDriverApplicationRepository {
    async fn insert_application(
        &self,
        access_token: Option<AccessToken>,
        application: &NewDriverApplication,
    ) -> Result<DriverApplication, DriverApplicationRepositoryError> {
        let rows: Vec<DriverApplicationRowDto> = fetch_rows(
            &self.client,
            Method::POST,
            self.applications_url(),
            access_token.as_ref(),
            Some(&NewDriverApplicationRowDto::from(application)),
        )
        .await?;
        decode_applications(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverApplicationRepositoryError::query("insert returned no row"))
    }

    async fn list_applications(
        &self,
        caller: &Caller,
    ) -> Result<Vec<DriverApplication>, DriverApplicationRepositoryError> {
        let mut url = self.applications_url();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");
        let rows = select_rows(&self.client, url, &caller.access_token).await?;
        decode_applications(rows)
    }

    async fn find_application(
        &self,
        caller: &Caller,
        id: Uuid,
    ) -> Result<Option<DriverApplication>, DriverApplicationRepositoryError> {
        let mut url = self.applications_url();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &eq(id));
        let rows = select_rows(&self.client, url, &caller.access_token).await?;
        Ok(decode_applications(rows)?.into_iter().next())
    }

    async fn update_status(
        &self,
        caller: &Caller,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<DriverApplication>, DriverApplicationRepositoryError> {
        let mut url = self.applications_url();
        url.query_pairs_mut()
            .append_pair("id", &eq(id))
            .append_pair("status", &eq(from));
        let rows: Vec<DriverApplicationRowDto> = fetch_rows(
            &self.client,
            Method::PATCH,
            url,
            Some(&caller.access_token),
            Some(&StatusPatchDto { status: to }),
        )
        .await?;
        Ok(decode_applications(rows)?.into_iter().next())
    }

    async fn count_with_status(
        &self,
        caller: &Caller,
        status: ApplicationStatus,
    ) -> Result<u64, DriverApplicationRepositoryError> {
        let mut url = self.applications_url();
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("status", &eq(status));
        count_rows(&self.client, url, &caller.access_token).await
    }

    async fn approved_metrics(
        &self,
        caller: &Caller,
    ) -> Result<Vec<DriverMetrics>, DriverApplicationRepositoryError> {
        let mut url = self.applications_url();
        url.query_pairs_mut()
            .append_pair("select", "rating,earnings")
            .append_pair("status", &eq(ApplicationStatus::Approved));
        let rows: Vec<MetricsRowDto> = select_rows(&self.client, url, &caller.access_token).await?;
        Ok(rows.into_iter().map(DriverMetrics::from).collect())
    }
}
