//! Wire shapes of the platform's auth responses and table rows.
//!
//! Rows use the tables' snake_case column names; conversion into domain types
//! happens here so adapters never leak column naming upward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    AccessToken, ApplicationStatus, AuthSession, DriverApplication, DriverMetrics, IdentityType,
    NewDriverApplication, NewRide, Ride, RideStatus, StoredDocument, UserId, UserProfile,
    UserRole, VehicleType,
};

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SignUpDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) data: SignUpMetadataDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignUpMetadataDto<'a> {
    pub(super) full_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthSessionDto {
    access_token: String,
    user: AuthUserDto,
}

/// Sign-up answers with a session when email confirmation is disabled and
/// with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SignUpResponseDto {
    Session(AuthSessionDto),
    User(AuthUserDto),
}

/// Error body; older and newer auth servers fill different fields.
#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthErrorDto {
    #[serde(default)]
    pub(super) error: Option<String>,
    #[serde(default)]
    pub(super) error_code: Option<String>,
    #[serde(default)]
    pub(super) error_description: Option<String>,
    #[serde(default)]
    pub(super) msg: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl AuthErrorDto {
    pub(super) fn code(&self) -> Option<&str> {
        self.error_code.as_deref().or(self.error.as_deref())
    }

    pub(super) fn description(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.message.as_deref())
    }
}

impl AuthUserDto {
    fn into_session(
        self,
        fallback_email: &str,
        access_token: Option<AccessToken>,
    ) -> Result<AuthSession, String> {
        let user_id = UserId::new(&self.id).map_err(|err| format!("user id: {err}"))?;
        Ok(AuthSession {
            user_id,
            email: self.email.unwrap_or_else(|| fallback_email.to_owned()),
            access_token,
        })
    }
}

impl AuthSessionDto {
    pub(super) fn into_domain(self, fallback_email: &str) -> Result<AuthSession, String> {
        let token = AccessToken::new(self.access_token).map_err(|err| format!("token: {err}"))?;
        self.user.into_session(fallback_email, Some(token))
    }
}

impl SignUpResponseDto {
    pub(super) fn into_domain(self, fallback_email: &str) -> Result<AuthSession, String> {
        match self {
            Self::Session(session) => session.into_domain(fallback_email),
            Self::User(user) => user.into_session(fallback_email, None),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileRowDto {
    id: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<UserRole>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    total_rides: Option<u32>,
    #[serde(default)]
    is_verified: Option<bool>,
}

impl ProfileRowDto {
    pub(super) fn into_domain(self) -> Result<UserProfile, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("profile id: {err}"))?;
        Ok(UserProfile {
            id,
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role: self.role.unwrap_or(UserRole::Passenger),
            rating: self.rating.unwrap_or_default(),
            total_rides: self.total_rides.unwrap_or_default(),
            is_verified: self.is_verified.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RideRowDto {
    id: Uuid,
    pickup_address: String,
    destination_address: String,
    status: RideStatus,
    #[serde(default)]
    estimated_fare: Option<f64>,
    #[serde(default)]
    vehicle_type: Option<VehicleType>,
    created_at: DateTime<Utc>,
}

impl From<RideRowDto> for Ride {
    fn from(row: RideRowDto) -> Self {
        Self {
            id: row.id,
            pickup_address: row.pickup_address,
            destination_address: row.destination_address,
            status: row.status,
            estimated_fare: row.estimated_fare.unwrap_or_default(),
            vehicle_type: row.vehicle_type.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewRideRowDto<'a> {
    passenger_id: String,
    pickup_address: &'a str,
    pickup_latitude: f64,
    pickup_longitude: f64,
    destination_address: &'a str,
    destination_latitude: f64,
    destination_longitude: f64,
    vehicle_type: VehicleType,
    estimated_fare: u32,
    status: RideStatus,
}

impl<'a> From<&'a NewRide> for NewRideRowDto<'a> {
    fn from(ride: &'a NewRide) -> Self {
        Self {
            passenger_id: ride.passenger_id.to_string(),
            pickup_address: &ride.pickup_address,
            pickup_latitude: ride.pickup.latitude,
            pickup_longitude: ride.pickup.longitude,
            destination_address: &ride.destination_address,
            destination_latitude: ride.destination.latitude,
            destination_longitude: ride.destination.longitude,
            vehicle_type: ride.vehicle_type,
            estimated_fare: ride.estimated_fare,
            status: RideStatus::Requested,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DriverApplicationRowDto {
    id: Uuid,
    #[serde(default)]
    user_id: Option<String>,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    identity_type: Option<IdentityType>,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    earnings: Option<f64>,
    #[serde(default)]
    total_trips: Option<u32>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    driver_photo_url: Option<String>,
    #[serde(default)]
    documents: Option<Vec<StoredDocument>>,
}

impl DriverApplicationRowDto {
    pub(super) fn into_domain(self) -> Result<DriverApplication, String> {
        let user_id = self
            .user_id
            .as_deref()
            .map(UserId::new)
            .transpose()
            .map_err(|err| format!("applicant id: {err}"))?;
        Ok(DriverApplication {
            id: self.id,
            user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone.unwrap_or_default(),
            identity_type: self.identity_type,
            status: self.status,
            created_at: self.created_at,
            earnings: self.earnings.unwrap_or_default(),
            total_trips: self.total_trips.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            driver_photo_url: self.driver_photo_url,
            documents: self.documents.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewDriverApplicationRowDto<'a> {
    user_id: String,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    identity_type: IdentityType,
    identity_number: &'a str,
    status: ApplicationStatus,
    driver_photo_url: Option<&'a str>,
    documents: &'a [StoredDocument],
}

impl<'a> From<&'a NewDriverApplication> for NewDriverApplicationRowDto<'a> {
    fn from(application: &'a NewDriverApplication) -> Self {
        Self {
            user_id: application.user_id.to_string(),
            first_name: &application.first_name,
            last_name: &application.last_name,
            email: &application.email,
            phone: &application.phone,
            identity_type: application.identity_type,
            identity_number: &application.identity_number,
            status: application.status,
            driver_photo_url: application.driver_photo_url.as_deref(),
            documents: &application.documents,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StatusPatchDto {
    pub(super) status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub(super) struct MetricsRowDto {
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    earnings: Option<f64>,
}

impl From<MetricsRowDto> for DriverMetrics {
    fn from(row: MetricsRowDto) -> Self {
        Self {
            rating: row.rating,
            earnings: row.earnings,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row decoding.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn sign_up_without_session_has_no_token() {
        let dto: SignUpResponseDto = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "new@example.com",
            "confirmation_sent_at": "2026-01-01T00:00:00Z"
        }))
        .expect("user body");
        let session = dto.into_domain("fallback@example.com").expect("session");
        assert!(session.access_token.is_none());
        assert_eq!(session.email, "new@example.com");
    }

    #[rstest]
    fn sign_up_with_session_keeps_token() {
        let dto: SignUpResponseDto = serde_json::from_value(json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "user": { "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }
        }))
        .expect("session body");
        let session = dto.into_domain("fallback@example.com").expect("session");
        assert_eq!(
            session.access_token.as_ref().map(AccessToken::expose),
            Some("jwt")
        );
        assert_eq!(session.email, "fallback@example.com");
    }

    #[rstest]
    fn profile_row_fills_missing_columns() {
        let row: ProfileRowDto = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "full_name": "Sarah Johnson",
            "role": "driver",
            "rating": null
        }))
        .expect("profile row");
        let profile = row.into_domain().expect("profile");
        assert_eq!(profile.role, UserRole::Driver);
        assert_eq!(profile.rating, 0.0);
        assert!(!profile.is_verified);
    }

    #[rstest]
    fn application_row_decodes_documents() {
        let row: DriverApplicationRowDto = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-00000000b0b0",
            "user_id": null,
            "first_name": "Omar",
            "last_name": "Hassan",
            "email": "omar@example.com",
            "phone": "+966500000000",
            "identity_type": "passport",
            "status": "approved",
            "created_at": "2026-03-01T10:00:00Z",
            "earnings": 1250.5,
            "total_trips": 87,
            "rating": 4.8,
            "documents": [
                { "kind": "driver_card", "url": "https://cdn.example/card.pdf" }
            ]
        }))
        .expect("application row");
        let application = row.into_domain().expect("application");
        assert_eq!(application.status, ApplicationStatus::Approved);
        assert_eq!(application.total_trips, 87);
        assert_eq!(application.documents.len(), 1);
        assert!(application.user_id.is_none());
    }

    #[rstest]
    fn new_ride_row_uses_column_names() {
        let ride = NewRide {
            passenger_id: UserId::random(),
            pickup_address: "Mall".to_owned(),
            pickup: crate::domain::PLACEHOLDER_PICKUP,
            destination_address: "Airport".to_owned(),
            destination: crate::domain::PLACEHOLDER_DESTINATION,
            vehicle_type: VehicleType::Comfort,
            estimated_fare: 21,
        };
        let value = serde_json::to_value(NewRideRowDto::from(&ride)).expect("row");
        assert_eq!(value["pickup_latitude"], json!(40.7128));
        assert_eq!(value["vehicle_type"], json!("comfort"));
        assert_eq!(value["status"], json!("requested"));
    }
}
