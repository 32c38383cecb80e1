//! Ride history and the book-ride request.
//!
//! Rides live in the platform's `rides` table. The portal lists a passenger's
//! most recent trips and lets them request a new one; dispatch, pricing and
//! geocoding are handled elsewhere, so a booking carries placeholder
//! coordinates and a demo fare estimate.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::form::{required, FieldViolation};
use super::UserId;

/// Number of rides shown on the dashboard.
pub const RECENT_RIDES_LIMIT: usize = 5;

/// Lowest fare the estimator can produce.
pub const MIN_ESTIMATED_FARE: u32 = 10;
/// Highest fare the estimator can produce.
pub const MAX_ESTIMATED_FARE: u32 = 59;

/// Pickup coordinates recorded until geocoding is available.
pub const PLACEHOLDER_PICKUP: Coordinates = Coordinates {
    latitude: 40.7128,
    longitude: -74.0060,
};
/// Destination coordinates recorded until geocoding is available.
pub const PLACEHOLDER_DESTINATION: Coordinates = Coordinates {
    latitude: 40.7589,
    longitude: -73.9851,
};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Vehicle class a passenger may request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Economy,
    Comfort,
    Premium,
}

impl VehicleType {
    /// Column value stored on the ride row.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Comfort => "comfort",
            Self::Premium => "premium",
        }
    }
}

/// Lifecycle state of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    /// Waiting for a driver.
    Requested,
    /// A driver accepted the trip.
    Accepted,
    /// Passenger is on board.
    InProgress,
    Completed,
    Cancelled,
}

/// Ride row as shown in the dashboard history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: Uuid,
    #[schema(example = "Downtown Mall")]
    pub pickup_address: String,
    #[schema(example = "Airport Terminal 2")]
    pub destination_address: String,
    pub status: RideStatus,
    #[schema(example = 24.0)]
    pub estimated_fare: f64,
    pub vehicle_type: VehicleType,
    pub created_at: DateTime<Utc>,
}

/// Reasons a booking form is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("pickup address must not be empty")]
    EmptyPickup,
    #[error("destination address must not be empty")]
    EmptyDestination,
}

impl FieldViolation for BookingError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyPickup => "pickupAddress",
            Self::EmptyDestination => "destinationAddress",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyPickup => "empty_pickup_address",
            Self::EmptyDestination => "empty_destination_address",
        }
    }
}

/// Validated book-ride form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pickup_address: String,
    destination_address: String,
    vehicle_type: VehicleType,
}

impl BookingRequest {
    /// Validate raw form values; a missing vehicle class means economy.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::{BookingRequest, VehicleType};
    ///
    /// let booking = BookingRequest::try_new(" Mall ", "Airport", None).unwrap();
    /// assert_eq!(booking.pickup_address(), "Mall");
    /// assert_eq!(booking.vehicle_type(), VehicleType::Economy);
    /// ```
    pub fn try_new(
        pickup_address: &str,
        destination_address: &str,
        vehicle_type: Option<VehicleType>,
    ) -> Result<Self, BookingError> {
        let pickup = required(pickup_address).ok_or(BookingError::EmptyPickup)?;
        let destination = required(destination_address).ok_or(BookingError::EmptyDestination)?;
        Ok(Self {
            pickup_address: pickup.to_owned(),
            destination_address: destination.to_owned(),
            vehicle_type: vehicle_type.unwrap_or_default(),
        })
    }

    pub fn pickup_address(&self) -> &str {
        self.pickup_address.as_str()
    }

    pub fn destination_address(&self) -> &str {
        self.destination_address.as_str()
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    /// Turn the booking into the row to insert, drawing a fare estimate
    /// from `rng`.
    pub fn into_new_ride<R: Rng + ?Sized>(self, passenger_id: UserId, rng: &mut R) -> NewRide {
        NewRide {
            passenger_id,
            pickup_address: self.pickup_address,
            pickup: PLACEHOLDER_PICKUP,
            destination_address: self.destination_address,
            destination: PLACEHOLDER_DESTINATION,
            vehicle_type: self.vehicle_type,
            estimated_fare: estimate_fare(rng),
        }
    }
}

/// Uniform demo fare in whole currency units.
pub fn estimate_fare<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(MIN_ESTIMATED_FARE..=MAX_ESTIMATED_FARE)
}

/// Ride row ready for insertion; status defaults to requested on the
/// platform side.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRide {
    pub passenger_id: UserId,
    pub pickup_address: String,
    pub pickup: Coordinates,
    pub destination_address: String,
    pub destination: Coordinates,
    pub vehicle_type: VehicleType,
    pub estimated_fare: u32,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    #[rstest]
    #[case("", "Airport", BookingError::EmptyPickup)]
    #[case("Mall", "   ", BookingError::EmptyDestination)]
    #[case(" ", " ", BookingError::EmptyPickup)]
    fn rejects_blank_addresses(
        #[case] pickup: &str,
        #[case] destination: &str,
        #[case] expected: BookingError,
    ) {
        assert_eq!(
            BookingRequest::try_new(pickup, destination, None),
            Err(expected)
        );
    }

    #[rstest]
    fn fare_stays_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let fare = estimate_fare(&mut rng);
            assert!((MIN_ESTIMATED_FARE..=MAX_ESTIMATED_FARE).contains(&fare));
        }
    }

    #[rstest]
    fn new_ride_uses_placeholder_coordinates() {
        let mut rng = SmallRng::seed_from_u64(1);
        let passenger = UserId::random();
        let ride = BookingRequest::try_new("Mall", "Airport", Some(VehicleType::Premium))
            .expect("valid booking")
            .into_new_ride(passenger, &mut rng);
        assert_eq!(ride.passenger_id, passenger);
        assert_eq!(ride.pickup, PLACEHOLDER_PICKUP);
        assert_eq!(ride.destination, PLACEHOLDER_DESTINATION);
        assert_eq!(ride.vehicle_type, VehicleType::Premium);
    }

    #[rstest]
    #[case("\"economy\"", VehicleType::Economy)]
    #[case("\"premium\"", VehicleType::Premium)]
    fn vehicle_type_uses_snake_case(#[case] raw: &str, #[case] expected: VehicleType) {
        let parsed: VehicleType = serde_json::from_str(raw).expect("vehicle type");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw.trim_matches('"'));
    }

    #[rstest]
    fn status_parses_in_progress() {
        let status: RideStatus = serde_json::from_str("\"in_progress\"").expect("status");
        assert_eq!(status, RideStatus::InProgress);
    }
}
