//! Driven port for the `rides` table.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{Caller, NewRide, Ride, RideStatus, VehicleType};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading or inserting rides.
    pub enum RideRepositoryError {
        /// The platform could not be reached.
        Connection { message: String } => "ride repository connection failed: {message}",
        /// The platform rejected the caller's token.
        Unauthorized { message: String } => "ride repository unauthorised: {message}",
        /// The query or insert failed.
        Query { message: String } => "ride repository query failed: {message}",
    }
}

/// Port for ride history and bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// The caller's rides, newest first, at most `limit` rows.
    async fn recent_rides(&self, caller: &Caller, limit: usize) -> Result<Vec<Ride>, RideRepositoryError>;

    /// Insert a booking and return the stored row.
    async fn insert_ride(&self, caller: &Caller, ride: &NewRide) -> Result<Ride, RideRepositoryError>;
}

/// Fixture ride history with two finished trips.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRideRepository;

#[async_trait]
impl RideRepository for FixtureRideRepository {
    async fn recent_rides(&self, _caller: &Caller, limit: usize) -> Result<Vec<Ride>, RideRepositoryError> {
        let now = Utc::now();
        let rides = vec![
            Ride {
                id: Uuid::from_u128(0x1),
                pickup_address: "King Fahd Road".to_owned(),
                destination_address: "Riyadh Park Mall".to_owned(),
                status: RideStatus::Completed,
                estimated_fare: 24.0,
                vehicle_type: VehicleType::Economy,
                created_at: now - Duration::hours(3),
            },
            Ride {
                id: Uuid::from_u128(0x2),
                pickup_address: "Olaya Street".to_owned(),
                destination_address: "King Khalid International Airport".to_owned(),
                status: RideStatus::Cancelled,
                estimated_fare: 51.0,
                vehicle_type: VehicleType::Premium,
                created_at: now - Duration::days(2),
            },
        ];
        Ok(rides.into_iter().take(limit).collect())
    }

    async fn insert_ride(&self, _caller: &Caller, ride: &NewRide) -> Result<Ride, RideRepositoryError> {
        Ok(Ride {
            id: Uuid::new_v4(),
            pickup_address: ride.pickup_address.clone(),
            destination_address: ride.destination_address.clone(),
            status: RideStatus::Requested,
            estimated_fare: f64::from(ride.estimated_fare),
            vehicle_type: ride.vehicle_type,
            created_at: Utc::now(),
        })
    }
}
