//! Passenger dashboard service.
//!
//! Implements the [`PassengerDashboard`] driving port over the profile and
//! ride repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    PassengerDashboard, ProfileRepository, ProfileRepositoryError, RideRepository,
    RideRepositoryError,
};
use crate::domain::{BookingRequest, Caller, Error, Ride, UserProfile, RECENT_RIDES_LIMIT};

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Unauthorized { message } => {
            Error::unauthorized(format!("session rejected: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
    }
}

fn map_ride_error(error: RideRepositoryError) -> Error {
    match error {
        RideRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ride store unavailable: {message}"))
        }
        RideRepositoryError::Unauthorized { message } => {
            Error::unauthorized(format!("session rejected: {message}"))
        }
        RideRepositoryError::Query { message } => {
            Error::internal(format!("ride store error: {message}"))
        }
    }
}

/// Dashboard service over profile and ride repositories.
#[derive(Clone)]
pub struct PassengerDashboardService<P: ?Sized, R: ?Sized> {
    profiles: Arc<P>,
    rides: Arc<R>,
}

impl<P: ?Sized, R: ?Sized> PassengerDashboardService<P, R> {
    pub fn new(profiles: Arc<P>, rides: Arc<R>) -> Self {
        Self { profiles, rides }
    }
}

#[async_trait]
impl<P, R> PassengerDashboard for PassengerDashboardService<P, R>
where
    P: ProfileRepository + ?Sized,
    R: RideRepository + ?Sized,
{
    async fn profile(&self, caller: &Caller) -> Result<UserProfile, Error> {
        self.profiles
            .find_profile(caller)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    async fn recent_rides(&self, caller: &Caller) -> Result<Vec<Ride>, Error> {
        let mut rides = self
            .rides
            .recent_rides(caller, RECENT_RIDES_LIMIT)
            .await
            .map_err(map_ride_error)?;
        // Adapters already sort; keep the contract even if one does not.
        rides.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rides.truncate(RECENT_RIDES_LIMIT);
        Ok(rides)
    }

    async fn book_ride(&self, caller: &Caller, booking: BookingRequest) -> Result<Ride, Error> {
        let new_ride = booking.into_new_ride(caller.user_id, &mut rand::thread_rng());
        let ride = self
            .rides
            .insert_ride(caller, &new_ride)
            .await
            .map_err(map_ride_error)?;
        info!(
            user_id = %caller.user_id,
            ride_id = %ride.id,
            vehicle_type = ride.vehicle_type.as_str(),
            estimated_fare = new_ride.estimated_fare,
            "ride requested"
        );
        Ok(ride)
    }
}
