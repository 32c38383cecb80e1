//! Driving port for the signed-in passenger's dashboard.

use async_trait::async_trait;

use crate::domain::{BookingRequest, Caller, Error, Ride, UserProfile};

/// Domain use-case port for profile, ride history and bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassengerDashboard: Send + Sync {
    /// The caller's profile.
    async fn profile(&self, caller: &Caller) -> Result<UserProfile, Error>;

    /// The caller's most recent rides, newest first.
    async fn recent_rides(&self, caller: &Caller) -> Result<Vec<Ride>, Error>;

    /// Request a ride for the caller.
    async fn book_ride(&self, caller: &Caller, booking: BookingRequest) -> Result<Ride, Error>;
}
