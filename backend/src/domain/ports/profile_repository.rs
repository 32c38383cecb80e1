//! Driven port for reading rows of the `profiles` table.

use async_trait::async_trait;

use crate::domain::{Caller, UserId, UserProfile, UserRole};

use super::auth_gateway::{FIXTURE_ADMIN_EMAIL, FIXTURE_ADMIN_ID, FIXTURE_PASSENGER_EMAIL};
use super::define_port_error;

define_port_error! {
    /// Errors raised when reading profiles.
    pub enum ProfileRepositoryError {
        /// The platform could not be reached.
        Connection { message: String } => "profile read connection failed: {message}",
        /// The platform rejected the caller's token.
        Unauthorized { message: String } => "profile read unauthorised: {message}",
        /// The query failed or returned an unexpected row.
        Query { message: String } => "profile read query failed: {message}",
    }
}

/// Port for loading the signed-in user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the caller's own profile; `None` when no row exists yet.
    async fn find_profile(&self, caller: &Caller) -> Result<Option<UserProfile>, ProfileRepositoryError>;
}

/// Fixture profiles: the fixture admin is an admin, everyone else a
/// verified passenger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_profile(&self, caller: &Caller) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let admin_id = UserId::new(FIXTURE_ADMIN_ID)
            .map_err(|err| ProfileRepositoryError::query(format!("fixture id: {err}")))?;
        let profile = if caller.user_id == admin_id {
            UserProfile {
                id: caller.user_id,
                full_name: "SmartLine Admin".to_owned(),
                email: FIXTURE_ADMIN_EMAIL.to_owned(),
                role: UserRole::Admin,
                rating: 5.0,
                total_rides: 0,
                is_verified: true,
            }
        } else {
            UserProfile {
                id: caller.user_id,
                full_name: "Sarah Johnson".to_owned(),
                email: FIXTURE_PASSENGER_EMAIL.to_owned(),
                role: UserRole::Passenger,
                rating: 4.8,
                total_rides: 2,
                is_verified: true,
            }
        };
        Ok(Some(profile))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::AccessToken;
    use rstest::rstest;

    fn caller(id: UserId) -> Caller {
        Caller::new(id, AccessToken::new("token").expect("token"))
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_admin_has_admin_role() {
        let admin = UserId::new(FIXTURE_ADMIN_ID).expect("fixture id");
        let profile = FixtureProfileRepository
            .find_profile(&caller(admin))
            .await
            .expect("profile lookup")
            .expect("profile row");
        assert!(profile.is_admin());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_defaults_to_passenger() {
        let id = UserId::random();
        let profile = FixtureProfileRepository
            .find_profile(&caller(id))
            .await
            .expect("profile lookup")
            .expect("profile row");
        assert_eq!(profile.id, id);
        assert_eq!(profile.role, UserRole::Passenger);
    }
}
