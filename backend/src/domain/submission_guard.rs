//! Single-flight gate for form submissions.
//!
//! A browser disables a form's submit button while its request is pending.
//! The server enforces the same rule: while one submission of a form is in
//! flight for a given submitter, a second one is rejected instead of queued.
//! Nothing is cancelled or retried.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

/// Form whose submissions are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    SignIn,
    SignUp,
    DriverApplication,
    BookRide,
    Feedback,
    ReviewApplication,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignUp => "sign_up",
            Self::DriverApplication => "driver_application",
            Self::BookRide => "book_ride",
            Self::Feedback => "feedback",
            Self::ReviewApplication => "review_application",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when the same submitter already has `form` in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a {form} submission is already in progress")]
pub struct SubmissionInFlight {
    pub form: FormKind,
}

type Key = (Uuid, FormKind);

/// Tracks in-flight submissions; clones share state.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<Key>>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `submitter` and `form`.
    ///
    /// The slot is released when the returned permit is dropped, whether the
    /// submission succeeded or not.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::{FormKind, SubmissionGuard};
    /// use uuid::Uuid;
    ///
    /// let guard = SubmissionGuard::new();
    /// let submitter = Uuid::new_v4();
    /// let permit = guard.try_acquire(submitter, FormKind::Feedback).unwrap();
    /// assert!(guard.try_acquire(submitter, FormKind::Feedback).is_err());
    /// drop(permit);
    /// assert!(guard.try_acquire(submitter, FormKind::Feedback).is_ok());
    /// ```
    pub fn try_acquire(
        &self,
        submitter: Uuid,
        form: FormKind,
    ) -> Result<SubmissionPermit, SubmissionInFlight> {
        let key = (submitter, form);
        if !self.lock().insert(key) {
            return Err(SubmissionInFlight { form });
        }
        Ok(SubmissionPermit {
            in_flight: Arc::clone(&self.in_flight),
            key,
        })
    }

    #[cfg(test)]
    pub(crate) fn is_in_flight(&self, submitter: Uuid, form: FormKind) -> bool {
        self.lock().contains(&(submitter, form))
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Key>> {
        // The set stays consistent even if a holder panicked mid-insert.
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof that a submission holds its slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct SubmissionPermit {
    in_flight: Arc<Mutex<HashSet<Key>>>,
    key: Key,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn second_submission_is_rejected_while_first_is_pending() {
        let guard = SubmissionGuard::new();
        let submitter = Uuid::new_v4();
        let _permit = guard
            .try_acquire(submitter, FormKind::SignUp)
            .expect("first submission");
        assert_eq!(
            guard.try_acquire(submitter, FormKind::SignUp).err(),
            Some(SubmissionInFlight {
                form: FormKind::SignUp
            })
        );
    }

    #[rstest]
    fn other_forms_and_submitters_are_independent() {
        let guard = SubmissionGuard::new();
        let submitter = Uuid::new_v4();
        let _sign_up = guard
            .try_acquire(submitter, FormKind::SignUp)
            .expect("sign-up");
        let _feedback = guard
            .try_acquire(submitter, FormKind::Feedback)
            .expect("feedback is a separate form");
        let _other = guard
            .try_acquire(Uuid::new_v4(), FormKind::SignUp)
            .expect("other submitter");
    }

    #[rstest]
    fn dropping_permit_releases_slot() {
        let guard = SubmissionGuard::new();
        let submitter = Uuid::new_v4();
        let permit = guard
            .try_acquire(submitter, FormKind::BookRide)
            .expect("booking");
        assert!(guard.is_in_flight(submitter, FormKind::BookRide));
        drop(permit);
        assert!(!guard.is_in_flight(submitter, FormKind::BookRide));
    }

    #[rstest]
    fn clones_share_state() {
        let guard = SubmissionGuard::new();
        let clone = guard.clone();
        let submitter = Uuid::new_v4();
        let _permit = guard
            .try_acquire(submitter, FormKind::DriverApplication)
            .expect("application");
        assert!(clone.is_in_flight(submitter, FormKind::DriverApplication));
    }
}
