//! Visitor feedback from the home page rating widget.

use thiserror::Error;

use super::form::{required, FieldViolation};

/// Reasons a feedback submission is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),
    #[error("feedback message must not be empty")]
    EmptyMessage,
}

impl FieldViolation for FeedbackError {
    fn field(&self) -> &'static str {
        match self {
            Self::RatingOutOfRange(_) => "rating",
            Self::EmptyMessage => "message",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::RatingOutOfRange(_) => "rating_out_of_range",
            Self::EmptyMessage => "empty_message",
        }
    }
}

/// Star rating from one to five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Validate a star count.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::Rating;
    ///
    /// assert_eq!(Rating::new(4).unwrap().label_key(), "feedback.rating.very.good");
    /// assert!(Rating::new(0).is_err());
    /// ```
    pub fn new(stars: u8) -> Result<Self, FeedbackError> {
        if (1..=5).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(FeedbackError::RatingOutOfRange(stars))
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }

    /// Catalogue key of the word shown under the stars.
    pub fn label_key(self) -> &'static str {
        match self.0 {
            1 => "feedback.rating.poor",
            2 => "feedback.rating.fair",
            3 => "feedback.rating.good",
            4 => "feedback.rating.very.good",
            _ => "feedback.rating.excellent",
        }
    }
}

/// Validated feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    rating: Rating,
    message: String,
}

impl Feedback {
    /// Validate raw widget values; the submit button stays disabled until
    /// both a rating and a message are present.
    pub fn try_new(stars: u8, message: &str) -> Result<Self, FeedbackError> {
        let rating = Rating::new(stars)?;
        let message = required(message).ok_or(FeedbackError::EmptyMessage)?;
        Ok(Self {
            rating,
            message: message.to_owned(),
        })
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}
