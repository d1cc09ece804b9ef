//! Bookings service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::pricing::PricingError;

/// PostgreSQL `exclusion_violation`: the overlap guard on active bookings.
const EXCLUSION_VIOLATION_CODE: &str = "23P01";

/// Why a requested stay is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StayFault {
    #[error("end date must be after start date")]
    Empty,

    #[error("stay starts in the past")]
    InPast,

    #[error("stay is shorter than the room minimum")]
    TooShort,

    #[error("stay is longer than the room maximum")]
    TooLong,
}

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("booking already exists with different details")]
    AlreadyExists,

    #[error("booking or room not found")]
    NotFound,

    #[error("dates are no longer available")]
    Conflict,

    #[error("invalid stay dates")]
    InvalidRange(#[source] StayFault),

    #[error("hold has expired")]
    HoldExpired,

    #[error("confirmed bookings cannot be cancelled")]
    NotCancellable,

    #[error("payment amount must be positive")]
    InvalidPayment,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("numeric value out of range")]
    OutOfRange(#[from] TryFromIntError),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        // The exclusion constraint on active bookings reports 23P01; losing
        // the availability race is a Conflict, not a storage failure.
        if error
            .as_database_error()
            .and_then(DatabaseError::code)
            .as_deref()
            == Some(EXCLUSION_VIOLATION_CODE)
        {
            return Self::Conflict;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PricingError> for BookingsServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::StayTooShort { .. } => Self::InvalidRange(StayFault::TooShort),
            PricingError::StayTooLong { .. } => Self::InvalidRange(StayFault::TooLong),
            PricingError::PriceOverflow => Self::InvalidData,
        }
    }
}
