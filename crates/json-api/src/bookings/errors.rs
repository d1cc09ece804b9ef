//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use roost_app::domain::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Booking already exists with different details")
        }
        BookingsServiceError::Conflict => {
            StatusError::conflict().brief("Dates are no longer available")
        }
        BookingsServiceError::HoldExpired => StatusError::conflict().brief("Hold has expired"),
        BookingsServiceError::NotCancellable => {
            StatusError::conflict().brief("Confirmed bookings cannot be cancelled")
        }
        BookingsServiceError::InvalidRange(fault) => {
            StatusError::bad_request().brief(fault.to_string())
        }
        BookingsServiceError::InvalidPayment => {
            StatusError::bad_request().brief("Payment amount must be positive")
        }
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData
        | BookingsServiceError::OutOfRange(_) => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Sql(source) => {
            error!("bookings storage error: {source}");

            StatusError::internal_server_error()
        }
        BookingsServiceError::NotFound => StatusError::not_found(),
    }
}
