//! Availability Errors

use salvo::http::StatusError;
use tracing::error;

use roost_app::domain::availability::AvailabilityServiceError;

pub(crate) fn into_status_error(error: AvailabilityServiceError) -> StatusError {
    match error {
        AvailabilityServiceError::AlreadyExists => {
            StatusError::conflict().brief("Window already exists")
        }
        AvailabilityServiceError::InvalidReference
        | AvailabilityServiceError::MissingRequiredData
        | AvailabilityServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid window payload")
        }
        AvailabilityServiceError::Sql(source) => {
            error!("availability storage error: {source}");

            StatusError::internal_server_error()
        }
        AvailabilityServiceError::NotFound => StatusError::not_found(),
    }
}
