//! Room Errors

use salvo::http::StatusError;
use tracing::error;

use roost_app::domain::rooms::RoomsServiceError;

pub(crate) fn into_status_error(error: RoomsServiceError) -> StatusError {
    match error {
        RoomsServiceError::AlreadyExists => StatusError::conflict().brief("Room already exists"),
        RoomsServiceError::InvalidReference
        | RoomsServiceError::MissingRequiredData
        | RoomsServiceError::InvalidData
        | RoomsServiceError::OutOfRange(_) => {
            StatusError::bad_request().brief("Invalid room payload")
        }
        RoomsServiceError::Sql(source) => {
            error!("rooms storage error: {source}");

            StatusError::internal_server_error()
        }
        RoomsServiceError::NotFound => StatusError::not_found(),
    }
}
