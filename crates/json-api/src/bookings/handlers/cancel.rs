//! Cancel Booking Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    bookings::{errors::into_status_error, handlers::get::BookingResponse},
    extensions::*,
    state::State,
};

/// Cancel Booking Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelBookingResponse {
    /// The booking after cancellation
    pub booking: BookingResponse,

    /// True when the booking was already terminal and nothing changed
    pub already_terminal: bool,
}

/// Cancel Booking Handler
///
/// Guest-initiated cancellation of the caller's own pending hold. Cancelling
/// a confirmed booking is rejected; a refund flow is a separate concern.
#[endpoint(
    tags("bookings"),
    summary = "Cancel Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking cancelled"),
        (status_code = StatusCode::CONFLICT, description = "Confirmed bookings cannot be cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CancelBookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let now = Timestamp::now();

    let outcome = state
        .app
        .bookings
        .cancel(
            booking.into_inner().into(),
            principal.uuid.into_uuid().into(),
            now,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(CancelBookingResponse {
        booking: BookingResponse::at(&outcome.booking, now),
        already_terminal: outcome.already_terminal,
    }))
}
