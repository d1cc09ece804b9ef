//! Create Booking Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::bookings::models::NewBooking;

use crate::{
    bookings::{errors::into_status_error, handlers::get::BookingResponse},
    extensions::*,
    state::State,
};

/// Create Booking Request
///
/// The `uuid` doubles as an idempotency key: retrying an identical request
/// returns the stored hold instead of creating a second one. All amounts are
/// computed server-side; the request carries no price.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookingRequest {
    pub uuid: Uuid,
    pub room_uuid: Uuid,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub identity_document_uuid: Option<Uuid>,
}

/// Create Booking Handler
///
/// Creates a pending hold for the date range, or a confirmed booking when
/// the room is instant-book. Losing the availability race yields 409.
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Hold created"),
        (status_code = StatusCode::OK, description = "Identical hold already existed"),
        (status_code = StatusCode::CONFLICT, description = "Dates are no longer available"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Room not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = json.into_inner();

    let start_date = request
        .start_date
        .parse()
        .or_400("could not parse \"start_date\" field")?;
    let end_date = request
        .end_date
        .parse()
        .or_400("could not parse \"end_date\" field")?;

    let now = Timestamp::now();

    let created = state
        .app
        .bookings
        .create_hold(
            NewBooking {
                uuid: request.uuid.into(),
                room_uuid: request.room_uuid.into(),
                guest_uuid: principal.uuid.into_uuid().into(),
                start_date,
                end_date,
                identity_document_uuid: request.identity_document_uuid.map(Into::into),
            },
            now,
        )
        .await
        .map_err(into_status_error)?;

    let uuid = created.booking.uuid;

    res.add_header(LOCATION, format!("/bookings/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(if created.replayed {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        });

    Ok(Json(BookingResponse::at(&created.booking, now)))
}
