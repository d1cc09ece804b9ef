//! Confirm Payment Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    bookings::{errors::into_status_error, handlers::get::BookingResponse},
    extensions::*,
    state::State,
};

/// Confirm Payment Request
///
/// `amount_cents` is the amount the admin verified was received, not a price:
/// the booking total was frozen server-side at hold creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmPaymentRequest {
    pub booking_uuid: Uuid,
    pub amount_cents: u64,
    pub reference: String,
}

/// Confirm Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmPaymentResponse {
    /// The booking after the payment was recorded
    pub booking: BookingResponse,

    /// True when the booking was already terminal and nothing changed
    pub already_terminal: bool,
}

/// Confirm Payment Handler
///
/// Records a received payment against a pending hold; the hold transitions
/// to confirmed once the ledger covers the frozen total. Idempotent on
/// already-confirmed bookings.
#[endpoint(
    tags("bookings"),
    summary = "Confirm Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment recorded"),
        (status_code = StatusCode::CONFLICT, description = "Hold has expired"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ConfirmPaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<ConfirmPaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    let request = json.into_inner();
    let now = Timestamp::now();

    let outcome = state
        .app
        .bookings
        .confirm_payment(
            request.booking_uuid.into(),
            request.amount_cents,
            request.reference,
            now,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ConfirmPaymentResponse {
        booking: BookingResponse::at(&outcome.booking, now),
        already_terminal: outcome.already_terminal,
    }))
}
