//! Get Booking Handler

use std::{string::ToString, sync::Arc};

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::bookings::models::{Booking, IdentityDocumentUuid};

use crate::{bookings::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    /// The unique identifier of the booking
    pub uuid: Uuid,

    /// Room being booked
    pub room_uuid: Uuid,

    /// Guest who created the hold
    pub guest_uuid: Uuid,

    /// First night of the stay (inclusive)
    pub start_date: String,

    /// Checkout day (exclusive)
    pub end_date: String,

    /// Number of nights
    pub nights: u32,

    /// Total price frozen at hold creation, in cents
    pub total_price_cents: u64,

    /// ISO currency code for the total
    pub currency: String,

    /// Lifecycle status, with lazy expiry applied
    pub status: String,

    /// Payment progress derived from the ledger
    pub payment_state: String,

    /// Sum of recorded payments, in cents
    pub amount_paid_cents: u64,

    /// When a pending hold stops reserving its dates
    pub expires_at: Option<String>,

    /// Uploaded identity document reference
    pub identity_document_uuid: Option<Uuid>,

    /// The date and time the booking was created
    pub created_at: String,

    /// The date and time the booking was last updated
    pub updated_at: String,
}

impl BookingResponse {
    /// Render a booking as seen at `now` (stale pending holds read as
    /// expired).
    pub(crate) fn at(booking: &Booking, now: Timestamp) -> Self {
        BookingResponse {
            uuid: booking.uuid.into(),
            room_uuid: booking.room_uuid.into(),
            guest_uuid: booking.guest_uuid.into(),
            start_date: booking.start_date.to_string(),
            end_date: booking.end_date.to_string(),
            nights: booking.nights,
            total_price_cents: booking.total_price_cents,
            currency: booking.currency.clone(),
            status: booking.status_at(now).as_str().to_string(),
            payment_state: booking.payment_state().as_str().to_string(),
            amount_paid_cents: booking.amount_paid_cents,
            expires_at: booking.expires_at.as_ref().map(ToString::to_string),
            identity_document_uuid: booking
                .identity_document_uuid
                .map(IdentityDocumentUuid::into_uuid),
            created_at: booking.created_at.to_string(),
            updated_at: booking.updated_at.to_string(),
        }
    }
}

/// Get Booking Handler
///
/// Returns a booking. Guests only see their own; admins see all.
#[endpoint(
    tags("bookings"),
    summary = "Get Booking",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let booking = state
        .app
        .bookings
        .get_booking(booking.into_inner().into())
        .await
        .map_err(into_status_error)?;

    // Existence of other guests' bookings is not leaked.
    if !principal.role.is_admin() && booking.guest_uuid.into_uuid() != principal.uuid.into_uuid() {
        return Err(StatusError::not_found());
    }

    Ok(Json(BookingResponse::at(&booking, Timestamp::now())))
}
