//! Admin Pending Bookings Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    bookings::handlers::{get::BookingResponse, my::BookingsResponse},
    extensions::*,
    state::State,
};

/// Admin Pending Bookings Handler
///
/// Returns holds awaiting payment review. Lazily-expired holds are excluded.
#[endpoint(
    tags("bookings"),
    summary = "List Pending Bookings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    let now = Timestamp::now();

    let bookings = state
        .app
        .bookings
        .list_pending_for_review(now)
        .await
        .or_500("failed to fetch pending bookings")?;

    Ok(Json(BookingsResponse {
        bookings: bookings
            .iter()
            .map(|booking| BookingResponse::at(booking, now))
            .collect(),
    }))
}
