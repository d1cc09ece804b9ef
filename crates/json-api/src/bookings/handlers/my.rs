//! My Bookings Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{bookings::handlers::get::BookingResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingsResponse {
    /// The list of bookings
    pub bookings: Vec<BookingResponse>,
}

/// My Bookings Handler
///
/// Returns the authenticated guest's bookings, oldest first.
#[endpoint(
    tags("bookings"),
    summary = "List My Bookings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let now = Timestamp::now();

    let bookings = state
        .app
        .bookings
        .list_mine(principal.uuid.into_uuid().into())
        .await
        .or_500("failed to fetch bookings")?;

    Ok(Json(BookingsResponse {
        bookings: bookings
            .iter()
            .map(|booking| BookingResponse::at(booking, now))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use roost_app::domain::bookings::{MockBookingsService, models::BookingUuid};

    use crate::test_helpers::{TEST_GUEST, guest_service, make_booking, state_with_bookings};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        guest_service(
            state_with_bookings(bookings),
            Router::with_path("bookings/my").get(handler),
        )
    }

    #[tokio::test]
    async fn test_my_bookings_returns_own_bookings() -> TestResult {
        let uuid = BookingUuid::new();
        let booking = make_booking(uuid);

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_mine()
            .once()
            .withf(|guest| guest.into_uuid() == TEST_GUEST.uuid.into_uuid())
            .return_once(move |_| Ok(vec![booking]));

        let mut res = TestClient::get("http://example.com/bookings/my")
            .send(&make_service(bookings))
            .await;

        let body: BookingsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.bookings.len(), 1);
        assert_eq!(
            body.bookings.first().map(|b| b.uuid),
            Some(uuid.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_my_bookings_empty_returns_200() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_list_mine().once().return_once(|_| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/bookings/my")
            .send(&make_service(bookings))
            .await;

        let body: BookingsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.bookings.is_empty());

        Ok(())
    }
}
