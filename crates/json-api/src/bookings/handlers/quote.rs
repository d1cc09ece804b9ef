//! Quote Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::pricing::Quote;

use crate::{bookings::errors::into_status_error, extensions::*, state::State};

/// Quote Response
///
/// Display-only: hold creation recomputes the price server-side from the
/// room row, so a quote can never be echoed back as an authoritative total.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    /// Total price for the stay, in cents
    pub amount_cents: u64,

    /// ISO currency code
    pub currency: String,

    /// Nightly rate used, in cents
    pub nightly_price_cents: u64,

    /// Number of nights priced
    pub nights: u32,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse {
            amount_cents: quote.amount_cents,
            currency: quote.currency,
            nightly_price_cents: quote.breakdown.nightly_price_cents,
            nights: quote.breakdown.nights,
        }
    }
}

/// Quote Handler
///
/// Prices a stay without creating anything.
#[endpoint(
    tags("bookings"),
    summary = "Quote Stay",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    start_date: QueryParam<String, true>,
    end_date: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let start = start_date.into_date("start_date")?;
    let end = end_date.into_date("end_date")?;

    let quote = state
        .app
        .bookings
        .quote_stay(room.into_inner().into(), start, end, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use roost_app::domain::{
        bookings::{BookingsServiceError, MockBookingsService, StayFault},
        pricing::QuoteBreakdown,
        rooms::models::RoomUuid,
    };

    use crate::test_helpers::{guest_service, state_with_bookings};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        guest_service(
            state_with_bookings(bookings),
            Router::with_path("rooms/{room}/quote").get(handler),
        )
    }

    #[tokio::test]
    async fn test_quote_returns_server_side_price() -> TestResult {
        let room = RoomUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_quote_stay()
            .once()
            .withf(move |r, start, end, _| {
                *r == room
                    && start.to_string() == "2024-06-01"
                    && end.to_string() == "2024-06-03"
            })
            .return_once(|_, _, _, _| {
                Ok(Quote {
                    amount_cents: 20_000,
                    currency: "USD".to_string(),
                    breakdown: QuoteBreakdown {
                        nightly_price_cents: 10_000,
                        nights: 2,
                    },
                })
            });

        let mut res = TestClient::get(format!(
            "http://example.com/rooms/{room}/quote?start_date=2024-06-01&end_date=2024-06-03"
        ))
        .send(&make_service(bookings))
        .await;

        let body: QuoteResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.amount_cents, 20_000);
        assert_eq!(body.nights, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_quote_below_min_nights_returns_400() -> TestResult {
        let room = RoomUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_quote_stay()
            .once()
            .return_once(|_, _, _, _| Err(BookingsServiceError::InvalidRange(StayFault::TooShort)));

        let res = TestClient::get(format!(
            "http://example.com/rooms/{room}/quote?start_date=2024-06-01&end_date=2024-06-02"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_quote_unknown_room_returns_404() -> TestResult {
        let room = RoomUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_quote_stay()
            .once()
            .return_once(|_, _, _, _| Err(BookingsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/rooms/{room}/quote?start_date=2024-06-01&end_date=2024-06-03"
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
