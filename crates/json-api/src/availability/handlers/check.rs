//! Availability Check Handler

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

use roost_app::domain::availability::models::{Availability, UnavailableReason};

use crate::{availability::errors::into_status_error, extensions::*, state::State};

/// Availability answer for a room and date range.
///
/// Advisory only: the hold-creation endpoint re-validates atomically, so this
/// answer can go stale the moment it is rendered.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityResponse {
    /// Whether the range can currently be booked
    pub available: bool,

    /// Why not: `invalid_range`, `in_past`, `conflict`, or `blocked`
    pub reason: Option<String>,

    /// The active booking occupying the range
    pub conflicting_booking_uuid: Option<Uuid>,

    /// The blocked window covering the range
    pub blocking_window_uuid: Option<Uuid>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Available => AvailabilityResponse {
                available: true,
                reason: None,
                conflicting_booking_uuid: None,
                blocking_window_uuid: None,
            },
            Availability::Unavailable(reason) => {
                let (code, booking, window) = match reason {
                    UnavailableReason::InvalidRange => ("invalid_range", None, None),
                    UnavailableReason::InPast => ("in_past", None, None),
                    UnavailableReason::Conflict { booking } => {
                        ("conflict", Some(booking.into_uuid()), None)
                    }
                    UnavailableReason::Blocked { window } => {
                        ("blocked", None, Some(window.into_uuid()))
                    }
                };

                AvailabilityResponse {
                    available: false,
                    reason: Some(code.to_string()),
                    conflicting_booking_uuid: booking,
                    blocking_window_uuid: window,
                }
            }
        }
    }
}

/// Availability Check Handler
///
/// Answers whether a room is free for a half-open `[start_date, end_date)`
/// range.
#[endpoint(
    tags("availability"),
    summary = "Check Availability",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    start_date: QueryParam<String, true>,
    end_date: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let start = start_date.into_date("start_date")?;
    let end = end_date.into_date("end_date")?;

    let availability = state
        .app
        .availability
        .check(room.into_inner().into(), start, end, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(availability.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use roost_app::domain::{
        availability::{AvailabilityServiceError, MockAvailabilityService},
        bookings::models::BookingUuid,
        rooms::models::RoomUuid,
    };

    use crate::test_helpers::{guest_service, state_with_availability};

    use super::*;

    fn make_service(availability: MockAvailabilityService) -> Service {
        guest_service(
            state_with_availability(availability),
            Router::with_path("rooms/{room}/availability").get(handler),
        )
    }

    #[tokio::test]
    async fn test_free_range_reports_available() -> TestResult {
        let room = RoomUuid::new();

        let mut availability = MockAvailabilityService::new();

        availability
            .expect_check()
            .once()
            .withf(move |r, start, end, _| {
                *r == room
                    && start.to_string() == "2030-06-01"
                    && end.to_string() == "2030-06-03"
            })
            .return_once(|_, _, _, _| Ok(Availability::Available));

        let mut res = TestClient::get(format!(
            "http://example.com/rooms/{room}/availability?start_date=2030-06-01&end_date=2030-06-03"
        ))
        .send(&make_service(availability))
        .await;

        let body: AvailabilityResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.available);
        assert!(body.reason.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_conflicting_booking_reports_reason() -> TestResult {
        let room = RoomUuid::new();
        let booking = BookingUuid::new();

        let mut availability = MockAvailabilityService::new();

        availability.expect_check().once().return_once(move |_, _, _, _| {
            Ok(Availability::Unavailable(UnavailableReason::Conflict {
                booking,
            }))
        });

        let mut res = TestClient::get(format!(
            "http://example.com/rooms/{room}/availability?start_date=2030-06-01&end_date=2030-06-03"
        ))
        .send(&make_service(availability))
        .await;

        let body: AvailabilityResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.available);
        assert_eq!(body.reason.as_deref(), Some("conflict"));
        assert_eq!(body.conflicting_booking_uuid, Some(booking.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_room_returns_404() -> TestResult {
        let room = RoomUuid::new();

        let mut availability = MockAvailabilityService::new();

        availability
            .expect_check()
            .once()
            .return_once(|_, _, _, _| Err(AvailabilityServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/rooms/{room}/availability?start_date=2030-06-01&end_date=2030-06-03"
        ))
        .send(&make_service(availability))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_date_returns_400() -> TestResult {
        let room = RoomUuid::new();

        let availability = MockAvailabilityService::new();

        let res = TestClient::get(format!(
            "http://example.com/rooms/{room}/availability?start_date=junk&end_date=2030-06-03"
        ))
        .send(&make_service(availability))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
