//! Update Room Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::rooms::models::RoomUpdate;

use crate::{
    extensions::*,
    rooms::{errors::into_status_error, handlers::get::RoomResponse},
    state::State,
};

/// Update Room Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateRoomRequest {
    pub title: String,
    pub capacity: u16,
    pub nightly_price_cents: u64,
    pub currency: String,
    pub min_nights: u16,
    pub max_nights: u16,
    pub location: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub instant_book: bool,
}

impl From<UpdateRoomRequest> for RoomUpdate {
    fn from(request: UpdateRoomRequest) -> Self {
        RoomUpdate {
            title: request.title,
            capacity: request.capacity,
            nightly_price_cents: request.nightly_price_cents,
            currency: request.currency,
            min_nights: request.min_nights,
            max_nights: request.max_nights,
            location: request.location,
            amenities: request.amenities,
            instant_book: request.instant_book,
        }
    }
}

/// Update Room Handler
#[endpoint(tags("rooms"), summary = "Update Room", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    json: JsonBody<UpdateRoomRequest>,
    depot: &mut Depot,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    let updated = state
        .app
        .rooms
        .update_room(room.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use roost_app::domain::rooms::{MockRoomsService, RoomsServiceError, models::RoomUuid};

    use crate::test_helpers::{admin_service, make_room, state_with_rooms};

    use super::*;

    fn update_payload() -> serde_json::Value {
        json!({
            "title": "Garden Room",
            "capacity": 2,
            "nightly_price_cents": 17_500,
            "currency": "USD",
            "min_nights": 1,
            "max_nights": 30,
            "location": "Asheville",
        })
    }

    fn make_service(rooms: MockRoomsService) -> Service {
        admin_service(
            state_with_rooms(rooms),
            Router::with_path("rooms/{room}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_room_returns_updated_room() -> TestResult {
        let uuid = RoomUuid::new();

        let mut room = make_room(uuid);
        room.nightly_price_cents = 17_500;

        let mut rooms = MockRoomsService::new();

        rooms
            .expect_update_room()
            .once()
            .withf(move |r, update| *r == uuid && update.nightly_price_cents == 17_500)
            .return_once(move |_, _| Ok(room));

        let mut res = TestClient::put(format!("http://example.com/rooms/{uuid}"))
            .json(&update_payload())
            .send(&make_service(rooms))
            .await;

        let body: RoomResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.nightly_price_cents, 17_500);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_room_returns_404() -> TestResult {
        let uuid = RoomUuid::new();

        let mut rooms = MockRoomsService::new();

        rooms
            .expect_update_room()
            .once()
            .return_once(|_, _| Err(RoomsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/rooms/{uuid}"))
            .json(&update_payload())
            .send(&make_service(rooms))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
