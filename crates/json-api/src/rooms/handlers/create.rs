//! Create Room Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::rooms::models::NewRoom;

use crate::{extensions::*, rooms::errors::into_status_error, state::State};

/// Create Room Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateRoomRequest {
    pub uuid: Uuid,
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

impl From<CreateRoomRequest> for NewRoom {
    fn from(request: CreateRoomRequest) -> Self {
        NewRoom {
            uuid: request.uuid.into(),
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

/// Room Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomCreatedResponse {
    /// Created room UUID
    pub uuid: Uuid,
}

/// Create Room Handler
#[endpoint(
    tags("rooms"),
    summary = "Create Room",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Room created"),
        (status_code = StatusCode::CONFLICT, description = "Room already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRoomRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RoomCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    let uuid = state
        .app
        .rooms
        .create_room(json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/rooms/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(RoomCreatedResponse { uuid: uuid.into() }))
}
