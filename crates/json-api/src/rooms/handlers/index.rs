//! Room Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, rooms::handlers::get::RoomResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomsResponse {
    /// The list of rooms
    pub rooms: Vec<RoomResponse>,
}

/// Room Index Handler
///
/// Returns a list of rooms.
#[endpoint(tags("rooms"), summary = "List Rooms", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RoomsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let rooms = state
        .app
        .rooms
        .list_rooms()
        .await
        .or_500("failed to fetch rooms")?;

    Ok(Json(RoomsResponse {
        rooms: rooms.into_iter().map(Into::into).collect(),
    }))
}
