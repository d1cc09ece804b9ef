//! Get Room Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::rooms::models::Room;

use crate::{extensions::*, rooms::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoomResponse {
    /// The unique identifier of the room
    pub uuid: Uuid,

    /// Display title
    pub title: String,

    /// Sleeping capacity
    pub capacity: u16,

    /// Nightly rate in cents
    pub nightly_price_cents: u64,

    /// ISO currency code for the nightly rate
    pub currency: String,

    /// Minimum stay length in nights
    pub min_nights: u16,

    /// Maximum stay length in nights
    pub max_nights: u16,

    /// Location label
    pub location: String,

    /// Amenity labels
    pub amenities: Vec<String>,

    /// Whether bookings confirm without a payment hold
    pub instant_book: bool,

    /// The date and time the room was created
    pub created_at: String,

    /// The date and time the room was last updated
    pub updated_at: String,

    /// The date and time the room was deleted
    pub deleted_at: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        RoomResponse {
            uuid: room.uuid.into(),
            title: room.title,
            capacity: room.capacity,
            nightly_price_cents: room.nightly_price_cents,
            currency: room.currency,
            min_nights: room.min_nights,
            max_nights: room.max_nights,
            location: room.location,
            amenities: room.amenities,
            instant_book: room.instant_book,
            created_at: room.created_at.to_string(),
            updated_at: room.updated_at.to_string(),
            deleted_at: room.deleted_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Get Room Handler
///
/// Returns a room.
#[endpoint(tags("rooms"), summary = "Get Room", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RoomResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let room = state
        .app
        .rooms
        .get_room(room.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(room.into()))
}
