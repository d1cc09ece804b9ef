//! Room Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Room UUID
pub type RoomUuid = TypedUuid<Room>;

/// Room Model
///
/// `nightly_price_cents` is the rate quoted per night in the room's
/// `currency`. `min_nights`/`max_nights` bound the length of any booking.
#[derive(Debug, Clone)]
pub struct Room {
    pub uuid: RoomUuid,
    pub title: String,
    pub capacity: u16,
    pub nightly_price_cents: u64,
    pub currency: String,
    pub min_nights: u16,
    pub max_nights: u16,
    pub location: String,
    pub amenities: Vec<String>,
    pub instant_book: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Room Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub uuid: RoomUuid,
    pub title: String,
    pub capacity: u16,
    pub nightly_price_cents: u64,
    pub currency: String,
    pub min_nights: u16,
    pub max_nights: u16,
    pub location: String,
    pub amenities: Vec<String>,
    pub instant_book: bool,
}

/// Room Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct RoomUpdate {
    pub title: String,
    pub capacity: u16,
    pub nightly_price_cents: u64,
    pub currency: String,
    pub min_nights: u16,
    pub max_nights: u16,
    pub location: String,
    pub amenities: Vec<String>,
    pub instant_book: bool,
}
