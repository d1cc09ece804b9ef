//! Shared fixtures for service tests.

use jiff::civil::Date;

use crate::domain::{
    bookings::models::{BookingUuid, GuestUuid, NewBooking},
    rooms::models::{NewRoom, RoomUuid},
};

pub(crate) fn date(value: &str) -> Date {
    value.parse().expect("valid test date")
}

pub(crate) fn test_room(uuid: RoomUuid) -> NewRoom {
    NewRoom {
        uuid,
        title: "Garden Room".to_string(),
        capacity: 2,
        nightly_price_cents: 10_000,
        currency: "USD".to_string(),
        min_nights: 1,
        max_nights: 30,
        location: "Asheville".to_string(),
        amenities: vec!["wifi".to_string()],
        instant_book: false,
    }
}

pub(crate) fn test_hold(room: RoomUuid, start: &str, end: &str) -> NewBooking {
    test_hold_for(GuestUuid::new(), room, start, end)
}

pub(crate) fn test_hold_for(
    guest: GuestUuid,
    room: RoomUuid,
    start: &str,
    end: &str,
) -> NewBooking {
    NewBooking {
        uuid: BookingUuid::new(),
        room_uuid: room,
        guest_uuid: guest,
        start_date: date(start),
        end_date: date(end),
        identity_document_uuid: None,
    }
}
