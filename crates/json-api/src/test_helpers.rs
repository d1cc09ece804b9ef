//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use roost_app::{
    auth::{MockAuthService, Principal, PrincipalUuid, Role},
    context::AppContext,
    domain::{
        availability::MockAvailabilityService,
        bookings::{
            MockBookingsService,
            models::{Booking, BookingStatus, BookingUuid, GuestUuid},
        },
        rooms::{
            MockRoomsService,
            models::{Room, RoomUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_GUEST: Principal = Principal {
    uuid: PrincipalUuid::from_uuid(Uuid::nil()),
    role: Role::Guest,
};

pub(crate) const TEST_ADMIN: Principal = Principal {
    uuid: PrincipalUuid::from_uuid(Uuid::from_u128(1)),
    role: Role::Admin,
};

#[salvo::handler]
pub(crate) async fn inject_guest(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(TEST_GUEST);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_rooms_mock() -> MockRoomsService {
    let mut rooms = MockRoomsService::new();

    rooms.expect_list_rooms().never();
    rooms.expect_get_room().never();
    rooms.expect_create_room().never();
    rooms.expect_update_room().never();
    rooms.expect_delete_room().never();

    rooms
}

fn strict_availability_mock() -> MockAvailabilityService {
    let mut availability = MockAvailabilityService::new();

    availability.expect_check().never();
    availability.expect_list_windows().never();
    availability.expect_create_window().never();
    availability.expect_delete_window().never();

    availability
}

fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_create_hold().never();
    bookings.expect_quote_stay().never();
    bookings.expect_get_booking().never();
    bookings.expect_list_mine().never();
    bookings.expect_list_pending_for_review().never();
    bookings.expect_confirm_payment().never();
    bookings.expect_cancel().never();
    bookings.expect_reap_expired().never();

    bookings
}

fn state_from(
    rooms: MockRoomsService,
    availability: MockAvailabilityService,
    bookings: MockBookingsService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        rooms: Arc::new(rooms),
        availability: Arc::new(availability),
        bookings: Arc::new(bookings),
        auth: Arc::new(auth),
    }))
}

pub(crate) fn state_with_rooms(rooms: MockRoomsService) -> Arc<State> {
    state_from(
        rooms,
        strict_availability_mock(),
        strict_bookings_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_availability(availability: MockAvailabilityService) -> Arc<State> {
    state_from(
        strict_rooms_mock(),
        availability,
        strict_bookings_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_bookings(bookings: MockBookingsService) -> Arc<State> {
    state_from(
        strict_rooms_mock(),
        strict_availability_mock(),
        bookings,
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_from(
        strict_rooms_mock(),
        strict_availability_mock(),
        strict_bookings_mock(),
        auth,
    )
}

pub(crate) fn make_room(uuid: RoomUuid) -> Room {
    Room {
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
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// A pending hold owned by [`TEST_GUEST`].
pub(crate) fn make_booking(uuid: BookingUuid) -> Booking {
    Booking {
        uuid,
        room_uuid: RoomUuid::new(),
        guest_uuid: GuestUuid::from_uuid(TEST_GUEST.uuid.into_uuid()),
        start_date: "2030-06-01".parse().expect("valid test date"),
        end_date: "2030-06-03".parse().expect("valid test date"),
        nights: 2,
        total_price_cents: 20_000,
        currency: "USD".to_string(),
        status: BookingStatus::Pending,
        expires_at: None,
        amount_paid_cents: 0,
        identity_document_uuid: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Route wrapped with state plus a guest principal.
pub(crate) fn guest_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_guest)
            .push(route),
    )
}

/// Route wrapped with state plus an admin principal.
pub(crate) fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}
