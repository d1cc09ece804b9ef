//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        availability::PgAvailabilityService,
        bookings::{BookingSettings, PgBookingsService},
        rooms::PgRoomsService,
    },
    notify::TracingNotifier,
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub rooms: PgRoomsService,
    pub availability: PgAvailabilityService,
    pub bookings: PgBookingsService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            rooms: PgRoomsService::new(db.clone()),
            availability: PgAvailabilityService::new(db.clone()),
            bookings: PgBookingsService::new(
                db,
                Arc::new(TracingNotifier::new()),
                BookingSettings::default(),
            ),
            auth: PgAuthService::new(test_db.pool().clone()),
            db: test_db,
        }
    }
}
