//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        availability::{AvailabilityService, PgAvailabilityService},
        bookings::{BookingSettings, BookingsService, PgBookingsService},
        rooms::{PgRoomsService, RoomsService},
    },
    notify::TracingNotifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub rooms: Arc<dyn RoomsService>,
    pub availability: Arc<dyn AvailabilityService>,
    pub bookings: Arc<dyn BookingsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        settings: BookingSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            rooms: Arc::new(PgRoomsService::new(db.clone())),
            availability: Arc::new(PgAvailabilityService::new(db.clone())),
            bookings: Arc::new(PgBookingsService::new(
                db,
                Arc::new(TracingNotifier::new()),
                settings,
            )),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
