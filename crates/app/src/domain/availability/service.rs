//! Availability service.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        availability::{
            errors::AvailabilityServiceError,
            models::{Availability, AvailabilityWindow, NewWindow, UnavailableReason, WindowUuid},
            range::{DateRange, today_utc},
            repository::PgAvailabilityRepository,
        },
        rooms::models::RoomUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAvailabilityService {
    db: Db,
    repository: PgAvailabilityRepository,
}

impl PgAvailabilityService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAvailabilityRepository::new(),
        }
    }
}

#[async_trait]
impl AvailabilityService for PgAvailabilityService {
    async fn check(
        &self,
        room: RoomUuid,
        start: Date,
        end: Date,
        now: Timestamp,
    ) -> Result<Availability, AvailabilityServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.room_exists(&mut tx, room).await? {
            return Err(AvailabilityServiceError::NotFound);
        }

        // Malformed and past ranges answer as unavailable with a reason,
        // never silently.
        let Ok(range) = DateRange::new(start, end) else {
            return Ok(Availability::Unavailable(UnavailableReason::InvalidRange));
        };

        if range.starts_before(today_utc(now)) {
            return Ok(Availability::Unavailable(UnavailableReason::InPast));
        }

        if let Some(window) = self
            .repository
            .find_blocking_window(&mut tx, room, &range)
            .await?
        {
            return Ok(Availability::Unavailable(UnavailableReason::Blocked {
                window,
            }));
        }

        if let Some(booking) = self
            .repository
            .find_conflicting_booking(&mut tx, room, &range, now)
            .await?
        {
            return Ok(Availability::Unavailable(UnavailableReason::Conflict {
                booking,
            }));
        }

        tx.commit().await?;

        Ok(Availability::Available)
    }

    async fn list_windows(
        &self,
        room: RoomUuid,
    ) -> Result<Vec<AvailabilityWindow>, AvailabilityServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.room_exists(&mut tx, room).await? {
            return Err(AvailabilityServiceError::NotFound);
        }

        let windows = self.repository.list_windows(&mut tx, room).await?;

        tx.commit().await?;

        Ok(windows)
    }

    async fn create_window(
        &self,
        window: NewWindow,
    ) -> Result<AvailabilityWindow, AvailabilityServiceError> {
        if DateRange::new(window.start_date, window.end_date).is_err() {
            return Err(AvailabilityServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_window(&mut tx, &window).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_window(
        &self,
        room: RoomUuid,
        window: WindowUuid,
    ) -> Result<(), AvailabilityServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_window(&mut tx, room, window).await?;

        if rows_affected == 0 {
            return Err(AvailabilityServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Answer whether a room is free for `[start, end)` at `now`.
    ///
    /// Advisory: hold creation re-validates under the database exclusion
    /// constraint regardless of what this returned.
    async fn check(
        &self,
        room: RoomUuid,
        start: Date,
        end: Date,
        now: Timestamp,
    ) -> Result<Availability, AvailabilityServiceError>;

    /// List a room's declared availability windows.
    async fn list_windows(
        &self,
        room: RoomUuid,
    ) -> Result<Vec<AvailabilityWindow>, AvailabilityServiceError>;

    /// Declare a new availability window.
    async fn create_window(
        &self,
        window: NewWindow,
    ) -> Result<AvailabilityWindow, AvailabilityServiceError>;

    /// Remove a window from a room.
    async fn delete_window(
        &self,
        room: RoomUuid,
        window: WindowUuid,
    ) -> Result<(), AvailabilityServiceError>;
}
