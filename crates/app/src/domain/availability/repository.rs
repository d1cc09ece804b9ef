//! Availability Repository
//!
//! Owns the windows table plus the conflict probes the availability index
//! runs against bookings. The index is advisory for reads; hold creation
//! relies on the database exclusion constraint for the authoritative answer.

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    availability::{
        models::{AvailabilityWindow, NewWindow, WindowKind, WindowUuid},
        range::DateRange,
    },
    bookings::models::BookingUuid,
    rooms::models::RoomUuid,
};

const LIST_WINDOWS_SQL: &str = include_str!("sql/list_windows.sql");
const CREATE_WINDOW_SQL: &str = include_str!("sql/create_window.sql");
const DELETE_WINDOW_SQL: &str = include_str!("sql/delete_window.sql");
const ROOM_EXISTS_SQL: &str = include_str!("sql/room_exists.sql");
const FIND_BLOCKING_WINDOW_SQL: &str = include_str!("sql/find_blocking_window.sql");
const FIND_CONFLICTING_BOOKING_SQL: &str = include_str!("sql/find_conflicting_booking.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAvailabilityRepository;

impl PgAvailabilityRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_windows(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<Vec<AvailabilityWindow>, sqlx::Error> {
        query_as::<Postgres, AvailabilityWindow>(LIST_WINDOWS_SQL)
            .bind(room.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_window(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &NewWindow,
    ) -> Result<AvailabilityWindow, sqlx::Error> {
        query_as::<Postgres, AvailabilityWindow>(CREATE_WINDOW_SQL)
            .bind(window.uuid.into_uuid())
            .bind(window.room_uuid.into_uuid())
            .bind(SqlxDate::from(window.start_date))
            .bind(SqlxDate::from(window.end_date))
            .bind(window.kind.as_str())
            .bind(window.reason.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_window(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        window: WindowUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WINDOW_SQL)
            .bind(room.into_uuid())
            .bind(window.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn room_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ROOM_EXISTS_SQL)
            .bind(room.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_blocking_window(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        range: &DateRange,
    ) -> Result<Option<WindowUuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_BLOCKING_WINDOW_SQL)
            .bind(room.into_uuid())
            .bind(SqlxDate::from(range.start()))
            .bind(SqlxDate::from(range.end()))
            .fetch_optional(&mut **tx)
            .await
            .map(|uuid| uuid.map(WindowUuid::from_uuid))
    }

    /// Find an active booking overlapping the range.
    ///
    /// Pending bookings whose `expires_at` is at or before `now` are treated
    /// as expired and never conflict.
    pub(crate) async fn find_conflicting_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        range: &DateRange,
        now: Timestamp,
    ) -> Result<Option<BookingUuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_CONFLICTING_BOOKING_SQL)
            .bind(room.into_uuid())
            .bind(SqlxDate::from(range.start()))
            .bind(SqlxDate::from(range.end()))
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
            .map(|uuid| uuid.map(BookingUuid::from_uuid))
    }
}

impl<'r> FromRow<'r, PgRow> for AvailabilityWindow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind_raw: String = row.try_get("kind")?;

        let kind = WindowKind::parse(&kind_raw).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: format!("unknown window kind: {kind_raw}").into(),
        })?;

        Ok(Self {
            uuid: WindowUuid::from_uuid(row.try_get("uuid")?),
            room_uuid: RoomUuid::from_uuid(row.try_get("room_uuid")?),
            start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
            kind,
            reason: row.try_get("reason")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
