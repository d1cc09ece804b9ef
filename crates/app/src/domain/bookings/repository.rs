//! Bookings Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    bookings::models::{
        Booking, BookingStatus, BookingUuid, GuestUuid, IdentityDocumentUuid, NewBooking,
        NewPayment, Payment, PaymentUuid,
    },
    pricing::Quote,
    rooms::models::RoomUuid,
};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const GET_BOOKING_SQL: &str = include_str!("sql/get_booking.sql");
const GET_BOOKING_FOR_UPDATE_SQL: &str = include_str!("sql/get_booking_for_update.sql");
const FIND_BOOKING_SQL: &str = include_str!("sql/find_booking.sql");
const LIST_FOR_GUEST_SQL: &str = include_str!("sql/list_for_guest.sql");
const LIST_PENDING_SQL: &str = include_str!("sql/list_pending.sql");
const EXPIRE_STALE_HOLDS_SQL: &str = include_str!("sql/expire_stale_holds.sql");
const REAP_EXPIRED_SQL: &str = include_str!("sql/reap_expired.sql");
const INSERT_PAYMENT_SQL: &str = include_str!("sql/insert_payment.sql");
const ADD_PAID_AMOUNT_SQL: &str = include_str!("sql/add_paid_amount.sql");
const CONFIRM_BOOKING_SQL: &str = include_str!("sql/confirm_booking.sql");
const CANCEL_BOOKING_SQL: &str = include_str!("sql/cancel_booking.sql");
const MARK_EXPIRED_SQL: &str = include_str!("sql/mark_expired.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a new booking row with the server-computed quote frozen in.
    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &NewBooking,
        quote: &Quote,
        status: BookingStatus,
        expires_at: Option<Timestamp>,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(CREATE_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.room_uuid.into_uuid())
            .bind(booking.guest_uuid.into_uuid())
            .bind(SqlxDate::from(booking.start_date))
            .bind(SqlxDate::from(booking.end_date))
            .bind(nights_i32(quote.breakdown.nights)?)
            .bind(cents_i64(quote.amount_cents, "total_price_cents")?)
            .bind(&quote.currency)
            .bind(status.as_str())
            .bind(expires_at.map(SqlxTimestamp::from))
            .bind(
                booking
                    .identity_document_uuid
                    .map(IdentityDocumentUuid::into_uuid),
            )
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(GET_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a booking and take its row lock; transitions serialize on this.
    pub(crate) async fn get_booking_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(GET_BOOKING_FOR_UPDATE_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Option<Booking>, sqlx::Error> {
        query_as::<Postgres, Booking>(FIND_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_for_guest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        guest: GuestUuid,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        query_as::<Postgres, Booking>(LIST_FOR_GUEST_SQL)
            .bind(guest.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Pending holds still inside their expiry window, oldest first.
    pub(crate) async fn list_pending(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        query_as::<Postgres, Booking>(LIST_PENDING_SQL)
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await
    }

    /// Physically expire stale pending holds for one room.
    ///
    /// Runs inside the hold-creation transaction so a lazily-expired hold can
    /// never trip the exclusion constraint against a new insert.
    pub(crate) async fn expire_stale_holds(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(EXPIRE_STALE_HOLDS_SQL)
            .bind(room.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Physically expire stale pending holds across all rooms (reaper).
    pub(crate) async fn reap_expired(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REAP_EXPIRED_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn insert_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: &NewPayment,
    ) -> Result<Payment, sqlx::Error> {
        query_as::<Postgres, Payment>(INSERT_PAYMENT_SQL)
            .bind(payment.uuid.into_uuid())
            .bind(payment.booking_uuid.into_uuid())
            .bind(cents_i64(payment.amount_cents, "amount_cents")?)
            .bind(&payment.reference)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn add_paid_amount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        amount_cents: u64,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(ADD_PAID_AMOUNT_SQL)
            .bind(booking.into_uuid())
            .bind(cents_i64(amount_cents, "amount_cents")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn confirm_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(CONFIRM_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn cancel_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(CANCEL_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_expired(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<Booking, sqlx::Error> {
        query_as::<Postgres, Booking>(MARK_EXPIRED_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

fn cents_i64(value: u64, index: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn nights_i32(value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "nights".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Booking {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status_raw: String = row.try_get("status")?;

        let status = BookingStatus::parse(&status_raw).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown booking status: {status_raw}").into(),
        })?;

        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            room_uuid: RoomUuid::from_uuid(row.try_get("room_uuid")?),
            guest_uuid: GuestUuid::from_uuid(row.try_get("guest_uuid")?),
            start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
            nights: u32_column(row, "nights")?,
            total_price_cents: u64_column(row, "total_price_cents")?,
            currency: row.try_get("currency")?,
            status,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            amount_paid_cents: u64_column(row, "amount_paid_cents")?,
            identity_document_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("identity_document_uuid")?
                .map(IdentityDocumentUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Payment {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            booking_uuid: BookingUuid::from_uuid(row.try_get("booking_uuid")?),
            amount_cents: u64_column(row, "amount_cents")?,
            reference: row.try_get("reference")?,
            received_at: row.try_get::<SqlxTimestamp, _>("received_at")?.to_jiff(),
        })
    }
}

fn u64_column(row: &PgRow, index: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(index)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn u32_column(row: &PgRow, index: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(index)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}
