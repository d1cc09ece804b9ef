//! Rooms Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::rooms::models::{NewRoom, Room, RoomUpdate, RoomUuid};

const LIST_ROOMS_SQL: &str = include_str!("sql/list_rooms.sql");
const GET_ROOM_SQL: &str = include_str!("sql/get_room.sql");
const CREATE_ROOM_SQL: &str = include_str!("sql/create_room.sql");
const UPDATE_ROOM_SQL: &str = include_str!("sql/update_room.sql");
const DELETE_ROOM_SQL: &str = include_str!("sql/delete_room.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRoomsRepository;

impl PgRoomsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_rooms(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Room>, sqlx::Error> {
        query_as::<Postgres, Room>(LIST_ROOMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<Room, sqlx::Error> {
        query_as::<Postgres, Room>(GET_ROOM_SQL)
            .bind(room.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: &NewRoom,
    ) -> Result<Room, sqlx::Error> {
        query_as::<Postgres, Room>(CREATE_ROOM_SQL)
            .bind(room.uuid.into_uuid())
            .bind(&room.title)
            .bind(nights_i16(room.capacity)?)
            .bind(cents_i64(room.nightly_price_cents)?)
            .bind(&room.currency)
            .bind(nights_i16(room.min_nights)?)
            .bind(nights_i16(room.max_nights)?)
            .bind(&room.location)
            .bind(&room.amenities)
            .bind(room.instant_book)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
        update: &RoomUpdate,
    ) -> Result<Room, sqlx::Error> {
        query_as::<Postgres, Room>(UPDATE_ROOM_SQL)
            .bind(room.into_uuid())
            .bind(&update.title)
            .bind(nights_i16(update.capacity)?)
            .bind(cents_i64(update.nightly_price_cents)?)
            .bind(&update.currency)
            .bind(nights_i16(update.min_nights)?)
            .bind(nights_i16(update.max_nights)?)
            .bind(&update.location)
            .bind(&update.amenities)
            .bind(update.instant_book)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_room(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room: RoomUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ROOM_SQL)
            .bind(room.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn cents_i64(value: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "nightly_price_cents".to_string(),
        source: Box::new(e),
    })
}

fn nights_i16(value: u16) -> Result<i16, sqlx::Error> {
    i16::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "nights".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Room {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("nightly_price_cents")?;

        let nightly_price_cents =
            u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
                index: "nightly_price_cents".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: RoomUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            capacity: u16_column(row, "capacity")?,
            nightly_price_cents,
            currency: row.try_get("currency")?,
            min_nights: u16_column(row, "min_nights")?,
            max_nights: u16_column(row, "max_nights")?,
            location: row.try_get("location")?,
            amenities: row.try_get("amenities")?,
            instant_book: row.try_get("instant_book")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

fn u16_column(row: &PgRow, index: &str) -> sqlx::Result<u16> {
    let value: i16 = row.try_get(index)?;

    u16::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}
