//! Rooms service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::rooms::{
        errors::RoomsServiceError,
        models::{NewRoom, Room, RoomUpdate, RoomUuid},
        repository::PgRoomsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgRoomsService {
    db: Db,
    repository: PgRoomsRepository,
}

impl PgRoomsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRoomsRepository::new(),
        }
    }
}

#[async_trait]
impl RoomsService for PgRoomsService {
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rooms = self.repository.list_rooms(&mut tx).await?;

        tx.commit().await?;

        Ok(rooms)
    }

    async fn get_room(&self, room: RoomUuid) -> Result<Room, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let room = self.repository.get_room(&mut tx, room).await?;

        tx.commit().await?;

        Ok(room)
    }

    async fn create_room(&self, room: NewRoom) -> Result<Room, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_room(&mut tx, &room).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_room(
        &self,
        room: RoomUuid,
        update: RoomUpdate,
    ) -> Result<Room, RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_room(&mut tx, room, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_room(&self, room: RoomUuid) -> Result<(), RoomsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_room(&mut tx, room).await?;

        if rows_affected == 0 {
            return Err(RoomsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait RoomsService: Send + Sync {
    /// Retrieves all rooms that have not been soft-deleted.
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsServiceError>;

    /// Retrieve a single room.
    async fn get_room(&self, room: RoomUuid) -> Result<Room, RoomsServiceError>;

    /// Creates a new room.
    async fn create_room(&self, room: NewRoom) -> Result<Room, RoomsServiceError>;

    /// Updates a room with the given UUID and update.
    async fn update_room(
        &self,
        room: RoomUuid,
        update: RoomUpdate,
    ) -> Result<Room, RoomsServiceError>;

    /// Soft-deletes a room with the given UUID.
    async fn delete_room(&self, room: RoomUuid) -> Result<(), RoomsServiceError>;
}
