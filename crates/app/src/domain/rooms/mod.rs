//! Rooms

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgRoomsRepository;

pub use errors::RoomsServiceError;
pub use service::*;
