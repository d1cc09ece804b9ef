//! Availability

pub mod errors;
pub mod models;
pub mod range;
mod repository;
pub mod service;

pub(crate) use repository::PgAvailabilityRepository;

pub use errors::AvailabilityServiceError;
pub use service::*;
