//! Availability Models

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{bookings::models::BookingUuid, rooms::models::RoomUuid},
    uuids::TypedUuid,
};

/// Availability Window UUID
pub type WindowUuid = TypedUuid<AvailabilityWindow>;

/// Window kind: whether the range is offered or withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Available,
    Blocked,
}

impl WindowKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Blocked => "blocked",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// Availability Window Model
///
/// A host/admin-declared `[start_date, end_date)` range. Blocked windows make
/// the room unavailable regardless of bookings.
#[derive(Debug, Clone)]
pub struct AvailabilityWindow {
    pub uuid: WindowUuid,
    pub room_uuid: RoomUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub kind: WindowKind,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// New Availability Window Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewWindow {
    pub uuid: WindowUuid,
    pub room_uuid: RoomUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub kind: WindowKind,
    pub reason: Option<String>,
}

/// Why a date range is not bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// `start >= end` — the interval contains no nights.
    InvalidRange,

    /// The stay would begin before today.
    InPast,

    /// An active (`confirmed` or unexpired `pending`) booking overlaps.
    Conflict { booking: BookingUuid },

    /// A host-declared blocked window overlaps.
    Blocked { window: WindowUuid },
}

/// Answer from the availability index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(UnavailableReason),
}

impl Availability {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}
