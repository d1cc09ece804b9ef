//! Booking Models

use jiff::{Timestamp, civil::Date};

use crate::{domain::rooms::models::RoomUuid, uuids::TypedUuid};

/// Booking UUID
pub type BookingUuid = TypedUuid<Booking>;

/// Guest principal marker.
#[derive(Debug)]
pub struct Guest;

/// Guest UUID
pub type GuestUuid = TypedUuid<Guest>;

/// Identity document reference marker. Storage of the document itself is an
/// external collaborator; bookings only carry the reference.
#[derive(Debug)]
pub struct IdentityDocument;

/// Identity document UUID
pub type IdentityDocumentUuid = TypedUuid<IdentityDocument>;

/// Payment UUID
pub type PaymentUuid = TypedUuid<Payment>;

/// Booking lifecycle states.
///
/// `pending` is the only non-terminal state. A pending hold past its
/// `expires_at` reads as `expired` (lazy expiry) even before any physical
/// transition is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
}

impl BookingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Derived payment progress, computed from the ledger total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl PaymentState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
        }
    }
}

/// Booking Model
///
/// `total_price_cents` is frozen at hold creation; `amount_paid_cents`
/// accumulates from the payments ledger. Bookings are never deleted, only
/// status-transitioned.
#[derive(Debug, Clone)]
pub struct Booking {
    pub uuid: BookingUuid,
    pub room_uuid: RoomUuid,
    pub guest_uuid: GuestUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub nights: u32,
    pub total_price_cents: u64,
    pub currency: String,
    pub status: BookingStatus,
    pub expires_at: Option<Timestamp>,
    pub amount_paid_cents: u64,
    pub identity_document_uuid: Option<IdentityDocumentUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Effective status at `now`, applying lazy expiry to stale holds.
    #[must_use]
    pub fn status_at(&self, now: Timestamp) -> BookingStatus {
        if self.status == BookingStatus::Pending
            && self.expires_at.is_some_and(|expires_at| expires_at <= now)
        {
            return BookingStatus::Expired;
        }

        self.status
    }

    /// Payment progress derived from the accumulated ledger amount.
    #[must_use]
    pub fn payment_state(&self) -> PaymentState {
        if self.amount_paid_cents == 0 {
            PaymentState::Unpaid
        } else if self.amount_paid_cents < self.total_price_cents {
            PaymentState::PartiallyPaid
        } else {
            PaymentState::Paid
        }
    }
}

/// New Booking Model
///
/// The client-supplied `uuid` doubles as the idempotency key: replaying a
/// create with the same uuid and identical details returns the stored hold.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub uuid: BookingUuid,
    pub room_uuid: RoomUuid,
    pub guest_uuid: GuestUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub identity_document_uuid: Option<IdentityDocumentUuid>,
}

impl NewBooking {
    /// Whether an existing booking is a replay of this request.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        self.room_uuid == booking.room_uuid
            && self.guest_uuid == booking.guest_uuid
            && self.start_date == booking.start_date
            && self.end_date == booking.end_date
            && self.identity_document_uuid == booking.identity_document_uuid
    }
}

/// Payment ledger entry. Append-only.
#[derive(Debug, Clone)]
pub struct Payment {
    pub uuid: PaymentUuid,
    pub booking_uuid: BookingUuid,
    pub amount_cents: u64,
    pub reference: String,
    pub received_at: Timestamp,
}

/// New payment ledger entry.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub uuid: PaymentUuid,
    pub booking_uuid: BookingUuid,
    pub amount_cents: u64,
    pub reference: String,
}

/// Outcome of hold creation.
#[derive(Debug, Clone)]
pub struct CreatedHold {
    pub booking: Booking,

    /// True when an identical request had already created this hold.
    pub replayed: bool,
}

/// Outcome of a confirm-payment call.
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    pub booking: Booking,

    /// True when the booking was already in a terminal state and the call
    /// changed nothing.
    pub already_terminal: bool,
}

/// Outcome of a cancellation.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    pub booking: Booking,

    /// True when the booking was already in a terminal state and the call
    /// changed nothing.
    pub already_terminal: bool,
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn pending_booking(expires_at: Option<Timestamp>) -> Booking {
        Booking {
            uuid: BookingUuid::new(),
            room_uuid: RoomUuid::new(),
            guest_uuid: GuestUuid::new(),
            start_date: "2030-06-01".parse().expect("valid date"),
            end_date: "2030-06-03".parse().expect("valid date"),
            nights: 2,
            total_price_cents: 20_000,
            currency: "USD".to_string(),
            status: BookingStatus::Pending,
            expires_at,
            amount_paid_cents: 0,
            identity_document_uuid: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn pending_hold_past_expiry_reads_as_expired() {
        let now = Timestamp::now();
        let booking = pending_booking(Some(now - SignedDuration::from_mins(1)));

        assert_eq!(booking.status_at(now), BookingStatus::Expired);
    }

    #[test]
    fn pending_hold_before_expiry_reads_as_pending() {
        let now = Timestamp::now();
        let booking = pending_booking(Some(now + SignedDuration::from_mins(5)));

        assert_eq!(booking.status_at(now), BookingStatus::Pending);
    }

    #[test]
    fn payment_state_tracks_ledger_total() {
        let mut booking = pending_booking(None);

        assert_eq!(booking.payment_state(), PaymentState::Unpaid);

        booking.amount_paid_cents = 10_000;
        assert_eq!(booking.payment_state(), PaymentState::PartiallyPaid);

        booking.amount_paid_cents = 20_000;
        assert_eq!(booking.payment_state(), PaymentState::Paid);
    }
}
