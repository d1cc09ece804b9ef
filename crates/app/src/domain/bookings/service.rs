//! Bookings service.
//!
//! Owns the reservation-hold state machine. Every transition runs inside a
//! transaction and takes the booking's row lock first; hold creation relies
//! on the exclusion constraint over active bookings for the no-double-booking
//! invariant rather than a check-then-insert.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp, civil::Date};
use mockall::automock;
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        availability::{
            PgAvailabilityRepository,
            range::{DateRange, today_utc},
        },
        bookings::{
            errors::{BookingsServiceError, StayFault},
            models::{
                Booking, BookingStatus, BookingUuid, CancelOutcome, ConfirmOutcome, CreatedHold,
                GuestUuid, NewBooking, NewPayment, PaymentState, PaymentUuid,
            },
            repository::PgBookingsRepository,
        },
        pricing::{self, Quote},
        rooms::{PgRoomsRepository, models::RoomUuid},
    },
    notify::Notifier,
};

/// Tunables for the hold lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct BookingSettings {
    /// How long a pending hold reserves its dates before lazy expiry.
    pub hold_duration: SignedDuration,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            hold_duration: SignedDuration::from_mins(15),
        }
    }
}

#[derive(Clone)]
pub struct PgBookingsService {
    db: Db,
    repository: PgBookingsRepository,
    rooms: PgRoomsRepository,
    availability: PgAvailabilityRepository,
    notifier: Arc<dyn Notifier>,
    settings: BookingSettings,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>, settings: BookingSettings) -> Self {
        Self {
            db,
            repository: PgBookingsRepository::new(),
            rooms: PgRoomsRepository::new(),
            availability: PgAvailabilityRepository::new(),
            notifier,
            settings,
        }
    }

    async fn notify_confirmed(&self, booking: &Booking) {
        // Best-effort: the transition has already committed.
        if let Err(error) = self.notifier.booking_confirmed(booking).await {
            warn!(
                booking = %booking.uuid,
                "failed to deliver confirmation notification: {error}"
            );
        }
    }
}

fn validate_range(
    start: Date,
    end: Date,
    now: Timestamp,
) -> Result<DateRange, BookingsServiceError> {
    let range = DateRange::new(start, end)
        .map_err(|_| BookingsServiceError::InvalidRange(StayFault::Empty))?;

    if range.starts_before(today_utc(now)) {
        return Err(BookingsServiceError::InvalidRange(StayFault::InPast));
    }

    Ok(range)
}

#[async_trait]
impl BookingsService for PgBookingsService {
    async fn create_hold(
        &self,
        hold: NewBooking,
        now: Timestamp,
    ) -> Result<CreatedHold, BookingsServiceError> {
        let range = validate_range(hold.start_date, hold.end_date, now)?;

        let mut tx = self.db.begin().await?;

        // The client-supplied uuid is the idempotency key: a replay with
        // identical details returns the stored hold instead of re-inserting.
        if let Some(existing) = self.repository.find_booking(&mut tx, hold.uuid).await? {
            if hold.matches(&existing) {
                return Ok(CreatedHold {
                    booking: existing,
                    replayed: true,
                });
            }

            return Err(BookingsServiceError::AlreadyExists);
        }

        let room = self.rooms.get_room(&mut tx, hold.room_uuid).await?;

        // The price is recomputed here, inside the insert transaction. A
        // client-displayed total is advisory only.
        let quote = pricing::quote(&room, &range)?;

        // Stale holds already read as expired; record that before inserting
        // so they cannot trip the exclusion constraint.
        self.repository
            .expire_stale_holds(&mut tx, hold.room_uuid, now)
            .await?;

        if self
            .availability
            .find_blocking_window(&mut tx, hold.room_uuid, &range)
            .await?
            .is_some()
        {
            return Err(BookingsServiceError::Conflict);
        }

        let (status, expires_at) = if room.instant_book {
            (BookingStatus::Confirmed, None)
        } else {
            (
                BookingStatus::Pending,
                Some(now + self.settings.hold_duration),
            )
        };

        let booking = self
            .repository
            .create_booking(&mut tx, &hold, &quote, status, expires_at)
            .await?;

        tx.commit().await?;

        if booking.status == BookingStatus::Confirmed {
            self.notify_confirmed(&booking).await;
        }

        Ok(CreatedHold {
            booking,
            replayed: false,
        })
    }

    async fn quote_stay(
        &self,
        room: RoomUuid,
        start: Date,
        end: Date,
        now: Timestamp,
    ) -> Result<Quote, BookingsServiceError> {
        let range = validate_range(start, end, now)?;

        let mut tx = self.db.begin().await?;

        let room = self.rooms.get_room(&mut tx, room).await?;

        tx.commit().await?;

        Ok(pricing::quote(&room, &range)?)
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<Booking, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let booking = self.repository.get_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(booking)
    }

    async fn list_mine(&self, guest: GuestUuid) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_for_guest(&mut tx, guest).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn list_pending_for_review(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_pending(&mut tx, now).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn confirm_payment(
        &self,
        booking: BookingUuid,
        amount_cents: u64,
        reference: String,
        now: Timestamp,
    ) -> Result<ConfirmOutcome, BookingsServiceError> {
        if amount_cents == 0 {
            return Err(BookingsServiceError::InvalidPayment);
        }

        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_booking_for_update(&mut tx, booking)
            .await?;

        match current.status_at(now) {
            BookingStatus::Confirmed => {
                // Idempotent: confirming a confirmed booking changes nothing.
                Ok(ConfirmOutcome {
                    booking: current,
                    already_terminal: true,
                })
            }
            BookingStatus::Cancelled => {
                warn!(booking = %current.uuid, "confirm called on cancelled booking");

                Ok(ConfirmOutcome {
                    booking: current,
                    already_terminal: true,
                })
            }
            BookingStatus::Expired => {
                if current.status == BookingStatus::Pending {
                    // Lazily expired: record the transition, then report it.
                    self.repository.mark_expired(&mut tx, booking).await?;
                    tx.commit().await?;

                    return Err(BookingsServiceError::HoldExpired);
                }

                warn!(booking = %current.uuid, "confirm called on expired booking");

                Ok(ConfirmOutcome {
                    booking: current,
                    already_terminal: true,
                })
            }
            BookingStatus::Pending => {
                self.repository
                    .insert_payment(
                        &mut tx,
                        &NewPayment {
                            uuid: PaymentUuid::new(),
                            booking_uuid: booking,
                            amount_cents,
                            reference,
                        },
                    )
                    .await?;

                let updated = self
                    .repository
                    .add_paid_amount(&mut tx, booking, amount_cents)
                    .await?;

                let updated = if updated.payment_state() == PaymentState::Paid {
                    self.repository.confirm_booking(&mut tx, booking).await?
                } else {
                    updated
                };

                tx.commit().await?;

                if updated.status == BookingStatus::Confirmed {
                    self.notify_confirmed(&updated).await;
                }

                Ok(ConfirmOutcome {
                    booking: updated,
                    already_terminal: false,
                })
            }
        }
    }

    async fn cancel(
        &self,
        booking: BookingUuid,
        guest: GuestUuid,
        now: Timestamp,
    ) -> Result<CancelOutcome, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_booking_for_update(&mut tx, booking)
            .await?;

        if current.guest_uuid != guest {
            // Other guests' bookings are invisible to the caller.
            return Err(BookingsServiceError::NotFound);
        }

        match current.status_at(now) {
            BookingStatus::Pending => {
                let cancelled = self.repository.cancel_booking(&mut tx, booking).await?;

                tx.commit().await?;

                Ok(CancelOutcome {
                    booking: cancelled,
                    already_terminal: false,
                })
            }
            BookingStatus::Confirmed => Err(BookingsServiceError::NotCancellable),
            BookingStatus::Cancelled => Ok(CancelOutcome {
                booking: current,
                already_terminal: true,
            }),
            BookingStatus::Expired => {
                if current.status == BookingStatus::Pending {
                    let expired = self.repository.mark_expired(&mut tx, booking).await?;
                    tx.commit().await?;

                    return Ok(CancelOutcome {
                        booking: expired,
                        already_terminal: true,
                    });
                }

                Ok(CancelOutcome {
                    booking: current,
                    already_terminal: true,
                })
            }
        }
    }

    async fn reap_expired(&self, now: Timestamp) -> Result<u64, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let reaped = self.repository.reap_expired(&mut tx, now).await?;

        tx.commit().await?;

        Ok(reaped)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Create a pending hold (or a confirmed booking for instant-book rooms).
    ///
    /// Atomic with respect to the no-double-booking invariant: a lost
    /// availability race surfaces as `Conflict`.
    async fn create_hold(
        &self,
        hold: NewBooking,
        now: Timestamp,
    ) -> Result<CreatedHold, BookingsServiceError>;

    /// Quote a stay without creating anything.
    async fn quote_stay(
        &self,
        room: RoomUuid,
        start: Date,
        end: Date,
        now: Timestamp,
    ) -> Result<Quote, BookingsServiceError>;

    /// Retrieve a single booking.
    async fn get_booking(&self, booking: BookingUuid) -> Result<Booking, BookingsServiceError>;

    /// A guest's bookings, oldest first.
    async fn list_mine(&self, guest: GuestUuid) -> Result<Vec<Booking>, BookingsServiceError>;

    /// Pending holds awaiting payment review, excluding lazily-expired ones.
    async fn list_pending_for_review(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Booking>, BookingsServiceError>;

    /// Record a received payment and confirm the hold once fully paid.
    async fn confirm_payment(
        &self,
        booking: BookingUuid,
        amount_cents: u64,
        reference: String,
        now: Timestamp,
    ) -> Result<ConfirmOutcome, BookingsServiceError>;

    /// Guest-initiated cancellation, valid only while the hold is pending.
    async fn cancel(
        &self,
        booking: BookingUuid,
        guest: GuestUuid,
        now: Timestamp,
    ) -> Result<CancelOutcome, BookingsServiceError>;

    /// Physically expire stale pending holds. Optional convenience; expiry
    /// is lazy at read time regardless.
    async fn reap_expired(&self, now: Timestamp) -> Result<u64, BookingsServiceError>;
}
