//! Notification events.
//!
//! Delivery (email, webhooks) is an external collaborator; the domain only
//! emits events through this trait. Notifications are best-effort: they run
//! after the owning transaction commits and a failure never rolls back the
//! state transition.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::domain::bookings::models::Booking;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A booking reached `confirmed`.
    async fn booking_confirmed(&self, booking: &Booking) -> Result<(), NotifyError>;
}

/// Notifier that records events in the structured log.
///
/// Stands in for the real delivery channel; downstream systems tail the log
/// or replace this implementation.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn booking_confirmed(&self, booking: &Booking) -> Result<(), NotifyError> {
        info!(
            booking = %booking.uuid,
            room = %booking.room_uuid,
            guest = %booking.guest_uuid,
            "booking confirmed"
        );

        Ok(())
    }
}
