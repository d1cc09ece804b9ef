//! Booking Config

use clap::Args;
use jiff::SignedDuration;
use roost_app::domain::bookings::BookingSettings;

/// Booking lifecycle settings.
#[derive(Debug, Args)]
pub struct BookingConfig {
    /// Minutes a pending hold reserves its dates before expiring
    #[arg(long, env = "HOLD_MINUTES", default_value_t = 15)]
    pub hold_minutes: u32,

    /// Seconds between reaper sweeps; 0 disables the background reaper.
    /// Expiry stays lazy at read time either way.
    #[arg(long, env = "REAPER_INTERVAL_SECONDS", default_value_t = 300)]
    pub reaper_interval_seconds: u64,
}

impl BookingConfig {
    /// Domain-level settings derived from this config.
    #[must_use]
    pub fn settings(&self) -> BookingSettings {
        BookingSettings {
            hold_duration: SignedDuration::from_mins(i64::from(self.hold_minutes)),
        }
    }
}
