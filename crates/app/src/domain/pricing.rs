//! Quote computation.
//!
//! Pricing is a pure function of the room's nightly rate and the stay length.
//! Amounts are always computed here, server-side, from the room row — a
//! client-echoed total is display-only and never trusted.

use thiserror::Error;

use crate::domain::{availability::range::DateRange, rooms::models::Room};

/// A computed price for a room and date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub amount_cents: u64,
    pub currency: String,
    pub breakdown: QuoteBreakdown,
}

/// How the quote amount was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteBreakdown {
    pub nightly_price_cents: u64,
    pub nights: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("stay is shorter than the room minimum of {min_nights} nights")]
    StayTooShort { min_nights: u16 },

    #[error("stay is longer than the room maximum of {max_nights} nights")]
    StayTooLong { max_nights: u16 },

    #[error("price exceeds the representable amount")]
    PriceOverflow,
}

/// Quote a stay: nightly rate × nights, validated against the room's
/// min/max-nights bounds.
///
/// # Errors
///
/// Returns an error when the stay length violates the room's bounds or the
/// total cannot be represented.
pub fn quote(room: &Room, range: &DateRange) -> Result<Quote, PricingError> {
    let nights = range.nights();

    if nights < u32::from(room.min_nights) {
        return Err(PricingError::StayTooShort {
            min_nights: room.min_nights,
        });
    }

    if nights > u32::from(room.max_nights) {
        return Err(PricingError::StayTooLong {
            max_nights: room.max_nights,
        });
    }

    let amount_cents = room
        .nightly_price_cents
        .checked_mul(u64::from(nights))
        .ok_or(PricingError::PriceOverflow)?;

    Ok(Quote {
        amount_cents,
        currency: room.currency.clone(),
        breakdown: QuoteBreakdown {
            nightly_price_cents: room.nightly_price_cents,
            nights,
        },
    })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::rooms::models::{Room, RoomUuid};

    use super::*;

    fn room(nightly_price_cents: u64, min_nights: u16, max_nights: u16) -> Room {
        Room {
            uuid: RoomUuid::new(),
            title: "Garden Room".to_string(),
            capacity: 2,
            nightly_price_cents,
            currency: "USD".to_string(),
            min_nights,
            max_nights,
            location: "Asheville".to_string(),
            amenities: vec![],
            instant_book: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            start.parse().expect("valid start date"),
            end.parse().expect("valid end date"),
        )
        .expect("valid range")
    }

    #[test]
    fn two_nights_at_100_dollars_quotes_200() {
        let quote = quote(&room(10_000, 2, 30), &range("2024-06-01", "2024-06-03"))
            .expect("quote should succeed");

        assert_eq!(quote.amount_cents, 20_000);
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.breakdown.nights, 2);
        assert_eq!(quote.breakdown.nightly_price_cents, 10_000);
    }

    #[test]
    fn stay_below_min_nights_is_rejected() {
        let result = quote(&room(10_000, 2, 30), &range("2024-06-01", "2024-06-02"));

        assert_eq!(result, Err(PricingError::StayTooShort { min_nights: 2 }));
    }

    #[test]
    fn stay_above_max_nights_is_rejected() {
        let result = quote(&room(10_000, 1, 3), &range("2024-06-01", "2024-06-08"));

        assert_eq!(result, Err(PricingError::StayTooLong { max_nights: 3 }));
    }

    #[test]
    fn quote_is_deterministic_for_same_inputs() {
        let room = room(12_345, 1, 30);
        let range = range("2030-01-01", "2030-01-11");

        assert_eq!(quote(&room, &range), quote(&room, &range));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let result = quote(&room(u64::MAX, 1, 30), &range("2024-06-01", "2024-06-03"));

        assert_eq!(result, Err(PricingError::PriceOverflow));
    }
}
