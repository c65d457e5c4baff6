//! Show selection and reservation receipts.

use std::num::NonZeroUsize;

use chrono::{DateTime, Local};
use serde::Serialize;

use boxoffice_core::{BookingError, BookingResult, ReservationId};

/// How `reserve` picks one show among same-title shows on the target day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShowSelector {
    /// First show (catalog order) starting at the target's exact local hour:minute.
    AtTime,
    /// The n-th show (1-based) of the day, ordered by start.
    Ordinal(NonZeroUsize),
}

impl ShowSelector {
    /// Maps the numeric convention `0 -> AtTime`, `k > 0 -> Ordinal(k)`.
    /// Negative numbers select nothing.
    pub fn from_ordinal(title: &str, ordinal: i64) -> BookingResult<Self> {
        if ordinal == 0 {
            return Ok(ShowSelector::AtTime);
        }
        usize::try_from(ordinal)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(ShowSelector::Ordinal)
            .ok_or_else(|| BookingError::show_not_found(title, format!("invalid show number {ordinal}")))
    }
}

/// Receipt of a committed reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub venue: String,
    pub title: String,
    pub start: DateTime<Local>,
    /// Canonical seat identifiers, in request order.
    pub seats: Vec<String>,
    pub price_per_unit: f64,
}
