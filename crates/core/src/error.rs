//! Booking error model.

use thiserror::Error;

/// Result type used across the booking domain.
pub type BookingResult<T> = Result<T, BookingError>;

/// Domain-level booking error.
///
/// Every variant is recoverable and reported to the immediate caller. A
/// failed operation leaves catalog state exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookingError {
    /// Hour or minute outside `0..=23` / `0..=59` when building a query instant.
    #[error("invalid time of day {hour:02}:{minute:02} (hour must be 0..23, minute 0..59)")]
    InvalidTimeOfDay { hour: u32, minute: u32 },

    /// No venue registered under the given name.
    #[error("venue not found: {0}")]
    VenueNotFound(String),

    /// No show matches the title/day, or the selector matched nothing.
    #[error("show not found for '{title}': {reason}")]
    ShowNotFound { title: String, reason: String },

    /// A seat identifier failed to decode for the show's capacity.
    #[error("invalid seat identifier: {0}")]
    InvalidUnitIdentifier(String),

    /// A seat identifier decoded fine but the seat is already taken.
    #[error("seat unavailable: {0}")]
    UnitUnavailable(String),

    /// A reservation was requested with zero seat identifiers.
    #[error("reservation request contains no seats")]
    EmptyRequest,

    /// Venue capacity is zero or above the supported maximum.
    #[error("invalid capacity: {0}")]
    InvalidCapacity(usize),

    /// Prices must be finite and non-negative.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),

    #[error("title cannot be empty")]
    InvalidTitle,

    #[error("venue name cannot be empty")]
    InvalidVenueName,
}

impl BookingError {
    pub fn show_not_found(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShowNotFound {
            title: title.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_unit(id: impl Into<String>) -> Self {
        Self::InvalidUnitIdentifier(id.into())
    }

    pub fn unavailable(id: impl Into<String>) -> Self {
        Self::UnitUnavailable(id.into())
    }

    pub fn venue_not_found(name: impl Into<String>) -> Self {
        Self::VenueNotFound(name.into())
    }

    /// Stable machine-readable code for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidTimeOfDay { .. } => "invalid_time_of_day",
            BookingError::VenueNotFound(_) => "venue_not_found",
            BookingError::ShowNotFound { .. } => "show_not_found",
            BookingError::InvalidUnitIdentifier(_) => "invalid_unit_identifier",
            BookingError::UnitUnavailable(_) => "unit_unavailable",
            BookingError::EmptyRequest => "empty_request",
            BookingError::InvalidCapacity(_) => "invalid_capacity",
            BookingError::InvalidPrice(_) => "invalid_price",
            BookingError::InvalidTitle => "invalid_title",
            BookingError::InvalidVenueName => "invalid_venue_name",
        }
    }
}
