//! Booking configuration.
//!
//! Precedence (lowest to highest): compiled defaults → environment → explicit
//! overrides applied by the caller (e.g. CLI flags).

use boxoffice_core::{BookingError, BookingResult};
use boxoffice_inventory::MAX_VENUE_CAPACITY;

/// Seats per show for venues created without an explicit capacity.
pub const DEFAULT_VENUE_CAPACITY: usize = 20;

/// Environment variable overriding [`DEFAULT_VENUE_CAPACITY`].
pub const DEFAULT_CAPACITY_ENV: &str = "BOXOFFICE_DEFAULT_CAPACITY";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// Capacity used when `add_show` implicitly creates a venue.
    pub default_capacity: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_VENUE_CAPACITY,
        }
    }
}

impl BookingConfig {
    /// Defaults layered with the environment.
    pub fn from_env() -> Self {
        Self::default().apply_env_value(std::env::var(DEFAULT_CAPACITY_ENV).ok().as_deref())
    }

    /// Override the default capacity. Must lie in `1..=MAX_VENUE_CAPACITY`.
    pub fn with_default_capacity(mut self, capacity: usize) -> BookingResult<Self> {
        if !valid_capacity(capacity) {
            return Err(BookingError::InvalidCapacity(capacity));
        }
        self.default_capacity = capacity;
        Ok(self)
    }

    fn apply_env_value(self, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return self;
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if valid_capacity(n) => Self {
                default_capacity: n,
            },
            _ => {
                tracing::warn!(
                    var = DEFAULT_CAPACITY_ENV,
                    value = raw,
                    "ignoring invalid default capacity"
                );
                self
            }
        }
    }
}

fn valid_capacity(capacity: usize) -> bool {
    (1..=MAX_VENUE_CAPACITY).contains(&capacity)
}
