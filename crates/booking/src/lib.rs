//! Booking service: a directory of venues over the per-venue catalogs.
//!
//! Venue lookup and cross-venue queries live here; seat allocation and its
//! locking live in `boxoffice-inventory`.

pub mod config;
pub mod registry;
pub mod service;

pub use config::{BookingConfig, DEFAULT_CAPACITY_ENV, DEFAULT_VENUE_CAPACITY};
pub use registry::InMemoryBookingService;
pub use service::BookingService;
