//! Venue inventory: shows, seats and the reservation transaction.
//!
//! This crate owns the per-venue catalog. Everything here is synchronous and
//! in-memory; the only shared state is each venue's own lock.

pub mod catalog;
pub mod reservation;
pub mod seat;
pub mod show;

pub use catalog::{MAX_VENUE_CAPACITY, VenueCatalog};
pub use reservation::{Reservation, ShowSelector};
pub use seat::SeatState;
pub use show::{AvailabilitySnapshot, ShowKey, ShowRecord};
