//! `boxoffice-core`: shared building blocks for the booking crates.
//!
//! This crate contains **pure domain** primitives shared by the venue catalog
//! and the booking service: the error taxonomy, local calendar arithmetic and
//! identifiers. No locking, no IO.

pub mod calendar;
pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{BookingError, BookingResult};
pub use id::ReservationId;
