//! Multi-venue booking service contract.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Local};

use boxoffice_core::BookingResult;
use boxoffice_inventory::{AvailabilitySnapshot, Reservation, ShowRecord, ShowSelector};

/// Directory of venues: find a venue by name and delegate to its catalog.
///
/// All `day` arguments are compared by local calendar date; their
/// time-of-day is ignored. Lookups of unknown venues yield empty results,
/// except `reserve`, which reports `VenueNotFound`.
pub trait BookingService: Send + Sync {
    /// Register a venue. Returns `false` (and changes nothing) when a venue
    /// with that name already exists.
    fn add_venue(&self, name: &str, capacity: usize) -> BookingResult<bool>;

    /// Add a show, creating the venue with the default capacity if needed.
    fn add_show(&self, venue: &str, title: &str, start: DateTime<Local>, price: f64) -> BookingResult<()>;

    /// Venue names in registration order.
    fn venue_names(&self) -> Vec<String>;

    /// Distinct titles showing anywhere on the day, ascending.
    fn list_titles(&self, day: &DateTime<Local>) -> Vec<String>;

    /// Venue name to that venue's shows of `title` on the day. Venues
    /// without a match are omitted.
    fn shows_for_title_by_venue(&self, title: &str, day: &DateTime<Local>) -> BTreeMap<String, Vec<ShowRecord>>;

    /// Names of venues showing `title` on the day, ascending.
    fn venues_showing_title(&self, title: &str, day: &DateTime<Local>) -> Vec<String>;

    /// Every show at `venue` on the day, ascending by start.
    fn shows_at_venue(&self, venue: &str, day: &DateTime<Local>) -> Vec<ShowRecord>;

    /// Seat availability for each show of `title` at `venue` on the day,
    /// ascending by start. Sold-out shows are reported with no seats.
    fn availability(&self, venue: &str, title: &str, day: &DateTime<Local>) -> Vec<AvailabilitySnapshot>;

    /// All-or-nothing reservation of `seat_ids` for one show at `venue`.
    fn reserve(
        &self,
        venue: &str,
        title: &str,
        target: &DateTime<Local>,
        seat_ids: &[String],
        selector: ShowSelector,
    ) -> BookingResult<Reservation>;
}

impl<S> BookingService for Arc<S>
where
    S: BookingService + ?Sized,
{
    fn add_venue(&self, name: &str, capacity: usize) -> BookingResult<bool> {
        (**self).add_venue(name, capacity)
    }

    fn add_show(&self, venue: &str, title: &str, start: DateTime<Local>, price: f64) -> BookingResult<()> {
        (**self).add_show(venue, title, start, price)
    }

    fn venue_names(&self) -> Vec<String> {
        (**self).venue_names()
    }

    fn list_titles(&self, day: &DateTime<Local>) -> Vec<String> {
        (**self).list_titles(day)
    }

    fn shows_for_title_by_venue(&self, title: &str, day: &DateTime<Local>) -> BTreeMap<String, Vec<ShowRecord>> {
        (**self).shows_for_title_by_venue(title, day)
    }

    fn venues_showing_title(&self, title: &str, day: &DateTime<Local>) -> Vec<String> {
        (**self).venues_showing_title(title, day)
    }

    fn shows_at_venue(&self, venue: &str, day: &DateTime<Local>) -> Vec<ShowRecord> {
        (**self).shows_at_venue(venue, day)
    }

    fn availability(&self, venue: &str, title: &str, day: &DateTime<Local>) -> Vec<AvailabilitySnapshot> {
        (**self).availability(venue, title, day)
    }

    fn reserve(
        &self,
        venue: &str,
        title: &str,
        target: &DateTime<Local>,
        seat_ids: &[String],
        selector: ShowSelector,
    ) -> BookingResult<Reservation> {
        (**self).reserve(venue, title, target, seat_ids, selector)
    }
}
