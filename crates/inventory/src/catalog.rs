//! Per-venue show catalog and the atomic seat reservation transaction.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info, warn};

use boxoffice_core::{BookingError, BookingResult, Entity, ReservationId, calendar};

use crate::reservation::{Reservation, ShowSelector};
use crate::seat;
use crate::show::{AvailabilitySnapshot, ShowRecord};

/// Largest seat count a venue may declare. Every show allocates one
/// occupancy slot per seat up front.
pub const MAX_VENUE_CAPACITY: usize = 100_000;

/// In-memory catalog of shows for a single venue.
///
/// ## Concurrency
///
/// One `RwLock` per venue guards the show list and every show's occupancy.
/// Queries take the shared guard, so they never observe half of a commit.
/// `add_show` and the validate-and-commit phase of `reserve` take the
/// exclusive guard. Venues never share a lock.
///
/// ## Day semantics
///
/// Day-scoped queries compare local calendar dates; the time-of-day of the
/// `day` argument is ignored.
#[derive(Debug)]
pub struct VenueCatalog {
    name: String,
    capacity: usize,
    shows: RwLock<Vec<ShowRecord>>,
}

impl VenueCatalog {
    pub fn new(name: impl Into<String>, capacity: usize) -> BookingResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BookingError::InvalidVenueName);
        }
        if !(1..=MAX_VENUE_CAPACITY).contains(&capacity) {
            return Err(BookingError::InvalidCapacity(capacity));
        }
        Ok(Self {
            name,
            capacity,
            shows: RwLock::new(Vec::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn show_count(&self) -> usize {
        self.read_shows().len()
    }

    /// Append a show with every seat free. Identical title/start pairs are
    /// kept as independent shows.
    pub fn add_show(&self, title: impl Into<String>, start: DateTime<Local>, price: f64) -> BookingResult<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BookingError::InvalidTitle);
        }
        if !price.is_finite() || price < 0.0 {
            return Err(BookingError::InvalidPrice(price));
        }

        debug!(venue = %self.name, title = %title, start = %start, price, "adding show");
        self.write_shows()
            .push(ShowRecord::new(title, start, price, self.capacity));
        Ok(())
    }

    pub fn has_show_on_day(&self, title: &str, day: &DateTime<Local>) -> bool {
        let day = calendar::local_day(day);
        self.read_shows().iter().any(|s| s.is_title_on(title, day))
    }

    /// Free seat identifiers of the first show matching `title` and `start`
    /// exactly. Empty when there is no such show or it is sold out.
    pub fn free_unit_ids(&self, title: &str, start: &DateTime<Local>) -> Vec<String> {
        self.read_shows()
            .iter()
            .find(|s| s.title() == title && s.start() == start)
            .map(ShowRecord::free_seat_ids)
            .unwrap_or_default()
    }

    /// Distinct titles showing on the day, ascending.
    pub fn titles_on_day(&self, day: &DateTime<Local>) -> Vec<String> {
        let day = calendar::local_day(day);
        self.read_shows()
            .iter()
            .filter(|s| s.local_day() == day)
            .map(|s| s.title().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All shows on the day, in catalog order.
    pub fn shows_on_day(&self, day: &DateTime<Local>) -> Vec<ShowRecord> {
        let day = calendar::local_day(day);
        self.read_shows()
            .iter()
            .filter(|s| s.local_day() == day)
            .cloned()
            .collect()
    }

    pub fn shows_for_title_on_day(&self, title: &str, day: &DateTime<Local>) -> Vec<ShowRecord> {
        let day = calendar::local_day(day);
        self.read_shows()
            .iter()
            .filter(|s| s.is_title_on(title, day))
            .cloned()
            .collect()
    }

    /// Availability of every show of `title` on the day, taken under one
    /// guard so all snapshots describe the same moment. Sold-out shows are
    /// included with an empty seat list. Catalog order.
    pub fn availability(&self, title: &str, day: &DateTime<Local>) -> Vec<AvailabilitySnapshot> {
        let day = calendar::local_day(day);
        self.read_shows()
            .iter()
            .filter(|s| s.is_title_on(title, day))
            .map(ShowRecord::snapshot)
            .collect()
    }

    /// Reserve every seat in `seat_ids` for one show of `title`, or none.
    ///
    /// The show is the one on `target`'s local day picked by `selector`:
    /// exact local hour:minute of `target` for [`ShowSelector::AtTime`], or
    /// rank by start time for [`ShowSelector::Ordinal`]. The request fails
    /// without side effects when it is empty, when no show matches, when any
    /// identifier is invalid for the venue capacity, or when any seat is
    /// already taken (including a seat listed twice).
    pub fn reserve<S: AsRef<str>>(
        &self,
        title: &str,
        target: &DateTime<Local>,
        seat_ids: &[S],
        selector: ShowSelector,
    ) -> BookingResult<Reservation> {
        let span = tracing::info_span!("reserve", venue = %self.name, title = %title, ?selector);
        let _enter = span.enter();

        let outcome = self.try_reserve(title, target, seat_ids, selector);
        match &outcome {
            Ok(r) => info!(
                reservation_id = %r.id,
                start = %r.start,
                seats = ?r.seats,
                "seats reserved"
            ),
            Err(e) => warn!(kind = e.kind(), error = %e, "reservation rejected"),
        }
        outcome
    }

    fn try_reserve<S: AsRef<str>>(
        &self,
        title: &str,
        target: &DateTime<Local>,
        seat_ids: &[S],
        selector: ShowSelector,
    ) -> BookingResult<Reservation> {
        if seat_ids.is_empty() {
            return Err(BookingError::EmptyRequest);
        }

        let day = calendar::local_day(target);
        let at = calendar::local_hour_minute(target);

        // Selection runs under the shared guard only; the position it yields
        // is re-checked once the exclusive guard is held.
        let position = self.select_show(title, day, at, selector)?;

        let mut shows = self.write_shows();
        let show = shows
            .get_mut(position)
            .filter(|s| s.is_title_on(title, day))
            .filter(|s| selector != ShowSelector::AtTime || s.local_hour_minute() == at)
            .ok_or_else(|| BookingError::show_not_found(title, "show changed before commit"))?;

        let mut indices = Vec::with_capacity(seat_ids.len());
        for id in seat_ids {
            let id = id.as_ref();
            let index = seat::decode(id, show.capacity()).ok_or_else(|| BookingError::invalid_unit(id))?;
            let free = show.seat_state(index).is_some_and(|state| state.is_free());
            if !free || indices.contains(&index) {
                return Err(BookingError::unavailable(id));
            }
            indices.push(index);
        }

        show.take_all(&indices);

        Ok(Reservation {
            id: ReservationId::generate(),
            venue: self.name.clone(),
            title: title.to_string(),
            start: *show.start(),
            seats: indices.into_iter().map(seat::encode).collect(),
            price_per_unit: show.price_per_unit(),
        })
    }

    fn select_show(
        &self,
        title: &str,
        day: NaiveDate,
        at: (u32, u32),
        selector: ShowSelector,
    ) -> BookingResult<usize> {
        let shows = self.read_shows();
        let mut candidates: Vec<usize> = shows
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_title_on(title, day))
            .map(|(position, _)| position)
            .collect();

        if candidates.is_empty() {
            return Err(BookingError::show_not_found(title, format!("no show on {day}")));
        }

        match selector {
            ShowSelector::AtTime => candidates
                .into_iter()
                .find(|&p| shows[p].local_hour_minute() == at)
                .ok_or_else(|| {
                    BookingError::show_not_found(title, format!("no show at {:02}:{:02} on {day}", at.0, at.1))
                }),
            ShowSelector::Ordinal(n) => {
                // Stable: equal start times keep catalog order.
                candidates.sort_by(|&a, &b| shows[a].start().cmp(shows[b].start()));
                candidates.get(n.get() - 1).copied().ok_or_else(|| {
                    BookingError::show_not_found(
                        title,
                        format!("show #{n} requested but only {} on {day}", candidates.len()),
                    )
                })
            }
        }
    }

    // A panic while holding the guard cannot leave a half-applied commit:
    // `take_all` runs only after every seat is validated.
    fn read_shows(&self) -> RwLockReadGuard<'_, Vec<ShowRecord>> {
        self.shows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_shows(&self) -> RwLockWriteGuard<'_, Vec<ShowRecord>> {
        self.shows.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Entity for VenueCatalog {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
