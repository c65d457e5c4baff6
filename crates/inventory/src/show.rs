use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use boxoffice_core::{Entity, calendar};

use crate::seat::{self, SeatState};

/// Identity of a show: title and exact start instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShowKey {
    pub title: String,
    pub start: DateTime<Local>,
}

/// One scheduling of a title at a venue, with per-seat occupancy.
///
/// `occupancy.len() == capacity` for the lifetime of the record, and
/// `free_seats` always equals the number of `Free` entries.
#[derive(Debug, Clone, Serialize)]
pub struct ShowRecord {
    #[serde(flatten)]
    key: ShowKey,
    price_per_unit: f64,
    capacity: usize,
    free_seats: usize,
    #[serde(skip)]
    occupancy: Vec<SeatState>,
}

impl ShowRecord {
    pub(crate) fn new(title: String, start: DateTime<Local>, price_per_unit: f64, capacity: usize) -> Self {
        Self {
            key: ShowKey { title, start },
            price_per_unit,
            capacity,
            free_seats: capacity,
            occupancy: vec![SeatState::Free; capacity],
        }
    }

    pub fn title(&self) -> &str {
        &self.key.title
    }

    pub fn start(&self) -> &DateTime<Local> {
        &self.key.start
    }

    pub fn price_per_unit(&self) -> f64 {
        self.price_per_unit
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_count(&self) -> usize {
        self.free_seats
    }

    pub fn is_sold_out(&self) -> bool {
        self.free_seats == 0
    }

    /// Occupancy of the seat at `index`, `None` when out of range.
    pub fn seat_state(&self, index: usize) -> Option<SeatState> {
        self.occupancy.get(index).copied()
    }

    /// Identifiers of all free seats, ascending by index.
    pub fn free_seat_ids(&self) -> Vec<String> {
        self.occupancy
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_free())
            .map(|(index, _)| seat::encode(index))
            .collect()
    }

    /// Point-in-time availability of this show.
    pub fn snapshot(&self) -> AvailabilitySnapshot {
        AvailabilitySnapshot {
            start: self.key.start,
            price_per_unit: self.price_per_unit,
            seats: self.free_seat_ids(),
        }
    }

    pub(crate) fn local_day(&self) -> NaiveDate {
        calendar::local_day(&self.key.start)
    }

    pub(crate) fn local_hour_minute(&self) -> (u32, u32) {
        calendar::local_hour_minute(&self.key.start)
    }

    pub(crate) fn is_title_on(&self, title: &str, day: NaiveDate) -> bool {
        self.key.title == title && self.local_day() == day
    }

    /// Mark every index taken. Callers validate first: each index is in
    /// range, currently free, and listed once.
    pub(crate) fn take_all(&mut self, indices: &[usize]) {
        debug_assert!(indices.iter().all(|&i| self.occupancy[i].is_free()));
        for &index in indices {
            self.occupancy[index] = SeatState::Taken;
        }
        self.free_seats -= indices.len();
    }
}

impl Entity for ShowRecord {
    type Id = ShowKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

/// Two records denote the same show when title and start match exactly.
impl PartialEq for ShowRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ShowRecord {}

/// Free seats of one show at the moment of the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilitySnapshot {
    pub start: DateTime<Local>,
    pub price_per_unit: f64,
    pub seats: Vec<String>,
}
