use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use boxoffice_core::{BookingError, BookingResult, Entity};
use boxoffice_inventory::{AvailabilitySnapshot, Reservation, ShowRecord, ShowSelector, VenueCatalog};

use crate::config::BookingConfig;
use crate::service::BookingService;

/// In-memory venue directory.
///
/// The registry lock only guards the list of venues. Every operation clones
/// the venue handles it needs and releases the registry guard before
/// touching a venue, so reservations contend on their own venue's lock only.
#[derive(Debug, Default)]
pub struct InMemoryBookingService {
    config: BookingConfig,
    venues: RwLock<Vec<Arc<VenueCatalog>>>,
}

impl InMemoryBookingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BookingConfig) -> Self {
        Self {
            config,
            venues: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Handle to a venue's catalog.
    pub fn venue(&self, name: &str) -> Option<Arc<VenueCatalog>> {
        self.venues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|v| v.id() == name)
            .cloned()
    }

    fn all_venues(&self) -> Vec<Arc<VenueCatalog>> {
        self.venues.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Find `name`, or create it with `capacity` under the write guard.
    /// Returns the venue and whether it was created by this call.
    fn find_or_insert(&self, name: &str, capacity: usize) -> BookingResult<(Arc<VenueCatalog>, bool)> {
        if let Some(existing) = self.venue(name) {
            return Ok((existing, false));
        }

        let mut venues = self.venues.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have created it between the two guards.
        if let Some(existing) = venues.iter().find(|v| v.id() == name) {
            return Ok((Arc::clone(existing), false));
        }

        let venue = Arc::new(VenueCatalog::new(name, capacity)?);
        venues.push(Arc::clone(&venue));
        info!(venue = %name, capacity, "venue registered");
        Ok((venue, true))
    }
}

impl BookingService for InMemoryBookingService {
    fn add_venue(&self, name: &str, capacity: usize) -> BookingResult<bool> {
        let (venue, created) = self.find_or_insert(name, capacity)?;
        if !created {
            debug!(venue = %name, existing_capacity = venue.capacity(), "venue already registered");
        }
        Ok(created)
    }

    fn add_show(&self, venue: &str, title: &str, start: DateTime<Local>, price: f64) -> BookingResult<()> {
        let (venue, _) = self.find_or_insert(venue, self.config.default_capacity)?;
        venue.add_show(title, start, price)
    }

    fn venue_names(&self) -> Vec<String> {
        self.all_venues().iter().map(|v| v.name().to_string()).collect()
    }

    fn list_titles(&self, day: &DateTime<Local>) -> Vec<String> {
        self.all_venues()
            .iter()
            .flat_map(|v| v.titles_on_day(day))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn shows_for_title_by_venue(&self, title: &str, day: &DateTime<Local>) -> BTreeMap<String, Vec<ShowRecord>> {
        self.all_venues()
            .iter()
            .filter_map(|v| {
                let shows = v.shows_for_title_on_day(title, day);
                (!shows.is_empty()).then(|| (v.name().to_string(), shows))
            })
            .collect()
    }

    fn venues_showing_title(&self, title: &str, day: &DateTime<Local>) -> Vec<String> {
        self.all_venues()
            .iter()
            .filter(|v| v.has_show_on_day(title, day))
            .map(|v| v.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn shows_at_venue(&self, venue: &str, day: &DateTime<Local>) -> Vec<ShowRecord> {
        let Some(venue) = self.venue(venue) else {
            return vec![];
        };
        let mut shows = venue.shows_on_day(day);
        shows.sort_by(|a, b| a.start().cmp(b.start()));
        shows
    }

    fn availability(&self, venue: &str, title: &str, day: &DateTime<Local>) -> Vec<AvailabilitySnapshot> {
        let Some(venue) = self.venue(venue) else {
            return vec![];
        };
        let mut snapshots = venue.availability(title, day);
        snapshots.sort_by(|a, b| a.start.cmp(&b.start));
        snapshots
    }

    fn reserve(
        &self,
        venue: &str,
        title: &str,
        target: &DateTime<Local>,
        seat_ids: &[String],
        selector: ShowSelector,
    ) -> BookingResult<Reservation> {
        let catalog = self
            .venue(venue)
            .ok_or_else(|| BookingError::venue_not_found(venue))?;
        catalog.reserve(title, target, seat_ids, selector)
    }
}
