//! TOML schedule seeding.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;

use boxoffice_booking::BookingService;
use boxoffice_core::calendar;

/// Schedule file layout: `[[venue]]` tables with nested `[[venue.show]]`.
#[derive(Debug, Deserialize, Default)]
pub struct Schedule {
    #[serde(default, rename = "venue")]
    pub venues: Vec<VenueEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VenueEntry {
    pub name: String,
    /// Falls back to the configured default capacity.
    pub capacity: Option<usize>,
    #[serde(default, rename = "show")]
    pub shows: Vec<ShowEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ShowEntry {
    pub title: String,
    /// Local start time, `HH:MM`.
    pub time: String,
    /// Local date; today when absent.
    pub date: Option<NaiveDate>,
    pub price: f64,
}

impl Schedule {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading schedule {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing schedule {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Register every venue and show. Returns the number of shows added.
    pub fn apply(&self, service: &impl BookingService, today: NaiveDate) -> Result<usize> {
        let mut added = 0;
        for venue in &self.venues {
            if let Some(capacity) = venue.capacity {
                service
                    .add_venue(&venue.name, capacity)
                    .with_context(|| format!("venue '{}'", venue.name))?;
            }
            for show in &venue.shows {
                let (hour, minute) = parse_hh_mm(&show.time)?;
                let start = calendar::date_at(show.date.unwrap_or(today), hour, minute)?;
                service
                    .add_show(&venue.name, &show.title, start, show.price)
                    .with_context(|| format!("show '{}' at venue '{}'", show.title, venue.name))?;
                added += 1;
            }
        }
        tracing::info!(venues = self.venues.len(), shows = added, "schedule loaded");
        Ok(added)
    }
}

/// `"HH:MM"` to `(hour, minute)`. Range checks happen when the time is
/// combined with a date.
pub fn parse_hh_mm(raw: &str) -> Result<(u32, u32)> {
    let (h, m) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| anyhow!("time '{raw}' is not HH:MM"))?;
    let hour = h.parse().with_context(|| format!("hour in '{raw}'"))?;
    let minute = m.parse().with_context(|| format!("minute in '{raw}'"))?;
    Ok((hour, minute))
}
