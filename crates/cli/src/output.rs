//! Text and JSON rendering of command results.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use boxoffice_core::BookingError;
use boxoffice_inventory::{AvailabilitySnapshot, Reservation, ShowRecord};

/// Writes results to stdout and failures to stderr.
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn list(&self, items: &[String]) -> Result<()> {
        if self.json {
            return self.emit(&items);
        }
        if items.is_empty() {
            println!("(none)");
        }
        for item in items {
            println!("{item}");
        }
        Ok(())
    }

    pub fn shows(&self, shows: &[ShowRecord]) -> Result<()> {
        if self.json {
            return self.emit(&shows);
        }
        if shows.is_empty() {
            println!("(no shows)");
        }
        for show in shows {
            println!("{}", show_line(show));
        }
        Ok(())
    }

    pub fn shows_by_venue(&self, by_venue: &BTreeMap<String, Vec<ShowRecord>>) -> Result<()> {
        if self.json {
            return self.emit(by_venue);
        }
        if by_venue.is_empty() {
            println!("(no shows)");
        }
        for (venue, shows) in by_venue {
            println!("{venue}");
            for show in shows {
                println!("  {}", show_line(show));
            }
        }
        Ok(())
    }

    pub fn availability(&self, venue: &str, title: &str, snapshots: &[AvailabilitySnapshot]) -> Result<()> {
        if self.json {
            return self.emit(&json!({
                "venue": venue,
                "title": title,
                "shows": snapshots,
            }));
        }
        if snapshots.is_empty() {
            println!("(no shows of '{title}' at {venue})");
        }
        for snap in snapshots {
            let seats = if snap.seats.is_empty() {
                "sold out".to_string()
            } else {
                snap.seats.join(" ")
            };
            println!("{}  {:>8.2}  {seats}", snap.start.format("%Y-%m-%d %H:%M"), snap.price_per_unit);
        }
        Ok(())
    }

    pub fn reservation(&self, reservation: &Reservation) -> Result<()> {
        if self.json {
            return self.emit(reservation);
        }
        println!(
            "reserved {} for '{}' at {} on {} (reservation {})",
            reservation.seats.join(", "),
            reservation.title,
            reservation.venue,
            reservation.start.format("%Y-%m-%d %H:%M"),
            reservation.id
        );
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Free-form progress line; suppressed in JSON mode.
    pub fn note(&self, line: impl AsRef<str>) {
        if !self.json {
            println!("{}", line.as_ref());
        }
    }

    pub fn error(&self, err: &anyhow::Error) {
        if self.json {
            eprintln!("{}", error_body(err));
        } else {
            eprintln!("error: {err:#}");
        }
    }

    pub fn emit<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn show_line(show: &ShowRecord) -> String {
    let seats = if show.is_sold_out() {
        "sold out".to_string()
    } else {
        format!("{}/{} free", show.free_count(), show.capacity())
    };
    format!(
        "{}  {:<24} {:>8.2}  {seats}",
        show.start().format("%Y-%m-%d %H:%M"),
        show.title(),
        show.price_per_unit(),
    )
}

/// JSON body for a failed command.
pub fn error_body(err: &anyhow::Error) -> serde_json::Value {
    let kind = err
        .downcast_ref::<BookingError>()
        .map(BookingError::kind)
        .unwrap_or("error");
    json!({
        "error": kind,
        "message": format!("{err:#}"),
    })
}
