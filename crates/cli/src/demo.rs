//! Seeded walkthrough of the reservation rules on a fresh service.

use std::sync::Arc;
use std::thread;

use anyhow::{Result, ensure};
use serde_json::json;

use boxoffice_booking::{BookingConfig, BookingService, InMemoryBookingService};
use boxoffice_core::calendar;
use boxoffice_inventory::ShowSelector;

use crate::output::Printer;

const VENUE: &str = "Apsara";
const TITLE: &str = "Inception";

pub fn run(config: BookingConfig, printer: &Printer) -> Result<()> {
    let service = Arc::new(InMemoryBookingService::with_config(config));
    service.add_venue(VENUE, 6)?;
    let start = calendar::today_at(18, 0)?;
    service.add_show(VENUE, TITLE, start, 12.50)?;

    let free_seats = || {
        service
            .venue(VENUE)
            .map(|v| v.free_unit_ids(TITLE, &start))
            .unwrap_or_default()
    };

    let initial = free_seats();
    printer.note(format!("{VENUE}: '{TITLE}' at 18:00, free: {}", initial.join(" ")));

    let first = service.reserve(VENUE, TITLE, &start, &seat_ids(&["A2", "A3"]), ShowSelector::AtTime)?;
    printer.note(format!("reserved {} ({})", first.seats.join(", "), first.id));

    let rebook = service.reserve(VENUE, TITLE, &start, &seat_ids(&["A3"]), ShowSelector::AtTime);
    ensure!(rebook.is_err(), "A3 was handed out twice");
    if let Err(err) = &rebook {
        printer.note(format!("re-booking A3 rejected: {err}"));
    }

    let racers: Vec<_> = (0..2)
        .map(|_| {
            let service = Arc::clone(&service);
            let ids = seat_ids(&["A4"]);
            thread::spawn(move || service.reserve(VENUE, TITLE, &start, &ids, ShowSelector::AtTime).is_ok())
        })
        .collect();
    let mut winners = 0;
    for racer in racers {
        if racer.join().unwrap_or(false) {
            winners += 1;
        }
    }
    ensure!(winners == 1, "expected exactly one winner for A4, got {winners}");
    printer.note("two threads raced for A4: exactly one succeeded");

    let remaining = free_seats();
    printer.note(format!("free now: {}", remaining.join(" ")));

    if printer.is_json() {
        printer.emit(&json!({
            "venue": VENUE,
            "title": TITLE,
            "start": start,
            "initial_free": initial,
            "first_reservation": first,
            "race_winners": winners,
            "remaining_free": remaining,
        }))?;
    }
    Ok(())
}

fn seat_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
