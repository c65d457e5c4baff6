//! Black-box tests for the venue directory.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use boxoffice_booking::{BookingService, InMemoryBookingService};
use boxoffice_core::{BookingError, calendar};
use boxoffice_inventory::ShowSelector;
use chrono::{DateTime, Local, TimeZone};
use proptest::prelude::*;

fn at(d: u32, h: u32, m: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 7, d, h, m, 0).single().unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Two venues, overlapping titles, one show on another day.
fn multiplex() -> InMemoryBookingService {
    let svc = InMemoryBookingService::new();
    svc.add_venue("Apsara", 6).unwrap();
    svc.add_venue("Rex", 4).unwrap();

    svc.add_show("Apsara", "Inception", at(15, 21, 0), 15.0).unwrap();
    svc.add_show("Apsara", "Inception", at(15, 19, 30), 15.0).unwrap();
    svc.add_show("Apsara", "Tenet", at(15, 17, 0), 11.0).unwrap();
    svc.add_show("Rex", "Inception", at(15, 20, 0), 9.5).unwrap();
    svc.add_show("Rex", "Dune", at(16, 20, 0), 9.5).unwrap();
    svc
}

#[test]
fn list_titles_is_distinct_and_sorted() {
    let svc = multiplex();
    assert_eq!(svc.list_titles(&at(15, 0, 0)), vec!["Inception", "Tenet"]);
    assert_eq!(svc.list_titles(&at(16, 23, 0)), vec!["Dune"]);
    assert!(svc.list_titles(&at(17, 12, 0)).is_empty());
}

#[test]
fn shows_for_title_are_grouped_by_venue() {
    let svc = multiplex();

    let by_venue = svc.shows_for_title_by_venue("Inception", &at(15, 12, 0));
    assert_eq!(by_venue.keys().collect::<Vec<_>>(), vec!["Apsara", "Rex"]);
    assert_eq!(by_venue["Apsara"].len(), 2);
    assert_eq!(by_venue["Rex"].len(), 1);

    let by_venue = svc.shows_for_title_by_venue("Tenet", &at(15, 12, 0));
    assert_eq!(by_venue.keys().collect::<Vec<_>>(), vec!["Apsara"]);
}

#[test]
fn venues_showing_title_are_sorted() {
    let svc = multiplex();
    assert_eq!(svc.venues_showing_title("Inception", &at(15, 1, 0)), vec!["Apsara", "Rex"]);
    assert_eq!(svc.venues_showing_title("Dune", &at(16, 1, 0)), vec!["Rex"]);
    assert!(svc.venues_showing_title("Dune", &at(15, 1, 0)).is_empty());
}

#[test]
fn shows_at_venue_are_ordered_by_start() {
    let svc = multiplex();
    let starts: Vec<_> = svc
        .shows_at_venue("Apsara", &at(15, 0, 0))
        .iter()
        .map(|s| calendar::local_hour_minute(s.start()))
        .collect();
    assert_eq!(starts, vec![(17, 0), (19, 30), (21, 0)]);
}

#[test]
fn availability_is_sorted_and_keeps_sold_out_shows() {
    let svc = multiplex();
    svc.reserve(
        "Rex",
        "Inception",
        &at(15, 20, 0),
        &ids(&["A1", "A2", "A3", "A4"]),
        ShowSelector::AtTime,
    )
    .unwrap();

    let rex = svc.availability("Rex", "Inception", &at(15, 0, 0));
    assert_eq!(rex.len(), 1);
    assert!(rex[0].seats.is_empty());
    assert_eq!(rex[0].price_per_unit, 9.5);

    let apsara = svc.availability("Apsara", "Inception", &at(15, 0, 0));
    assert_eq!(apsara.len(), 2);
    assert_eq!(apsara[0].start, at(15, 19, 30));
    assert_eq!(apsara[1].start, at(15, 21, 0));
    assert!(apsara.iter().all(|a| a.seats.len() == 6));
}

#[test]
fn reserve_delegates_to_the_named_venue() {
    let svc = multiplex();

    let second = ShowSelector::Ordinal(NonZeroUsize::new(2).unwrap());
    let receipt = svc
        .reserve("Apsara", "Inception", &at(15, 0, 0), &ids(&["A1", "A2"]), second)
        .unwrap();
    assert_eq!(receipt.venue, "Apsara");
    assert_eq!(receipt.start, at(15, 21, 0));

    // Same seats at the other venue are unaffected.
    assert!(
        svc.reserve("Rex", "Inception", &at(15, 20, 0), &ids(&["A1", "A2"]), ShowSelector::AtTime)
            .is_ok()
    );

    assert_eq!(
        svc.reserve("Odeon", "Inception", &at(15, 20, 0), &ids(&["A1"]), ShowSelector::AtTime)
            .unwrap_err(),
        BookingError::venue_not_found("Odeon")
    );
}

#[test]
fn service_level_booking_follows_availability() {
    let svc = InMemoryBookingService::new();
    svc.add_venue("Apsara", 6).unwrap();
    svc.add_show("Apsara", "Inception", at(15, 19, 30), 15.0).unwrap();
    svc.add_show("Apsara", "Inception", at(15, 21, 0), 15.0).unwrap();

    let avail = svc.availability("Apsara", "Inception", &at(15, 19, 30));
    assert!(avail.iter().all(|a| !a.seats.is_empty()));

    let first = &avail[0];
    let (h, m) = calendar::local_hour_minute(&first.start);
    svc.reserve("Apsara", "Inception", &at(15, h, m), &ids(&["A1", "A2"]), ShowSelector::AtTime)
        .unwrap();

    let again = svc.availability("Apsara", "Inception", &at(15, 21, 0));
    let same = again.iter().find(|a| a.start == first.start).unwrap();
    assert!(!same.seats.contains(&"A1".to_string()));
    assert!(!same.seats.contains(&"A2".to_string()));
}

#[test]
fn concurrent_venue_creation_registers_once() {
    let svc = Arc::new(InMemoryBookingService::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || svc.add_show("Apsara", "Inception", at(15, 10, i), 10.0).unwrap())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(svc.venue_names(), vec!["Apsara"]);
    assert_eq!(svc.shows_at_venue("Apsara", &at(15, 0, 0)).len(), 16);
}

#[test]
fn works_through_a_shared_handle() {
    let svc: Arc<dyn BookingService> = Arc::new(multiplex());
    assert_eq!(svc.venue_names(), vec!["Apsara", "Rex"]);
    assert_eq!(svc.list_titles(&at(15, 0, 0)).len(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: list_titles is exactly the sorted union of per-venue titles.
    #[test]
    fn list_titles_is_union_of_venues(
        shows in prop::collection::vec((0usize..3, 0usize..4, 14u32..17, 0u32..24), 0..20)
    ) {
        let venues = ["Apsara", "Rex", "Odeon"];
        let titles = ["Dune", "Inception", "Tenet", "Up"];
        let svc = InMemoryBookingService::new();

        let mut expected = BTreeSet::new();
        for &(v, t, d, h) in &shows {
            svc.add_show(venues[v], titles[t], at(d, h, 0), 10.0).unwrap();
            if d == 15 {
                expected.insert(titles[t].to_string());
            }
        }

        let listed = svc.list_titles(&at(15, 12, 0));
        prop_assert_eq!(listed, expected.into_iter().collect::<Vec<_>>());
    }
}
