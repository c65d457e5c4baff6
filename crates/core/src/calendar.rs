//! Local calendar helpers.
//!
//! Day identity is the local calendar date of an instant. Comparing dates
//! rather than midnight instants keeps "same day" stable across daylight-saving
//! transitions, where a local midnight may be skipped or repeated.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use crate::error::{BookingError, BookingResult};

/// Local calendar date of `instant` in its own time zone.
pub fn local_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// First instant of the local calendar day containing `instant`.
///
/// Usually 00:00:00. When midnight is repeated the earlier instant is
/// returned; when midnight falls in a gap the first valid local time after
/// it is returned.
pub fn local_midnight<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    let start = local_day(instant).and_time(NaiveTime::MIN);
    first_valid_at_or_after(&instant.timezone(), start).unwrap_or_else(|| instant.clone())
}

/// Local `(hour, minute)` of `instant`, hour in `0..=23`, minute in `0..=59`.
pub fn local_hour_minute<Tz: TimeZone>(instant: &DateTime<Tz>) -> (u32, u32) {
    (instant.hour(), instant.minute())
}

/// Today's local date at `hour:minute:00`.
pub fn today_at(hour: u32, minute: u32) -> BookingResult<DateTime<Local>> {
    date_at(Local::now().date_naive(), hour, minute)
}

/// The given local date at `hour:minute:00`.
pub fn date_at(date: NaiveDate, hour: u32, minute: u32) -> BookingResult<DateTime<Local>> {
    date_at_in(&Local, date, hour, minute)
}

/// `date` at `hour:minute:00` in `tz`. A wall time inside a DST gap moves
/// forward to the first valid local time; a repeated one resolves to the
/// earlier instant.
pub fn date_at_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> BookingResult<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(BookingError::InvalidTimeOfDay { hour, minute })?;
    first_valid_at_or_after(tz, date.and_time(time)).ok_or(BookingError::InvalidTimeOfDay { hour, minute })
}

fn first_valid_at_or_after<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    // DST gaps are at most a few hours; a day of minutes is a hard ceiling.
    (0..=24 * 60)
        .map(|m| naive + Duration::minutes(m))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Offset};
    use chrono_tz::America::{Havana, Sao_Paulo};
    use chrono_tz::Tz;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    fn at(tz: &FixedOffset, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        tz.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap()
    }

    #[test]
    fn midnight_truncates_time_of_day() {
        let tz = ist();
        let evening = at(&tz, 2026, 7, 15, 21, 45, 10);
        assert_eq!(local_midnight(&evening), at(&tz, 2026, 7, 15, 0, 0, 0));
    }

    #[test]
    fn day_boundary_is_local_not_utc() {
        let tz = ist();
        // 00:00:01 local on the 16th is still the 15th in UTC.
        let show = at(&tz, 2026, 7, 16, 0, 0, 1);
        let late_query = at(&tz, 2026, 7, 15, 23, 59, 0);
        let morning_query = at(&tz, 2026, 7, 16, 9, 30, 0);

        assert_ne!(local_day(&show), local_day(&late_query));
        assert_eq!(local_day(&show), local_day(&morning_query));
        assert_ne!(local_midnight(&show), local_midnight(&late_query));
    }

    #[test]
    fn hour_minute_is_local() {
        let tz = ist();
        assert_eq!(local_hour_minute(&at(&tz, 2026, 7, 15, 18, 5, 59)), (18, 5));
    }

    #[test]
    fn today_at_rejects_out_of_range() {
        assert_eq!(
            today_at(24, 0).unwrap_err(),
            BookingError::InvalidTimeOfDay { hour: 24, minute: 0 }
        );
        assert_eq!(
            today_at(10, 60).unwrap_err(),
            BookingError::InvalidTimeOfDay { hour: 10, minute: 60 }
        );
    }

    #[test]
    fn today_at_builds_today() {
        let t = today_at(18, 0).unwrap();
        assert_eq!(local_hour_minute(&t), (18, 0));
        assert_eq!(t.second(), 0);
        assert_eq!(local_day(&t), Local::now().date_naive());
    }

    #[test]
    fn date_at_keeps_requested_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let t = date_at(date, 9, 15).unwrap();
        assert_eq!(local_day(&t), date);
        assert_eq!(local_hour_minute(&t), (9, 15));
    }

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn zoned(tz: &Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        tz.from_local_datetime(&naive(y, mo, d, h, mi)).single().unwrap()
    }

    #[test]
    fn skipped_midnight_starts_day_at_first_valid_time() {
        // Sao Paulo jumped from 00:00 to 01:00 on 2018-11-04.
        let evening = zoned(&Sao_Paulo, 2018, 11, 4, 20, 0);
        let midnight = local_midnight(&evening);

        assert_eq!(midnight.naive_local(), naive(2018, 11, 4, 1, 0));
        assert_eq!(local_day(&midnight), local_day(&evening));
        assert_eq!(midnight.offset().fix().local_minus_utc(), -2 * 3600);
    }

    #[test]
    fn repeated_midnight_starts_day_at_earlier_instant() {
        // Havana fell back from 01:00 CDT to 00:00 CST on 2018-11-04,
        // so 00:00 local happened twice.
        let evening = zoned(&Havana, 2018, 11, 4, 20, 0);
        let midnight = local_midnight(&evening);

        assert_eq!(midnight.naive_local(), naive(2018, 11, 4, 0, 0));
        assert_eq!(local_day(&midnight), local_day(&evening));
        assert_eq!(midnight.offset().fix().local_minus_utc(), -4 * 3600);

        let later = Havana
            .from_local_datetime(&naive(2018, 11, 4, 0, 0))
            .latest()
            .unwrap();
        assert!(midnight < later);
        assert_eq!(local_midnight(&later), midnight);
    }

    #[test]
    fn date_at_inside_gap_moves_forward() {
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
        let t = date_at_in(&Sao_Paulo, date, 0, 30).unwrap();
        assert_eq!(t.naive_local(), naive(2018, 11, 4, 1, 0));
        assert_eq!(local_day(&t), date);
    }

    #[test]
    fn date_at_on_repeated_time_takes_earlier() {
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
        let t = date_at_in(&Havana, date, 0, 15).unwrap();
        assert_eq!(t.naive_local(), naive(2018, 11, 4, 0, 15));
        assert_eq!(t.offset().fix().local_minus_utc(), -4 * 3600);
    }
}
