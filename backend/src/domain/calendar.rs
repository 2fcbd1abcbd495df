//! Calendar domain logic for the meal planner.
//!
//! Everything that depends on "today" goes through [`CalendarService`] so the
//! clock can be pinned in tests. Weeks start on Monday and are keyed by that
//! Monday's date in `yyyy-MM-dd` form; the local timezone of the server
//! decides what "today" is.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;

/// Source of the current instant
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub const WEEK_START_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct CalendarService {
    clock: Clock,
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarService {
    /// Calendar backed by the system clock
    pub fn new() -> Self {
        Self {
            clock: Arc::new(Utc::now),
        }
    }

    /// Calendar with an injected clock
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Calendar frozen at a single instant
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::with_clock(Arc::new(move || at))
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Today's date in server local time
    pub fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }

    /// 23:59:59.999 local time today, as a UTC instant
    pub fn end_of_today(&self) -> DateTime<Utc> {
        let last_instant = (self.today() + Duration::days(1)).and_time(NaiveTime::MIN)
            - Duration::milliseconds(1);

        Local
            .from_local_datetime(&last_instant)
            .latest()
            .map(|dt| dt.with_timezone(&Utc))
            // Local time does not exist (DST gap): fall back to reading it as UTC
            .unwrap_or_else(|| Utc.from_utc_datetime(&last_instant))
    }

    /// Monday of the current week
    pub fn current_week_start(&self) -> NaiveDate {
        week_start_of(self.today())
    }

    /// The current week start followed by the next `count - 1` week starts
    pub fn upcoming_week_starts(&self, count: u32) -> Vec<NaiveDate> {
        let first = self.current_week_start();
        (0..count)
            .map(|offset| first + Duration::weeks(offset as i64))
            .collect()
    }
}

/// Monday of the ISO week containing `date`
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn format_week_start(date: NaiveDate) -> String {
    date.format(WEEK_START_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_of_each_weekday() {
        // 2024-01-08 is a Monday
        for day in 8..=14 {
            assert_eq!(week_start_of(date(2024, 1, day)), date(2024, 1, 8));
        }
        assert_eq!(week_start_of(date(2024, 1, 15)), date(2024, 1, 15));
    }

    #[test]
    fn test_week_start_crosses_year_boundary() {
        // Wednesday 2025-01-01 belongs to the week starting Monday 2024-12-30
        assert_eq!(week_start_of(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn test_format_week_start() {
        assert_eq!(format_week_start(date(2024, 3, 4)), "2024-03-04");
    }

    #[test]
    fn test_upcoming_week_starts() {
        let calendar = CalendarService::fixed(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap());
        let weeks: Vec<String> = calendar
            .upcoming_week_starts(3)
            .into_iter()
            .map(format_week_start)
            .collect();

        assert_eq!(weeks, vec!["2024-01-08", "2024-01-15", "2024-01-22"]);
    }

    #[test]
    fn test_end_of_today_is_after_now_and_within_a_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let calendar = CalendarService::fixed(now);
        let end = calendar.end_of_today();

        assert!(end >= now);
        assert!(end - now < Duration::days(1));
    }
}
