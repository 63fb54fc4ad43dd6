//! Half-open calendar windows used to select records.

use crate::error::EarningsError;
use crate::utils::{
    days_before, end_of_day, end_of_week, midnight, previous_week, start_of_day, start_of_week,
    weekday_number, DAYS_IN_WEEK,
};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// `[start, end)` over naive local date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn day(now: NaiveDateTime) -> Self {
        Self::new(start_of_day(now), end_of_day(now))
    }

    /// The seven days immediately before `now`'s calendar day.
    pub fn trailing_week(now: NaiveDateTime) -> Self {
        let today = start_of_day(now);
        Self::new(days_before(today, DAYS_IN_WEEK), today)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Records carry a date only; they sit at midnight of that date.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(midnight(date))
    }
}

/// A seven-day window starting at Monday midnight.
///
/// Deserialized windows are checked against that shape, so the buckets built
/// from one always start on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Window")]
pub struct WeekWindow(Window);

impl TryFrom<Window> for WeekWindow {
    type Error = EarningsError;

    fn try_from(window: Window) -> Result<Self, Self::Error> {
        let start = window.start;
        if start.time() != NaiveTime::MIN || weekday_number(start.date()) != 1 {
            return Err(EarningsError::InvalidWindow(format!(
                "week must start at Monday midnight, got {start}"
            )));
        }
        match start.checked_add_days(Days::new(DAYS_IN_WEEK)) {
            Some(end) if end == window.end => Ok(Self(window)),
            _ => Err(EarningsError::InvalidWindow(format!(
                "week starting {start} must end seven days later, got {}",
                window.end
            ))),
        }
    }
}

impl WeekWindow {
    pub fn containing(now: NaiveDateTime) -> Self {
        let start = start_of_week(now);
        Self(Window::new(start, end_of_week(start)))
    }

    pub fn previous(&self) -> Self {
        let start = previous_week(self.0.start);
        Self(Window::new(start, self.0.start))
    }

    pub fn window(&self) -> &Window {
        &self.0
    }

    pub fn start_date(&self) -> NaiveDate {
        self.0.start.date()
    }

    /// The seven calendar dates of the week, Monday first. Dates past
    /// [`NaiveDate::MAX`] repeat the last representable day.
    pub fn dates(&self) -> [NaiveDate; 7] {
        let start = self.start_date();
        std::array::from_fn(|offset| {
            start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(NaiveDate::MAX)
        })
    }
}

/// Every window a full earnings report reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    pub today: Window,
    pub trailing_week: Window,
    pub current_week: WeekWindow,
    pub previous_week: WeekWindow,
}

impl ReportWindows {
    pub fn resolve(now: NaiveDateTime) -> Self {
        let current_week = WeekWindow::containing(now);
        Self {
            today: Window::day(now),
            trailing_week: Window::trailing_week(now),
            current_week,
            previous_week: current_week.previous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_window_is_half_open() {
        let window = Window::day(at(2024, 3, 6, 10));
        assert!(window.contains(at(2024, 3, 6, 0)));
        assert!(window.contains_date(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()));
        assert!(!window.contains(at(2024, 3, 7, 0)));
        assert!(!window.contains_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
    }

    #[test]
    fn test_trailing_week_excludes_today() {
        let window = Window::trailing_week(at(2024, 3, 6, 10));
        assert_eq!(window.start, at(2024, 2, 28, 0));
        assert_eq!(window.end, at(2024, 3, 6, 0));
        assert!(window.contains_date(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()));
        assert!(!window.contains_date(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()));
    }

    #[test]
    fn test_week_dates_are_consecutive_from_monday() {
        for day in 4..=10 {
            let week = WeekWindow::containing(at(2024, 3, day, 12));
            let dates = week.dates();
            assert_eq!(dates[0].weekday(), Weekday::Mon);
            for pair in dates.windows(2) {
                assert_eq!(pair[1], pair[0].succ_opt().unwrap());
            }
            assert_eq!(dates[6], NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        }
    }

    #[test]
    fn test_previous_week_abuts_current() {
        let windows = ReportWindows::resolve(at(2024, 3, 6, 9));
        assert_eq!(windows.previous_week.window().end, windows.current_week.window().start);
        assert_eq!(
            windows.previous_week.start_date(),
            NaiveDate::from_ymd_opt(2024, 2, 26).unwrap()
        );
        assert_eq!(windows.current_week.window().end, at(2024, 3, 11, 0));
    }

    #[test]
    fn test_week_window_deserialization_requires_monday_start() {
        // 2024-03-06 is a Wednesday
        let wednesday = r#"{"start":"2024-03-06T00:00:00","end":"2024-03-07T00:00:00"}"#;
        assert!(serde_json::from_str::<WeekWindow>(wednesday).is_err());

        let short = r#"{"start":"2024-03-04T00:00:00","end":"2024-03-05T00:00:00"}"#;
        assert!(serde_json::from_str::<WeekWindow>(short).is_err());

        let late_start = r#"{"start":"2024-03-04T06:00:00","end":"2024-03-11T06:00:00"}"#;
        assert!(serde_json::from_str::<WeekWindow>(late_start).is_err());

        let week = WeekWindow::containing(at(2024, 3, 6, 9));
        let json = serde_json::to_string(&week).unwrap();
        let parsed: WeekWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, week);
        assert_eq!(parsed.dates()[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_window_rejects_mismatched_end() {
        let monday = at(2024, 3, 4, 0);
        let err = WeekWindow::try_from(Window::new(monday, at(2024, 3, 12, 0))).unwrap_err();
        assert!(matches!(err, EarningsError::InvalidWindow(_)));
        assert!(WeekWindow::try_from(Window::new(monday, at(2024, 3, 11, 0))).is_ok());
    }

    #[test]
    fn test_resolve_at_calendar_limits_does_not_panic() {
        let last = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
        let today = Window::day(last);
        assert_eq!(today.end, NaiveDateTime::MAX);
        assert!(today.contains_date(NaiveDate::MAX));

        let windows = ReportWindows::resolve(last);
        assert_eq!(windows.current_week.dates()[6], NaiveDate::MAX);
        assert_eq!(windows.current_week.window().end, NaiveDateTime::MAX);

        let first = NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap();
        let windows = ReportWindows::resolve(first);
        assert_eq!(windows.trailing_week.start, NaiveDateTime::MIN);
        assert_eq!(windows.previous_week.window().start, NaiveDateTime::MIN);
    }
}
