use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

pub const DAYS_IN_WEEK: u64 = 7;

pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `instant` moved forward by `days`, saturating at [`NaiveDateTime::MAX`].
pub fn days_after(instant: NaiveDateTime, days: u64) -> NaiveDateTime {
    instant
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDateTime::MAX)
}

/// `instant` moved back by `days`, saturating at [`NaiveDateTime::MIN`].
pub fn days_before(instant: NaiveDateTime, days: u64) -> NaiveDateTime {
    instant
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDateTime::MIN)
}

pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    midnight(now.date())
}

/// Exclusive end of `now`'s calendar day.
pub fn end_of_day(now: NaiveDateTime) -> NaiveDateTime {
    days_after(start_of_day(now), 1)
}

/// Weekday number with Monday = 1 and Sunday = 7.
///
/// Counting starts from a Sunday = 0 value, which is remapped to 7 so that
/// Sunday closes the week instead of opening it.
pub fn weekday_number(date: NaiveDate) -> u32 {
    match date.weekday().num_days_from_sunday() {
        0 => 7,
        n => n,
    }
}

/// Midnight of the Monday on or before `now`'s calendar date.
pub fn start_of_week(now: NaiveDateTime) -> NaiveDateTime {
    let offset = u64::from(weekday_number(now.date()) - 1);
    days_before(start_of_day(now), offset)
}

/// Exclusive end of the week that starts at `week_start`.
pub fn end_of_week(week_start: NaiveDateTime) -> NaiveDateTime {
    days_after(week_start, DAYS_IN_WEEK)
}

pub fn previous_week(week_start: NaiveDateTime) -> NaiveDateTime {
    days_before(week_start, DAYS_IN_WEEK)
}

/// Short English day label, e.g. "Mon".
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
