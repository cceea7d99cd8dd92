//! Calendar helpers shared by the generator and the optimizer.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone};

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Weekday name for 0 = Sunday .. 6 = Saturday.
pub fn day_name(day: u32) -> &'static str {
    DAY_NAMES[(day % 7) as usize]
}

/// Day of week with 0 = Sunday.
pub fn day_of_week<Tz: TimeZone>(at: &DateTime<Tz>) -> u32 {
    at.weekday().num_days_from_sunday()
}

/// Start of `hour` on `date` in `tz`, minutes and seconds zeroed.
///
/// An ambiguous local time resolves to the earlier instant. A local time
/// skipped by a DST jump resolves to the hour after the gap.
pub fn hour_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    let naive = date
        .and_hms_opt(hour % 24, 0, 0)
        .expect("hour % 24 should be a valid hour");
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// 12-hour clock label, e.g. `3:00 AM`, `12:00 PM`.
pub fn format_hour(hour: u32) -> String {
    let suffix = if hour % 24 >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display, suffix)
}

pub fn format_fee(fee: f64) -> String {
    format!("{:.2} Gwei", fee)
}
