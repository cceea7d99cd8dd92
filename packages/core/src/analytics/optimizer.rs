//! Next optimal transaction moment.

use chrono::{DateTime, Days, Offset, TimeZone, Timelike};

use crate::analytics::{
    calendar::{day_name, day_of_week, hour_start},
    types::{DayRank, HourRank, OptimalMoment},
};

/// Project the next moment expected to be cheapest, relative to `now`.
///
/// Prefers a ranked hour still ahead today. Otherwise takes the cheapest
/// ranked hour on the next best day after today (one week out when that
/// day is today), or tomorrow when no days are ranked.
pub fn project_next<Tz: TimeZone>(
    best_hours: &[HourRank],
    best_days: &[DayRank],
    now: &DateTime<Tz>,
) -> Option<OptimalMoment> {
    let mut sorted_hours = best_hours.to_vec();
    sorted_hours.sort_by(|a, b| a.avg_fee.total_cmp(&b.avg_fee));

    let current_hour = now.hour();
    let tz = now.timezone();

    if let Some(candidate) = sorted_hours.iter().find(|h| h.hour > current_hour) {
        let at = hour_start(&tz, now.date_naive(), candidate.hour);
        return Some(OptimalMoment {
            hour: candidate.hour,
            day_label: "Today".to_string(),
            fee: candidate.avg_fee,
            full_date: at.with_timezone(&at.offset().fix()),
            days_from_now: 0,
        });
    }

    let cheapest = sorted_hours.first()?;
    let days_to_add = days_until_best_day(best_days, day_of_week(now));
    let date = now
        .date_naive()
        .checked_add_days(Days::new(days_to_add.into()))?;
    let at = hour_start(&tz, date, cheapest.hour);

    Some(OptimalMoment {
        hour: cheapest.hour,
        day_label: day_name(day_of_week(&at)).to_string(),
        fee: cheapest.avg_fee,
        full_date: at.with_timezone(&at.offset().fix()),
        days_from_now: days_to_add,
    })
}

/// Days from `current_day` to the next best day, in `1..=7`.
fn days_until_best_day(best_days: &[DayRank], current_day: u32) -> u32 {
    let mut sorted_days = best_days.to_vec();
    sorted_days.sort_by(|a, b| a.avg_fee.total_cmp(&b.avg_fee));

    let Some(target) = sorted_days
        .iter()
        .find(|d| d.day > current_day)
        .or_else(|| sorted_days.first())
    else {
        return 1;
    };

    match (target.day % 7 + 7 - current_day) % 7 {
        0 => 7,
        days => days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, Weekday};

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        // 2024-05-12 is a Sunday
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 12 + day, hour, 23, 45)
            .unwrap()
    }

    fn hour(hour: u32, avg_fee: f64) -> HourRank {
        HourRank { hour, avg_fee }
    }

    fn day(day: u32, avg_fee: f64) -> DayRank {
        DayRank {
            day,
            day_name: day_name(day).to_string(),
            avg_fee,
        }
    }

    #[test]
    fn no_ranked_hours_means_no_projection() {
        assert!(project_next(&[], &[day(2, 10.0)], &at(3, 10)).is_none());
    }

    #[test]
    fn passed_hour_without_ranked_days_projects_tomorrow() {
        let wednesday_ten = at(3, 10);
        let moment = project_next(&[hour(3, 10.0)], &[], &wednesday_ten).unwrap();

        assert_eq!(moment.days_from_now, 1);
        assert_eq!(moment.hour, 3);
        assert_eq!(moment.day_label, "Thursday");
        assert_eq!(moment.eta_label().as_deref(), Some("Tomorrow"));
        assert_eq!(moment.full_date.weekday(), Weekday::Thu);
        assert_eq!(moment.full_date.hour(), 3);
        assert_eq!(moment.full_date.minute(), 0);
        assert_eq!(moment.full_date.second(), 0);
    }

    #[test]
    fn cheapest_hour_still_ahead_today_wins() {
        let hours = [hour(2, 8.0), hour(14, 11.0), hour(22, 9.0)];
        let moment = project_next(&hours, &[day(6, 5.0)], &at(3, 10)).unwrap();

        assert_eq!(moment.hour, 22);
        assert_eq!(moment.day_label, "Today");
        assert_eq!(moment.days_from_now, 0);
        assert_eq!(moment.fee, 9.0);
        assert!(moment.eta_label().is_none());
        assert_eq!(moment.full_date.date_naive(), at(3, 10).date_naive());
    }

    #[test]
    fn unsorted_input_is_ranked_by_fee() {
        let hours = [hour(20, 30.0), hour(18, 12.0), hour(1, 4.0)];
        let moment = project_next(&hours, &[], &at(1, 15)).unwrap();
        assert_eq!(moment.hour, 18);
    }

    #[test]
    fn current_hour_is_not_ahead() {
        let moment = project_next(&[hour(10, 5.0)], &[], &at(3, 10)).unwrap();
        assert_eq!(moment.days_from_now, 1);
    }

    #[test]
    fn passed_hours_move_to_next_best_day_after_today() {
        // Wednesday 23:xx; best days Saturday, Monday
        let moment =
            project_next(&[hour(4, 6.0)], &[day(1, 7.0), day(6, 5.0)], &at(3, 23)).unwrap();

        assert_eq!(moment.days_from_now, 3);
        assert_eq!(moment.day_label, "Saturday");
        assert_eq!(moment.eta_label().as_deref(), Some("In 3 days"));
    }

    #[test]
    fn wraps_to_cheapest_day_when_none_is_later_in_week() {
        // Friday evening; best days Sunday and Tuesday
        let moment =
            project_next(&[hour(3, 6.0)], &[day(2, 9.0), day(0, 7.0)], &at(5, 21)).unwrap();

        assert_eq!(moment.days_from_now, 2);
        assert_eq!(moment.day_label, "Sunday");
    }

    #[test]
    fn same_weekday_projects_a_full_week_ahead() {
        // Saturday; the only ranked day is Saturday
        let moment = project_next(&[hour(5, 6.0)], &[day(6, 4.0)], &at(6, 12)).unwrap();

        assert_eq!(moment.days_from_now, 7);
        assert_eq!(moment.day_label, "Saturday");
        assert_eq!(moment.eta_label().as_deref(), Some("In 7 days"));
    }
}
