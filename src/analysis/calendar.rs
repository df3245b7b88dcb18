//! Calendar helpers shared by the stages.

use chrono::{Datelike, NaiveDate};

/// `"Jan 2024"` style label.
pub fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// `"Jan 2024 - Jun 2024"` style label.
pub fn month_year_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", month_year(start), month_year(end))
}

/// Whole calendar months from `start` to `end`.
///
/// A trailing partial month is not counted (Jan 15 → Feb 14 is 0, Jan 31 →
/// Apr 30 is 2). The one exception is a single month ending on a month's last
/// day (Jan 31 → Feb 28 is 1). Negative when `end` precedes `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    if end < start {
        return -months_between(end, start);
    }
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if months == 1 && is_last_day_of_month(end) {
        return 1;
    }
    if months > 0 && end.day() < start.day() {
        months - 1
    } else {
        months
    }
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn labels() {
        assert_eq!(month_year(d(2021, 3, 9)), "Mar 2021");
        assert_eq!(month_year_range(d(2020, 1, 1), d(2020, 12, 1)), "Jan 2020 - Dec 2020");
    }

    #[test]
    fn whole_months_only() {
        assert_eq!(months_between(d(2020, 1, 1), d(2022, 12, 1)), 35);
        assert_eq!(months_between(d(2020, 1, 15), d(2020, 2, 14)), 0);
        assert_eq!(months_between(d(2020, 1, 15), d(2020, 2, 15)), 1);
        assert_eq!(months_between(d(2020, 1, 31), d(2020, 2, 29)), 1);
        assert_eq!(months_between(d(2020, 5, 1), d(2020, 5, 30)), 0);
        assert_eq!(months_between(d(2021, 1, 1), d(2020, 1, 1)), -12);
    }

    #[test]
    fn month_end_dates_only_round_up_a_single_month() {
        assert_eq!(months_between(d(2021, 1, 31), d(2021, 2, 28)), 1);
        assert_eq!(months_between(d(2020, 1, 31), d(2020, 4, 30)), 2);
        assert_eq!(months_between(d(2020, 3, 31), d(2020, 9, 30)), 5);
        assert_eq!(months_between(d(2020, 3, 31), d(2020, 12, 31)), 9);
        assert_eq!(months_between(d(2020, 4, 30), d(2020, 9, 30)), 5);
    }
}
