use chrono::{Datelike, Duration, NaiveDate};

pub trait NaiveDateExt {
    /// First day of this date's month.
    fn first_of_month(self) -> NaiveDate;
    /// Number of days in this date's month.
    fn days_in_month(self) -> u32;
    /// Monday-based column (0..=6) of this date in a calendar week row.
    fn week_column(self) -> u32;
}

impl NaiveDateExt for NaiveDate {
    fn first_of_month(self) -> NaiveDate {
        self - Duration::days(i64::from(self.day0()))
    }

    fn days_in_month(self) -> u32 {
        let first = self.first_of_month();
        let next = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        match next {
            Some(next) => (next - first).num_days() as u32,
            None => 31,
        }
    }

    fn week_column(self) -> u32 {
        self.weekday().num_days_from_monday()
    }
}
