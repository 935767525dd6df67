use crate::availability::{BlockedDates, is_date_available};
use crate::errors::{Error, Result};
use crate::extensions::chrono::NaiveDateExt;
use chrono::{Datelike, Duration, NaiveDate};
use strum_macros::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum DayStatus {
    Available,
    Blocked,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// Monday-first row; `None` pads days outside the month.
pub type Week = [Option<DayCell>; 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| Error::Parse(format!("Invalid month: {year}-{month:02}")))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.first_of_month(),
        }
    }

    /// Accepts `YYYY-MM` (or `YYYY/MM`).
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let err = || Error::Parse(format!("Invalid month: '{}'. Expected YYYY-MM.", raw));
        let (y, m) = raw.split_once(['-', '/']).ok_or_else(err)?;
        let year = y.parse::<i32>().map_err(|_| err())?;
        let month = m.parse::<u32>().map_err(|_| err())?;
        Self::new(year, month).map_err(|_| err())
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    #[cfg(test)]
    pub(crate) fn next(&self) -> Self {
        Self {
            first: self.first + Duration::days(i64::from(self.first.days_in_month())),
        }
    }

    /// Ordered days of the month.
    pub fn days(&self) -> Vec<NaiveDate> {
        (0..self.first.days_in_month())
            .map(|offset| self.first + Duration::days(i64::from(offset)))
            .collect()
    }

    pub fn cells(&self, blocked: &BlockedDates, today: NaiveDate) -> Vec<DayCell> {
        self.days()
            .into_iter()
            .map(|date| DayCell {
                date,
                status: Self::status_of(date, blocked, today),
            })
            .collect()
    }

    pub fn weeks(&self, blocked: &BlockedDates, today: NaiveDate) -> Vec<Week> {
        let mut weeks = Vec::new();
        let mut current: Week = [None; 7];
        for cell in self.cells(blocked, today) {
            let col = cell.date.week_column() as usize;
            current[col] = Some(cell);
            if col == 6 {
                weeks.push(current);
                current = [None; 7];
            }
        }
        if current.iter().any(Option::is_some) {
            weeks.push(current);
        }
        weeks
    }

    pub fn available_count(&self, blocked: &BlockedDates, today: NaiveDate) -> usize {
        self.cells(blocked, today)
            .iter()
            .filter(|c| c.status == DayStatus::Available)
            .count()
    }

    fn status_of(date: NaiveDate, blocked: &BlockedDates, today: NaiveDate) -> DayStatus {
        if is_date_available(date, blocked, today) {
            DayStatus::Available
        } else if date < today {
            DayStatus::Past
        } else {
            DayStatus::Blocked
        }
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.first.year(), self.first.month())
    }
}
