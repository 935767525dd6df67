mod calculator_tests;
mod calendar_tests;

use crate::core::models::Booking;
use chrono::NaiveDate;

pub(super) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn booking(id: &str, from: NaiveDate, to: NaiveDate) -> Booking {
    Booking::new(id, from, to, 2)
}

pub(super) fn early_today() -> NaiveDate {
    day(2024, 1, 1)
}
