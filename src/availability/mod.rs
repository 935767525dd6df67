//! Booking availability for a single venue.
//!
//! Everything here is a pure function of its inputs: existing bookings are
//! expanded into a set of blocked calendar days, and candidate ranges are
//! checked against that set, the injected `today`, and the venue capacity.

use crate::core::models::Booking;
use crate::logging::{LogTarget, Logger};
use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

pub mod calendar;
#[cfg(test)]
mod tests;

/// Why a candidate range cannot be booked. Checks run in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Check-out date must be after check-in date.")]
    InvalidOrder,

    #[error("Check-in date cannot be in the past.")]
    PastDate,

    #[error("The venue is already booked on {date}.")]
    Overlap { date: NaiveDate },

    #[error("Guests must be between 1 and {max_guests}, got {guests}.")]
    GuestCountOutOfRange { guests: u32, max_guests: u32 },
}

/// A booking whose end lies before its start. Skipped, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Booking '{id}' ends ({date_to}) before it starts ({date_from}); skipped.")]
pub struct MalformedBooking {
    pub id: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Hook for callers that want to hear about skipped records.
pub trait AvailabilityObserver {
    fn malformed_booking(&self, issue: &MalformedBooking);
}

pub struct NoopObserver;

impl AvailabilityObserver for NoopObserver {
    fn malformed_booking(&self, _issue: &MalformedBooking) {}
}

pub struct LoggerObserver {
    logger: Logger,
}

impl LoggerObserver {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl AvailabilityObserver for LoggerObserver {
    fn malformed_booking(&self, issue: &MalformedBooking) {
        self.logger.warn(issue.to_string(), LogTarget::FileOnly);
    }
}

/// Calendar days covered by existing bookings of one venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedDates {
    days: HashSet<NaiveDate>,
}

impl BlockedDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

}

#[cfg(test)]
impl BlockedDates {
    pub(crate) fn union(&self, other: &BlockedDates) -> BlockedDates {
        self.days.union(&other.days).copied().collect()
    }

    /// Ascending copy.
    pub(crate) fn sorted(&self) -> Vec<NaiveDate> {
        let mut v: Vec<NaiveDate> = self.days.iter().copied().collect();
        v.sort();
        v
    }
}

impl FromIterator<NaiveDate> for BlockedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for BlockedDates {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.days.extend(iter);
    }
}

/// Inclusive ascending days from `from` through `to`; empty when reversed.
fn inclusive_days(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    if to < from {
        return Vec::new();
    }
    from.iter_days().take_while(|d| *d <= to).collect()
}

/// Every calendar day a booking covers, both endpoints included.
pub fn expand_booking_to_dates(booking: &Booking) -> Vec<NaiveDate> {
    inclusive_days(booking.date_from, booking.date_to)
}

pub fn compute_blocked_dates(bookings: &[Booking]) -> BlockedDates {
    compute_blocked_dates_observed(bookings, &NoopObserver)
}

/// Same as `compute_blocked_dates`, reporting malformed records to `observer`.
pub fn compute_blocked_dates_observed(
    bookings: &[Booking],
    observer: &dyn AvailabilityObserver,
) -> BlockedDates {
    let mut blocked = BlockedDates::new();
    for booking in bookings {
        if booking.date_to < booking.date_from {
            observer.malformed_booking(&MalformedBooking {
                id: booking.id.clone(),
                date_from: booking.date_from,
                date_to: booking.date_to,
            });
            continue;
        }
        blocked.extend(expand_booking_to_dates(booking));
    }
    blocked
}

pub fn is_date_available(date: NaiveDate, blocked: &BlockedDates, today: NaiveDate) -> bool {
    date >= today && !blocked.contains(date)
}

pub fn is_range_valid(
    from: NaiveDate,
    to: NaiveDate,
    blocked: &BlockedDates,
    today: NaiveDate,
    guests: u32,
    max_guests: u32,
) -> Result<(), ValidationError> {
    if from >= to {
        return Err(ValidationError::InvalidOrder);
    }
    if from < today {
        return Err(ValidationError::PastDate);
    }
    if let Some(date) = from
        .iter_days()
        .take_while(|d| *d <= to)
        .find(|d| blocked.contains(*d))
    {
        return Err(ValidationError::Overlap { date });
    }
    if guests < 1 || guests > max_guests {
        return Err(ValidationError::GuestCountOutOfRange { guests, max_guests });
    }
    Ok(())
}

/// Nights spent between check-in and check-out; zero unless `to > from`.
pub fn nights(from: NaiveDate, to: NaiveDate) -> u32 {
    u32::try_from((to - from).num_days()).unwrap_or(0)
}

pub fn total_price(price_per_night: f64, from: NaiveDate, to: NaiveDate) -> f64 {
    price_per_night * f64::from(nights(from, to))
}

/// A user-proposed stay, pending validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub guests: u32,
}

impl CandidateRange {
    pub fn new(from: NaiveDate, to: NaiveDate, guests: u32) -> Self {
        Self { from, to, guests }
    }

    pub fn validate(
        &self,
        blocked: &BlockedDates,
        today: NaiveDate,
        max_guests: u32,
    ) -> Result<(), ValidationError> {
        is_range_valid(self.from, self.to, blocked, today, self.guests, max_guests)
    }

    pub fn nights(&self) -> u32 {
        nights(self.from, self.to)
    }

    pub fn total_price(&self, price_per_night: f64) -> f64 {
        total_price(price_per_night, self.from, self.to)
    }
}
