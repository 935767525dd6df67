use crate::availability::calendar::{CalendarMonth, DayStatus};
use crate::availability::{BlockedDates, nights};
use crate::config::Config;
use crate::core::models::{Booking, Venue};
use crate::extensions::string::Ellipsize;
use crate::ui::ansi::{FG_GREEN, FG_RED, STYLE_DIM, paint};
use chrono::NaiveDate;

const NAME_MAX: usize = 32;
const CITY_MAX: usize = 18;

/// Turns domain values into table cells.
#[derive(Debug, Default, Clone)]
pub struct DisplayDataBuilder;

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn config_rows(&self, config: &Config) -> Vec<Vec<String>> {
        config
            .rows()
            .iter()
            .enumerate()
            .map(|(i, (k, d, v))| vec![i.to_string(), k.clone(), d.clone(), v.clone()])
            .collect()
    }

    pub fn venue_rows(&self, venues: &[Venue]) -> Vec<Vec<String>> {
        venues
            .iter()
            .map(|v| {
                vec![
                    v.id.clone(),
                    v.name.ellipsize(NAME_MAX),
                    v.location
                        .city
                        .as_deref()
                        .filter(|c| !c.trim().is_empty())
                        .unwrap_or("-")
                        .ellipsize(CITY_MAX),
                    format_price(v.price),
                    v.max_guests.to_string(),
                    format!("{:.1}", v.rating),
                ]
            })
            .collect()
    }

    /// The signed-in user's bookings, with the venue name when it was expanded.
    pub fn booking_rows(&self, bookings: &[Booking], today: NaiveDate) -> Vec<Vec<String>> {
        let mut sorted: Vec<&Booking> = bookings.iter().collect();
        sorted.sort_by_key(|b| (b.date_from, b.date_to));
        sorted
            .into_iter()
            .map(|b| {
                let venue = b
                    .venue
                    .as_ref()
                    .map(|v| v.name.ellipsize(NAME_MAX))
                    .unwrap_or_else(|| "-".to_string());
                let status = if b.is_upcoming(today) {
                    "upcoming"
                } else {
                    "past"
                };
                vec![
                    b.id.clone(),
                    venue,
                    b.date_from.to_string(),
                    b.date_to.to_string(),
                    nights(b.date_from, b.date_to).to_string(),
                    b.guests.to_string(),
                    status.to_string(),
                ]
            })
            .collect()
    }

    /// Bookings on one venue, as its manager sees them.
    pub fn venue_booking_rows(&self, bookings: &[Booking]) -> Vec<Vec<String>> {
        let mut sorted: Vec<&Booking> = bookings.iter().collect();
        sorted.sort_by_key(|b| (b.date_from, b.date_to));
        sorted
            .into_iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    b.customer
                        .as_ref()
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    b.date_from.to_string(),
                    b.date_to.to_string(),
                    b.guests.to_string(),
                ]
            })
            .collect()
    }

    /// Label/value pairs for the venue detail view.
    pub fn venue_details(&self, venue: &Venue, today: NaiveDate) -> Vec<(String, String)> {
        let upcoming = venue
            .bookings()
            .iter()
            .filter(|b| b.is_upcoming(today))
            .count();
        let amenities = venue.meta.amenities();
        vec![
            ("ID".into(), venue.id.clone()),
            ("Name".into(), venue.name.clone()),
            ("Location".into(), venue.location.to_string()),
            ("Price".into(), format!("{} / night", format_price(venue.price))),
            ("Max guests".into(), venue.max_guests.to_string()),
            ("Rating".into(), format!("{:.1}", venue.rating)),
            (
                "Amenities".into(),
                if amenities.is_empty() {
                    "-".into()
                } else {
                    amenities.join(", ")
                },
            ),
            (
                "Host".into(),
                venue
                    .owner
                    .as_ref()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "-".into()),
            ),
            ("Upcoming bookings".into(), upcoming.to_string()),
        ]
    }

    /// Monday-first week rows; blocked days carry `*`, past days `-`.
    pub fn calendar_rows(
        &self,
        month: &CalendarMonth,
        blocked: &BlockedDates,
        today: NaiveDate,
        color: bool,
    ) -> Vec<Vec<String>> {
        month
            .weeks(blocked, today)
            .iter()
            .map(|week| {
                week.iter()
                    .map(|slot| match slot {
                        None => String::new(),
                        Some(cell) => {
                            let day = cell.date.format("%e").to_string();
                            match cell.status {
                                DayStatus::Available => paint(&format!("{day} "), FG_GREEN, color),
                                DayStatus::Blocked => paint(&format!("{day}*"), FG_RED, color),
                                DayStatus::Past => paint(&format!("{day}-"), STYLE_DIM, color),
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Whole amounts without decimals, everything else with two.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        format!("{:.2}", price)
    }
}
