use crate::core::types::api_day;
use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Largest guest capacity the API accepts on a venue.
pub const MAX_VENUE_CAPACITY: u32 = 100;
/// Registration is limited to student addresses.
pub const REGISTER_EMAIL_DOMAIN: &str = "@stud.noroff.no";
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

// ========
// Booking
// ========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(with = "api_day")]
    pub date_from: NaiveDate,
    #[serde(with = "api_day")]
    pub date_to: NaiveDate,
    pub guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Box<Venue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Profile>,
}

impl Booking {
    pub fn new(id: impl Into<String>, date_from: NaiveDate, date_to: NaiveDate, guests: u32) -> Self {
        Self {
            id: id.into(),
            date_from,
            date_to,
            guests,
            created: None,
            updated: None,
            venue: None,
            customer: None,
        }
    }

    /// Booking ends on or after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date_to >= today
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking(id={}, from={}, to={}, guests={})",
            self.id, self.date_from, self.date_to, self.guests
        )
    }
}

// ======
// Venue
// ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueMeta {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub pets: bool,
}

impl VenueMeta {
    pub fn amenities(&self) -> Vec<&'static str> {
        [
            (self.wifi, "wifi"),
            (self.parking, "parking"),
            (self.breakfast, "breakfast"),
            (self.pets, "pets"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [&self.address, &self.city, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        if parts.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Vec<Media>,
    pub price: f64,
    pub max_guests: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meta: VenueMeta,
    #[serde(default)]
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
}

impl Venue {
    /// Bookings embedded in the response, empty when they were not requested.
    pub fn bookings(&self) -> &[Booking] {
        self.bookings.as_deref().unwrap_or(&[])
    }

    pub fn is_owned_by(&self, profile_name: &str) -> bool {
        self.owner
            .as_ref()
            .map(|o| o.name.eq_ignore_ascii_case(profile_name))
            .unwrap_or(false)
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Venue(id={}, name='{}', price={}, max_guests={}, location={})",
            self.id, self.name, self.price, self.max_guests, self.location
        )
    }
}

// ========
// Profile
// ========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
    #[serde(default)]
    pub venue_manager: bool,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = if self.venue_manager {
            "venue manager"
        } else {
            "guest"
        };
        write!(f, "{} <{}> ({})", self.name, self.email, role)
    }
}

/// A signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(flatten)]
    pub profile: Profile,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub name: String,
    pub status: String,
    pub key: String,
}

// ==============
// Request drafts
// ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub venue_manager: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
}

impl RegisterRequest {
    /// Client-side checks mirroring what the API enforces on registration.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::Parse(format!(
                "Invalid name '{}'. Use letters, digits and '_' only.",
                self.name
            )));
        }
        if !self.email.to_ascii_lowercase().ends_with(REGISTER_EMAIL_DOMAIN) {
            return Err(Error::Parse(format!(
                "Email '{}' must be a {} address.",
                self.email, REGISTER_EMAIL_DOMAIN
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Parse(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_manager: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub media: Vec<Media>,
    pub price: f64,
    pub max_guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub meta: VenueMeta,
    #[serde(default)]
    pub location: Location,
}

impl VenueDraft {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Parse(format!("Failed to read {}: {}", path.display(), e)))?;
        let draft: VenueDraft = serde_json::from_str(&text).map_err(|e| {
            Error::Parse(format!("Invalid venue JSON in '{}': {}", path.display(), e))
        })?;
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::parse("Venue name is required."));
        }
        if self.description.trim().is_empty() {
            return Err(Error::parse("Venue description is required."));
        }
        if !(self.price > 0.0) {
            return Err(Error::Parse(format!(
                "Venue price must be positive, got {}.",
                self.price
            )));
        }
        if self.max_guests < 1 || self.max_guests > MAX_VENUE_CAPACITY {
            return Err(Error::Parse(format!(
                "Max guests must be between 1 and {}, got {}.",
                MAX_VENUE_CAPACITY, self.max_guests
            )));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(Error::Parse(format!(
                    "Rating must be between 0 and 5, got {}.",
                    rating
                )));
            }
        }
        if let Some(bad) = self.media.iter().find(|m| !m.url.starts_with("http")) {
            return Err(Error::Parse(format!("Media url '{}' is not a URL.", bad.url)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(with = "api_day")]
    pub date_from: NaiveDate,
    #[serde(with = "api_day")]
    pub date_to: NaiveDate,
    pub guests: u32,
    pub venue_id: String,
}
