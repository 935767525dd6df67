use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::extensions::string::ToDashSeparators;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum CommandName {
    Init,
    Config,
    Register,
    Login,
    Logout,
    Whoami,
    #[strum(serialize = "apikey", to_string = "apikey")]
    ApiKey,
    Venues,
    Venue,
    Calendar,
    Book,
    Bookings,
    Cancel,
    Manager,
    MyVenues,
    VenueCreate,
    VenueUpdate,
    VenueDelete,
    VenueBookings,
    Help,
}

impl CommandName {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| Error::unknown(s.trim()))
    }

    /// Commands that only make sense for a venue manager profile.
    pub fn requires_manager(&self) -> bool {
        matches!(
            self,
            CommandName::MyVenues
                | CommandName::VenueCreate
                | CommandName::VenueUpdate
                | CommandName::VenueDelete
                | CommandName::VenueBookings
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Flag {
    #[strum(serialize = "-h", serialize = "-help", serialize = "--help", to_string = "-h")]
    Help,
    #[strum(serialize = "--manager", to_string = "--manager")]
    Manager,
    #[strum(serialize = "--page", to_string = "--page")]
    Page,
}

impl Flag {
    pub fn is_present(args: &[String], flag: Flag) -> bool {
        args.iter()
            .any(|a| Flag::from_str(a).map(|f| f == flag).unwrap_or(false))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d", to_string = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%d-%m-%Y", to_string = "%d-%m-%Y")]
    DmYDash,
    #[strum(serialize = "%Y/%m/%d", to_string = "%Y/%m/%d")]
    YmdSlash,
    #[strum(serialize = "%d/%m/%Y", to_string = "%d/%m/%Y")]
    DmYSlash,
    #[strum(serialize = "%d-%m", to_string = "%d-%m")]
    DmDash,
    #[strum(serialize = "%d/%m", to_string = "%d/%m")]
    DmSlash,
}

#[derive(Debug, Clone)]
struct DateParseSpec {
    input: String,
    date_format: DateFormat,
}

impl DateFormat {
    fn names_year(self) -> bool {
        !matches!(self, DateFormat::DmDash | DateFormat::DmSlash)
    }

    fn build_parse_spec(self, input: &str, current_year: i32) -> DateParseSpec {
        match self {
            DateFormat::YmdDash | DateFormat::YmdSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::YmdDash,
            },
            DateFormat::DmYDash | DateFormat::DmYSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::DmYDash,
            },
            DateFormat::DmDash | DateFormat::DmSlash => DateParseSpec {
                input: format!("{input}-{current_year}"),
                date_format: DateFormat::DmYDash,
            },
        }
    }
}

impl Date {
    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    fn error_message(input: &str) -> String {
        format!("Invalid date format: '{}'. {}", input, Self::usage())
    }

    /// Parses any supported format; day-month inputs are resolved against `year`.
    pub fn try_from_str_in_year(input: &str, year: i32) -> Result<Self> {
        Self::parse_in_year(input, year).map(|(date, _)| Date(date))
    }

    /// Day-month inputs take `anchor`'s year, or the following one when that
    /// would land before `anchor`. Inputs naming a year are taken as written.
    pub fn try_from_str_on_or_after(input: &str, anchor: NaiveDate) -> Result<Self> {
        let (date, format) = Self::parse_in_year(input, anchor.year())?;
        if format.names_year() || date >= anchor {
            return Ok(Date(date));
        }
        Self::try_from_str_in_year(input, anchor.year() + 1)
    }

    fn parse_in_year(input: &str, year: i32) -> Result<(NaiveDate, DateFormat)> {
        let input = input.to_dash_separators();

        for f in DateFormat::iter() {
            let spec = f.build_parse_spec(&input, year);
            if let Ok(date) = NaiveDate::parse_from_str(&spec.input, spec.date_format.as_ref()) {
                return Ok((date, f));
            }
        }

        Err(Error::Parse(Self::error_message(&input)))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parse an API date or date-time into the calendar day it names.
///
/// `2024-06-10T00:00:00.000Z` and `2024-06-10` both become 2024-06-10; the
/// time of day is dropped in the offset the string was written in.
pub fn parse_api_day(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    let day_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| Error::Parse(format!("Invalid API date: '{}'", raw)))
}

/// Serde adapter for calendar days carried as API date-time strings.
pub mod api_day {
    use super::parse_api_day;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&day.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_api_day(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a whole number argument, naming the field in the error.
pub fn parse_number<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::Parse(format!("Invalid {}: '{}'. Expected a number.", what, raw.trim())))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", serialize = "on", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", serialize = "off", to_string = "False")]
    TextFalse,
}

impl BoolFormat {
    #[inline]
    fn to_bool(self) -> bool {
        matches!(self, BoolFormat::TextTrue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(fmt.to_bool())),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}
