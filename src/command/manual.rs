use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display as DisplayDerive, EnumIter as EnumIterDerive, EnumString};

use crate::core::models::{MAX_VENUE_CAPACITY, MIN_PASSWORD_LEN, REGISTER_EMAIL_DOMAIN};
use crate::core::types::{CommandName, Date};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

/// Manual topics that are not commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, DisplayDerive, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ExtraTopic {
    Dates,
    Session,
}

#[derive(Debug, Clone)]
pub struct ManualSection {
    title: String,
    body: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ManualPage {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPage {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_section(
            "NAME",
            &[format!("{} - {}", self.name, self.summary)],
            &mut out,
        );
        for section in &self.sections {
            self.write_section(&section.title, &section.body, &mut out);
        }
        out.trim_end().to_string()
    }

    fn write_section(&self, title: &str, lines: &[String], out: &mut String) {
        out.push_str(&title.to_uppercase());
        out.push('\n');
        for line in lines {
            if !line.is_empty() {
                out.push_str("  ");
                out.push_str(line);
            }
            out.push('\n');
        }
        out.push('\n');
    }
}

pub struct ManualPageBuilder {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPageBuilder {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, title: &str, body: Vec<String>) -> Self {
        self.sections.push(ManualSection {
            title: title.to_string(),
            body,
        });
        self
    }

    pub fn build(self) -> ManualPage {
        ManualPage {
            name: self.name,
            summary: self.summary,
            sections: self.sections,
        }
    }
}

/// Synopsis line of a command, without the program name.
pub fn synopsis(command: CommandName) -> &'static str {
    match command {
        CommandName::Init => "init",
        CommandName::Config => "config [KEY VALUE]",
        CommandName::Register => "register <name> <email> [--manager]",
        CommandName::Login => "login <email>",
        CommandName::Logout => "logout",
        CommandName::Whoami => "whoami",
        CommandName::ApiKey => "apikey [name]",
        CommandName::Venues => "venues [--page N] [query...]",
        CommandName::Venue => "venue <id>",
        CommandName::Calendar => "calendar <venue-id> [YYYY-MM]",
        CommandName::Book => "book <venue-id> <from> <to> <guests>",
        CommandName::Bookings => "bookings",
        CommandName::Cancel => "cancel <booking-id>",
        CommandName::Manager => "manager <on|off>",
        CommandName::MyVenues => "my-venues",
        CommandName::VenueCreate => "venue-create <file.json>",
        CommandName::VenueUpdate => "venue-update <id> <file.json>",
        CommandName::VenueDelete => "venue-delete <id>",
        CommandName::VenueBookings => "venue-bookings <id>",
        CommandName::Help => "help [command|topic]",
    }
}

pub fn summary(command: CommandName) -> &'static str {
    match command {
        CommandName::Init => "Write a default configuration file.",
        CommandName::Config => "Show the configuration, or set one key.",
        CommandName::Register => "Register a new profile.",
        CommandName::Login => "Sign in and keep the session.",
        CommandName::Logout => "Forget the stored session.",
        CommandName::Whoami => "Show the signed-in profile.",
        CommandName::ApiKey => "Create an API key and store it in the configuration.",
        CommandName::Venues => "List the newest venues, or search them.",
        CommandName::Venue => "Show one venue.",
        CommandName::Calendar => "Show a month of available, booked and past days.",
        CommandName::Book => "Check a stay against existing bookings, then book it.",
        CommandName::Bookings => "List your bookings.",
        CommandName::Cancel => "Cancel one of your bookings.",
        CommandName::Manager => "Turn venue manager mode on or off.",
        CommandName::MyVenues => "List the venues you manage.",
        CommandName::VenueCreate => "Create a venue from a JSON file.",
        CommandName::VenueUpdate => "Replace a venue's details from a JSON file.",
        CommandName::VenueDelete => "Delete a venue you manage.",
        CommandName::VenueBookings => "List the bookings on a venue you manage.",
        CommandName::Help => "Show manual pages.",
    }
}

/// One-line usage shown for `-h` and on argument errors.
pub fn usage(command: CommandName) -> String {
    format!("Usage: holidaze {}", synopsis(command))
}

fn description(command: CommandName) -> Vec<String> {
    let lines: Vec<String> = match command {
        CommandName::Init => vec![
            "Creates config.json (or the --config path) with default values.".into(),
            "Refuses to overwrite an existing file.".into(),
        ],
        CommandName::Config => vec![
            "Without arguments prints every key, its description and value.".into(),
            "With KEY VALUE validates the value and writes the file.".into(),
        ],
        CommandName::Register => vec![
            "The password is read from standard input.".into(),
            format!(
                "Email must end with {REGISTER_EMAIL_DOMAIN}; passwords need {MIN_PASSWORD_LEN}+ characters."
            ),
            "--manager registers the profile as a venue manager.".into(),
        ],
        CommandName::Login => vec![
            "The password is read from standard input.".into(),
            "The session is kept in session.json (or the --session path).".into(),
        ],
        CommandName::Venues => vec![
            "Without a query lists the newest venues first.".into(),
            "Page size comes from VENUES_PAGE_SIZE.".into(),
        ],
        CommandName::Calendar => vec![
            "Defaults to the current month.".into(),
            "Days marked * are booked, days marked - are in the past.".into(),
        ],
        CommandName::Book => vec![
            "The stay runs from check-in <from> to check-out <to>.".into(),
            "Both dates must be free, <from> cannot be in the past,".into(),
            "and guests must fit the venue.".into(),
            "Run 'holidaze help dates' for accepted date formats.".into(),
        ],
        CommandName::VenueCreate | CommandName::VenueUpdate => vec![
            "The file holds name, description, price, maxGuests and optional".into(),
            "media, rating, meta and location fields.".into(),
            format!("maxGuests must be between 1 and {MAX_VENUE_CAPACITY}."),
        ],
        _ => vec![],
    };
    let mut lines = lines;
    if command.requires_manager() {
        lines.push("Requires a venue manager profile.".into());
    }
    lines
}

pub struct ManualCatalog;

impl ManualCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn page_for(&self, topic: Option<&str>) -> Result<ManualPage> {
        let Some(name) = topic else {
            return Ok(self.general_page());
        };
        if let Ok(command) = CommandName::try_from(name) {
            return Ok(self.command_page(command));
        }
        match ExtraTopic::from_str(name.trim()) {
            Ok(ExtraTopic::Dates) => Ok(self.dates_page()),
            Ok(ExtraTopic::Session) => Ok(self.session_page()),
            Err(_) => Err(Error::Parse(format!(
                "Unsupported manual topic: '{}'. Valid topics: {}, {}",
                name.trim(),
                valid_csv::<CommandName>(),
                valid_csv::<ExtraTopic>()
            ))),
        }
    }

    pub fn topics(&self) -> Vec<String> {
        CommandName::iter()
            .map(|c| c.to_string())
            .chain(ExtraTopic::iter().map(|t| t.to_string()))
            .collect()
    }

    fn general_page(&self) -> ManualPage {
        let width = CommandName::iter()
            .map(|c| synopsis(c).len())
            .max()
            .unwrap_or(0);
        let commands = CommandName::iter()
            .map(|c| format!("{:<width$}  # {}", synopsis(c), summary(c)))
            .collect();
        ManualPageBuilder::new("holidaze", "Browse and book Holidaze venues.")
            .section(
                "SYNOPSIS",
                vec!["holidaze [--config PATH] [--session PATH] [--logs DIR] <command> [args]".into()],
            )
            .section("COMMANDS", commands)
            .section(
                "TOPICS",
                vec![
                    "Use 'help <topic>' for details; '<command> -h' prints its usage.".into(),
                    format!("Available topics: {}", self.topics().join(", ")),
                ],
            )
            .build()
    }

    fn command_page(&self, command: CommandName) -> ManualPage {
        let mut builder = ManualPageBuilder::new(command.to_string(), summary(command))
            .section("SYNOPSIS", vec![format!("holidaze {}", synopsis(command))]);
        let description = description(command);
        if !description.is_empty() {
            builder = builder.section("DESCRIPTION", description);
        }
        builder.build()
    }

    fn dates_page(&self) -> ManualPage {
        ManualPageBuilder::new("dates", "Accepted date formats.")
            .section(
                "DESCRIPTION",
                vec![
                    Date::usage(),
                    "Day-month forms use the current year.".into(),
                    "In 'book', a day-month check-out before check-in falls in the next year.".into(),
                    "A date is available when it is today or later and not booked.".into(),
                ],
            )
            .build()
    }

    fn session_page(&self) -> ManualPage {
        ManualPageBuilder::new("session", "How sign-in is kept between runs.")
            .section(
                "DESCRIPTION",
                vec![
                    "'login' stores the profile and access token in the session file.".into(),
                    "'logout' deletes it. An unreadable file counts as signed out.".into(),
                ],
            )
            .build()
    }
}
