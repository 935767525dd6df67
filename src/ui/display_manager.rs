use crate::api::PageMeta;
use crate::availability::calendar::CalendarMonth;
use crate::availability::{BlockedDates, CandidateRange};
use crate::config::Config;
use crate::core::models::{Booking, Profile, Venue};
use crate::errors::Result;
use crate::ui::ansi::{STYLE_BOLD, paint};
use crate::ui::display_data::{DisplayDataBuilder, format_price};
use crate::ui::table_printer::TablePrinter;
use crate::ui::width_util::WidthUtil;
use chrono::NaiveDate;
use std::io::{self, IsTerminal, Write};

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const MAX_TEXT_WIDTH: usize = 72;

/// Renders every view the CLI shows. Each `render_*` writes to any writer;
/// `text` collects a render into a `String` for the logger.
#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
    pub data: DisplayDataBuilder,
    color: bool,
}

impl DisplayManager {
    /// Colors only when stdout is a terminal.
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
            ..Self::default()
        }
    }

    /// No ANSI styling at all.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn text<F>(&self, render: F) -> Result<String>
    where
        F: FnOnce(&Self, &mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        render(self, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).trim_end().to_string())
    }

    pub fn render_config<W: Write>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let headers = ["ID", "KEY", "DESCRIPTION", "VALUE"];
        let rows = self.data.config_rows(config);
        self.printer
            .render_table("Config", &headers, &rows, "No config items found.", out)
    }

    pub fn render_venues<W: Write>(
        &self,
        title: &str,
        venues: &[Venue],
        meta: Option<&PageMeta>,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["ID", "NAME", "CITY", "PRICE", "GUESTS", "RATING"];
        let rows = self.data.venue_rows(venues);
        self.printer.with_right_aligned(&[3, 4, 5]).render_table(
            title,
            &headers,
            &rows,
            "No venues found.",
            out,
        )?;
        if let Some(meta) = meta.filter(|m| m.page_count > 0) {
            writeln!(
                out,
                "Page {} of {} ({} venues)",
                meta.current_page, meta.page_count, meta.total_count
            )?;
        }
        Ok(())
    }

    pub fn render_venue<W: Write>(
        &self,
        venue: &Venue,
        today: NaiveDate,
        out: &mut W,
    ) -> io::Result<()> {
        let details = self.data.venue_details(venue, today);
        let label_w = details
            .iter()
            .map(|(label, _)| self.util.visible_width(label))
            .max()
            .unwrap_or(0);
        let text_w = self.util.terminal_width().min(MAX_TEXT_WIDTH);

        self.printer.render_banner(&venue.name, text_w, out)?;
        for (label, value) in &details {
            writeln!(out, "{} : {}", self.util.pad_visible(label, label_w), value)?;
        }
        if !venue.description.trim().is_empty() {
            writeln!(out)?;
            for line in self.util.wrap(&venue.description, text_w) {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }

    pub fn render_bookings<W: Write>(
        &self,
        bookings: &[Booking],
        today: NaiveDate,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["ID", "VENUE", "FROM", "TO", "NIGHTS", "GUESTS", "STATUS"];
        let rows = self.data.booking_rows(bookings, today);
        self.printer.with_right_aligned(&[4, 5]).render_table(
            "Bookings",
            &headers,
            &rows,
            "No bookings yet.",
            out,
        )
    }

    pub fn render_venue_bookings<W: Write>(
        &self,
        venue: &Venue,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["ID", "GUEST", "FROM", "TO", "GUESTS"];
        let rows = self.data.venue_booking_rows(venue.bookings());
        self.printer.with_right_aligned(&[4]).render_table(
            &format!("Bookings: {}", venue.name),
            &headers,
            &rows,
            "No bookings on this venue.",
            out,
        )
    }

    pub fn render_calendar<W: Write>(
        &self,
        venue: &Venue,
        month: &CalendarMonth,
        blocked: &BlockedDates,
        today: NaiveDate,
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.calendar_rows(month, blocked, today, self.color);
        self.printer.with_right_aligned(&[0, 1, 2, 3, 4, 5, 6]).render_table(
            &format!("{}: {}", venue.name, month.title()),
            &WEEKDAYS,
            &rows,
            "No days in this month.",
            out,
        )?;
        writeln!(out, "* booked   - past")?;
        writeln!(
            out,
            "{} day(s) available",
            month.available_count(blocked, today)
        )
    }

    /// Price summary shown before a booking is submitted.
    pub fn render_quote<W: Write>(
        &self,
        venue: &Venue,
        range: &CandidateRange,
        out: &mut W,
    ) -> io::Result<()> {
        let nights = range.nights();
        writeln!(
            out,
            "{}: {} to {}, {} guest(s)",
            paint(&venue.name, STYLE_BOLD, self.color),
            range.from,
            range.to,
            range.guests
        )?;
        writeln!(
            out,
            "{} night(s) x {} = {}",
            nights,
            format_price(venue.price),
            format_price(range.total_price(venue.price))
        )
    }

    pub fn render_profile<W: Write>(&self, profile: &Profile, out: &mut W) -> io::Result<()> {
        writeln!(out, "{profile}")?;
        if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
            writeln!(out, "{bio}")?;
        }
        Ok(())
    }
}
