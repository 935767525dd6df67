use crate::api::VenueQuery;
use crate::availability::calendar::CalendarMonth;
use crate::availability::{LoggerObserver, compute_blocked_dates_observed};
use crate::command::commands::{Command, CommandCore, Input, sealed, show};
use crate::command::manual::usage;
use crate::command::policies::flag_policy::FlagPolicy;
use crate::core::context::AppContext;
use crate::core::types::{CommandName, Flag, parse_number};
use crate::errors::{Error, Result};
use std::str::FromStr;

/// Read-only venue commands. None of them need a session.
pub struct BrowseCommand<'a> {
    core: CommandCore<'a>,
}

/// `venues` arguments: an optional `--page N` and free search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueListArgs {
    pub page: u32,
    pub query: Option<String>,
}

impl VenueListArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut page = 1;
        let mut words = Vec::new();
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match Flag::from_str(arg) {
                Ok(Flag::Page) => {
                    let raw = it.next().ok_or_else(|| {
                        Error::Parse(format!(
                            "Missing value for --page.\n{}",
                            usage(CommandName::Venues)
                        ))
                    })?;
                    page = parse_number::<u32>(raw, "page")?;
                    if page == 0 {
                        return Err(Error::parse("Pages start at 1."));
                    }
                }
                Ok(other) => {
                    return Err(Error::Parse(format!(
                        "Unsupported flag '{other}'.\n{}",
                        usage(CommandName::Venues)
                    )));
                }
                Err(_) => words.push(arg.as_str()),
            }
        }
        let query = words.join(" ");
        Ok(Self {
            page,
            query: (!query.trim().is_empty()).then(|| query.trim().to_string()),
        })
    }
}

impl<'a> BrowseCommand<'a> {
    pub fn new(name: CommandName, args: &'a [String]) -> Result<Self> {
        let (min, max) = match name {
            CommandName::Venues => (0, None),
            CommandName::Venue => (1, Some(1)),
            CommandName::Calendar => (1, Some(2)),
            other => return Err(Error::unknown(other.to_string())),
        };
        Ok(Self {
            core: CommandCore::new(name, args, FlagPolicy::help_and_arity(min, max, usage(name))),
        })
    }

    fn venues(&self, ctx: &mut AppContext) -> Result<()> {
        let list = VenueListArgs::parse(self.core.args)?;
        let query = VenueQuery::default()
            .with_limit(ctx.config.venues_page_size())
            .with_page(list.page);
        let (title, page) = match &list.query {
            Some(text) => (format!("Search: {text}"), ctx.api.search_venues(text, &query)?),
            None => ("Venues".to_string(), ctx.api.venues(&query)?),
        };
        show(ctx, |dm, out| {
            dm.render_venues(&title, &page.items, Some(&page.meta), out)
        })
    }

    fn venue(&self, ctx: &mut AppContext) -> Result<()> {
        let venue = ctx.api.venue(self.core.arg(0)?)?;
        let today = ctx.today();
        show(ctx, |dm, out| dm.render_venue(&venue, today, out))
    }

    fn calendar(&self, ctx: &mut AppContext) -> Result<()> {
        let today = ctx.today();
        let month = match self.core.positionals().get(1) {
            Some(raw) => CalendarMonth::parse(raw)?,
            None => CalendarMonth::containing(today),
        };
        let venue = ctx.api.venue(self.core.arg(0)?)?;
        let blocked = compute_blocked_dates_observed(
            venue.bookings(),
            &LoggerObserver::new(ctx.logger.clone()),
        );
        show(ctx, |dm, out| {
            dm.render_calendar(&venue, &month, &blocked, today, out)
        })
    }
}

impl<'a> sealed::Sealed<'a> for BrowseCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for BrowseCommand<'a> {
    fn perform(&self, ctx: &mut AppContext, _input: Input<'_>) -> Result<()> {
        match self.core.name {
            CommandName::Venues => self.venues(ctx),
            CommandName::Venue => self.venue(ctx),
            CommandName::Calendar => self.calendar(ctx),
            other => Err(Error::unknown(other.to_string())),
        }
    }
}
