use crate::availability::{CandidateRange, LoggerObserver, compute_blocked_dates_observed};
use crate::command::commands::{Command, CommandCore, Input, sealed, show};
use crate::command::manual::usage;
use crate::command::policies::flag_policy::FlagPolicy;
use crate::core::context::AppContext;
use crate::core::models::BookingDraft;
use crate::core::types::{CommandName, Date, parse_number};
use crate::errors::{Error, Result};
use crate::logging::LogTarget;
use chrono::{Datelike, NaiveDate};

pub struct BookingCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> BookingCommand<'a> {
    pub fn new(name: CommandName, args: &'a [String]) -> Result<Self> {
        let (min, max) = match name {
            CommandName::Book => (4, Some(4)),
            CommandName::Bookings => (0, Some(0)),
            CommandName::Cancel => (1, Some(1)),
            other => return Err(Error::unknown(other.to_string())),
        };
        Ok(Self {
            core: CommandCore::new(name, args, FlagPolicy::help_and_arity(min, max, usage(name))),
        })
    }

    /// Day-month dates are read in `today`'s year; a check-out that would
    /// fall before check-in moves into the next year.
    fn candidate(&self, today: NaiveDate) -> Result<CandidateRange> {
        let from = Date::try_from_str_in_year(self.core.arg(1)?, today.year())?.0;
        let to = Date::try_from_str_on_or_after(self.core.arg(2)?, from)?.0;
        let guests = parse_number::<u32>(self.core.arg(3)?, "guests")?;
        Ok(CandidateRange::new(from, to, guests))
    }

    /// Validates the stay against the venue's current bookings before anything is sent.
    fn book(&self, ctx: &mut AppContext) -> Result<()> {
        let token = ctx.session.require_token()?;
        let venue_id = self.core.arg(0)?;
        let range = self.candidate(ctx.today())?;

        let venue = ctx.api.venue(venue_id)?;
        let blocked = compute_blocked_dates_observed(
            venue.bookings(),
            &LoggerObserver::new(ctx.logger.clone()),
        );
        if let Err(rejection) = range.validate(&blocked, ctx.today(), venue.max_guests) {
            ctx.logger.warn(
                format!("Rejected {} to {} at venue {}: {rejection}", range.from, range.to, venue.id),
                LogTarget::FileOnly,
            );
            return Err(rejection.into());
        }

        show(ctx, |dm, out| dm.render_quote(&venue, &range, out))?;

        let draft = BookingDraft {
            date_from: range.from,
            date_to: range.to,
            guests: range.guests,
            venue_id: venue.id.clone(),
        };
        let booking = ctx.api.create_booking(token, &draft)?;
        ctx.logger.info(
            format!("Booked {} (booking id {}).", venue.name, booking.id),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn bookings(&self, ctx: &mut AppContext) -> Result<()> {
        let user = ctx.session.require_user()?;
        let bookings = ctx
            .api
            .profile_bookings(&user.access_token, &user.profile.name)?;
        let today = ctx.today();
        show(ctx, |dm, out| dm.render_bookings(&bookings, today, out))
    }

    fn cancel(&self, ctx: &mut AppContext) -> Result<()> {
        let token = ctx.session.require_token()?;
        let id = self.core.arg(0)?;
        ctx.api.delete_booking(token, id)?;
        ctx.logger
            .info(format!("Cancelled booking {id}."), LogTarget::ConsoleAndFile);
        Ok(())
    }
}

impl<'a> sealed::Sealed<'a> for BookingCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for BookingCommand<'a> {
    fn perform(&self, ctx: &mut AppContext, _input: Input<'_>) -> Result<()> {
        match self.core.name {
            CommandName::Book => self.book(ctx),
            CommandName::Bookings => self.bookings(ctx),
            CommandName::Cancel => self.cancel(ctx),
            other => Err(Error::unknown(other.to_string())),
        }
    }
}
