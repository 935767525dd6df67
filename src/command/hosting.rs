use crate::command::commands::{Command, CommandCore, Input, sealed, show};
use crate::command::manual::usage;
use crate::command::policies::flag_policy::FlagPolicy;
use crate::core::context::AppContext;
use crate::core::models::{Venue, VenueDraft};
use crate::core::types::CommandName;
use crate::errors::{Error, Result};
use crate::logging::LogTarget;
use std::path::Path;

/// Venue manager commands. `Command::execute` checks the manager flag first.
pub struct HostingCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> HostingCommand<'a> {
    pub fn new(name: CommandName, args: &'a [String]) -> Result<Self> {
        let (min, max) = match name {
            CommandName::MyVenues => (0, Some(0)),
            CommandName::VenueCreate => (1, Some(1)),
            CommandName::VenueUpdate => (2, Some(2)),
            CommandName::VenueDelete | CommandName::VenueBookings => (1, Some(1)),
            other => return Err(Error::unknown(other.to_string())),
        };
        Ok(Self {
            core: CommandCore::new(name, args, FlagPolicy::help_and_arity(min, max, usage(name))),
        })
    }

    /// Fetch a venue and make sure the signed-in manager owns it.
    fn owned_venue(ctx: &AppContext, id: &str) -> Result<Venue> {
        let user = ctx.session.require_manager()?;
        let venue = ctx.api.venue(id)?;
        if !venue.is_owned_by(&user.profile.name) {
            return Err(Error::Forbidden(format!(
                "Venue '{}' is not managed by {}.",
                venue.name, user.profile.name
            )));
        }
        Ok(venue)
    }

    fn my_venues(&self, ctx: &mut AppContext) -> Result<()> {
        let user = ctx.session.require_manager()?;
        let venues = ctx
            .api
            .profile_venues(&user.access_token, &user.profile.name)?;
        show(ctx, |dm, out| dm.render_venues("My venues", &venues, None, out))
    }

    fn venue_create(&self, ctx: &mut AppContext) -> Result<()> {
        let token = ctx.session.require_token()?;
        let draft = VenueDraft::from_json_file(Path::new(self.core.arg(0)?))?;
        let venue = ctx.api.create_venue(token, &draft)?;
        ctx.logger.info(
            format!("Created venue '{}' (id {}).", venue.name, venue.id),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn venue_update(&self, ctx: &mut AppContext) -> Result<()> {
        let draft = VenueDraft::from_json_file(Path::new(self.core.arg(1)?))?;
        let existing = Self::owned_venue(ctx, self.core.arg(0)?)?;
        let token = ctx.session.require_token()?;
        let venue = ctx.api.update_venue(token, &existing.id, &draft)?;
        ctx.logger.info(
            format!("Updated venue '{}' (id {}).", venue.name, venue.id),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn venue_delete(&self, ctx: &mut AppContext) -> Result<()> {
        let venue = Self::owned_venue(ctx, self.core.arg(0)?)?;
        let token = ctx.session.require_token()?;
        ctx.api.delete_venue(token, &venue.id)?;
        ctx.logger.info(
            format!("Deleted venue '{}' (id {}).", venue.name, venue.id),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn venue_bookings(&self, ctx: &mut AppContext) -> Result<()> {
        let venue = Self::owned_venue(ctx, self.core.arg(0)?)?;
        show(ctx, |dm, out| dm.render_venue_bookings(&venue, out))
    }
}

impl<'a> sealed::Sealed<'a> for HostingCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for HostingCommand<'a> {
    fn perform(&self, ctx: &mut AppContext, _input: Input<'_>) -> Result<()> {
        match self.core.name {
            CommandName::MyVenues => self.my_venues(ctx),
            CommandName::VenueCreate => self.venue_create(ctx),
            CommandName::VenueUpdate => self.venue_update(ctx),
            CommandName::VenueDelete => self.venue_delete(ctx),
            CommandName::VenueBookings => self.venue_bookings(ctx),
            other => Err(Error::unknown(other.to_string())),
        }
    }
}
