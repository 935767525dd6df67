use crate::command::account::AccountCommand;
use crate::command::booking::BookingCommand;
use crate::command::browse::BrowseCommand;
use crate::command::commands::{CommandDyn, ConfigCommand, HelpCommand};
use crate::command::hosting::HostingCommand;
use crate::core::types::CommandName;
use crate::errors::{Error, Result};

/// Maps a command word onto the command family that runs it.
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse<'a>(&self, command: &str, args: &'a [String]) -> Result<CommandDyn<'a>> {
        let name = CommandName::try_from(command)?;
        Ok(match name {
            CommandName::Init => {
                return Err(Error::parse(
                    "'init' runs before a configuration exists and has no context command.",
                ));
            }
            CommandName::Config => Box::new(ConfigCommand::new(args)),
            CommandName::Help => Box::new(HelpCommand::new(args)),
            CommandName::Register
            | CommandName::Login
            | CommandName::Logout
            | CommandName::Whoami
            | CommandName::ApiKey
            | CommandName::Manager => Box::new(AccountCommand::new(name, args)?),
            CommandName::Venues | CommandName::Venue | CommandName::Calendar => {
                Box::new(BrowseCommand::new(name, args)?)
            }
            CommandName::Book | CommandName::Bookings | CommandName::Cancel => {
                Box::new(BookingCommand::new(name, args)?)
            }
            CommandName::MyVenues
            | CommandName::VenueCreate
            | CommandName::VenueUpdate
            | CommandName::VenueDelete
            | CommandName::VenueBookings => Box::new(HostingCommand::new(name, args)?),
        })
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}
