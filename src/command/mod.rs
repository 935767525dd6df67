pub mod account;
pub mod booking;
pub mod browse;
pub mod command_parser;
pub mod commands;
pub mod hosting;
pub mod manual;
mod policies;

use crate::command::command_parser::CommandParser;
use crate::command::commands::{HelpCommand, Input, init_config};
use crate::core::cli::CliPaths;
use crate::core::context::AppContext;
use crate::core::types::CommandName;
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};

/// Run the command line in `paths`.
///
/// `init` and `help` work without a configuration file; every other command
/// loads one and builds an `AppContext` first.
pub fn run(paths: &CliPaths, input: Input<'_>) -> Result<()> {
    let console = Logger::console();

    let Some(command) = paths.command.as_deref() else {
        return HelpCommand::new(&[]).print(&console);
    };

    match CommandName::try_from(command)? {
        CommandName::Init => init_config(&paths.config_path, &paths.args, &console),
        CommandName::Help => HelpCommand::new(&paths.args).print(&console),
        _ => {
            let mut ctx = AppContext::from_cli(paths)?;
            dispatch(&mut ctx, command, &paths.args, input)
        }
    }
}

/// Parse and execute one command against an existing context.
/// Failures are also written to the log file.
pub fn dispatch(
    ctx: &mut AppContext,
    command: &str,
    args: &[String],
    input: Input<'_>,
) -> Result<()> {
    let result = CommandParser::new()
        .parse(command, args)
        .and_then(|cmd| cmd.execute(ctx, input));
    if let Err(err) = &result {
        ctx.logger
            .error(format!("{command}: {err}"), LogTarget::FileOnly);
    }
    result
}
