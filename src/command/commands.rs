use crate::command::manual::{ManualCatalog, usage};
use crate::command::policies::flag_policy::{FlagDecision, FlagPolicy};
use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::types::CommandName;
use crate::errors::{Error, Result, require_parse};
use crate::logging::{LogTarget, Logger};
use crate::ui::display_manager::DisplayManager;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

pub struct CommandCore<'a> {
    pub name: CommandName,
    pub args: &'a [String],
    pub flag_policy: FlagPolicy,
}
impl<'a> CommandCore<'a> {
    pub fn new(name: CommandName, args: &'a [String], flag_policy: FlagPolicy) -> Self {
        Self {
            name,
            args,
            flag_policy,
        }
    }

    /// Positional arguments, `--flags` removed.
    pub fn positionals(&self) -> Vec<&'a str> {
        self.args
            .iter()
            .filter(|a| !a.starts_with("--"))
            .map(String::as_str)
            .collect()
    }

    pub fn arg(&self, idx: usize) -> Result<&'a str> {
        require_parse(
            self.positionals().get(idx).copied(),
            format!("Missing argument(s).\n{}", usage(self.name)),
        )
    }
}

pub(crate) mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

/// Where a command reads secrets such as passwords from.
pub type Input<'i> = &'i mut dyn BufRead;

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String {
        usage(self.core().name)
    }

    fn perform(&self, ctx: &mut AppContext, input: Input<'_>) -> Result<()>;

    fn execute(&self, ctx: &mut AppContext, input: Input<'_>) -> Result<()> {
        let core = self.core();
        match core.flag_policy.evaluate(core.args) {
            FlagDecision::ShortCircuitUsage => {
                ctx.logger.info(self.usage(), LogTarget::ConsoleOnly);
                Ok(())
            }
            FlagDecision::Error(e) => Err(e),
            FlagDecision::Continue => {
                if core.name.requires_manager() {
                    ctx.session.require_manager()?;
                }
                self.perform(ctx, input)
            }
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

/// Render with `render` and print the result to the console.
pub fn show<F>(ctx: &AppContext, render: F) -> Result<()>
where
    F: FnOnce(&DisplayManager, &mut Vec<u8>) -> io::Result<()>,
{
    let text = ctx.display.text(render)?;
    ctx.logger.info(text, LogTarget::ConsoleOnly);
    Ok(())
}

/// Read one line as a password. Prompts only when stdin is a terminal.
pub fn read_password(input: Input<'_>) -> Result<String> {
    if io::stdin().is_terminal() {
        eprint!("Password: ");
        let _ = io::stderr().flush();
    }
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(Error::parse("A password is required on standard input."));
    }
    Ok(password)
}

/// `init`: runs before any configuration exists, so it takes a path instead of a context.
pub fn init_config(config_path: &Path, args: &[String], logger: &Logger) -> Result<()> {
    let policy = FlagPolicy::help_and_arity(0, Some(0), usage(CommandName::Init));
    match policy.evaluate(args) {
        FlagDecision::ShortCircuitUsage => {
            logger.info(usage(CommandName::Init), LogTarget::ConsoleOnly);
            Ok(())
        }
        FlagDecision::Error(e) => Err(e),
        FlagDecision::Continue => {
            let config = Config::write_default(config_path)?;
            logger.info(
                format!("Wrote default configuration to {}", config.path().display()),
                LogTarget::ConsoleOnly,
            );
            Ok(())
        }
    }
}

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        let policy = FlagPolicy::help_and_arity(0, Some(2), usage(CommandName::Config));
        Self {
            core: CommandCore::new(CommandName::Config, args, policy),
        }
    }
}

impl<'a> sealed::Sealed<'a> for ConfigCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ConfigCommand<'a> {
    fn perform(&self, ctx: &mut AppContext, _input: Input<'_>) -> Result<()> {
        match self.core.positionals().as_slice() {
            [] => show(ctx, |dm, out| dm.render_config(&ctx.config, out)),
            [key, value] => {
                ctx.config.set(key, value)?;
                ctx.logger
                    .set_file_logging_enabled(ctx.config.file_logging_enabled());
                if let Some((key, old, new)) = ctx.config.take_last_change() {
                    ctx.logger.info(
                        format!("Updated {key}: {old} -> {new}"),
                        LogTarget::ConsoleAndFile,
                    );
                }
                Ok(())
            }
            _ => Err(Error::Parse(format!(
                "Expected no arguments or KEY VALUE.\n{}",
                self.usage()
            ))),
        }
    }
}

pub struct HelpCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> HelpCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        let policy = FlagPolicy::help_and_arity(0, Some(1), usage(CommandName::Help));
        Self {
            core: CommandCore::new(CommandName::Help, args, policy),
        }
    }

    /// The manual page text for the optional topic argument.
    pub fn page(&self) -> Result<String> {
        let topic = self.core.positionals().first().copied();
        Ok(ManualCatalog::new().page_for(topic)?.render())
    }

    /// Print without a context, for runs where no configuration exists yet.
    pub fn print(&self, logger: &Logger) -> Result<()> {
        match self.core.flag_policy.evaluate(self.core.args) {
            FlagDecision::ShortCircuitUsage => {
                logger.info(self.usage(), LogTarget::ConsoleOnly);
                Ok(())
            }
            FlagDecision::Error(e) => Err(e),
            FlagDecision::Continue => {
                logger.info(self.page()?, LogTarget::ConsoleOnly);
                Ok(())
            }
        }
    }
}

impl<'a> sealed::Sealed<'a> for HelpCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for HelpCommand<'a> {
    fn perform(&self, ctx: &mut AppContext, _input: Input<'_>) -> Result<()> {
        ctx.logger.info(self.page()?, LogTarget::ConsoleOnly);
        Ok(())
    }
}
