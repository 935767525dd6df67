use crate::command::commands::{Command, CommandCore, Input, read_password, sealed, show};
use crate::command::manual::usage;
use crate::command::policies::flag_policy::FlagPolicy;
use crate::config::ConfigKey;
use crate::core::context::AppContext;
use crate::core::models::{LoginRequest, ProfileUpdate, RegisterRequest};
use crate::core::types::{Bool, CommandName, Flag};
use crate::errors::{Error, Result};
use crate::logging::LogTarget;

const DEFAULT_KEY_NAME: &str = "holidaze-cli";

/// Sign-up, sign-in and profile commands.
pub struct AccountCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> AccountCommand<'a> {
    pub fn new(name: CommandName, args: &'a [String]) -> Result<Self> {
        let (min, max) = match name {
            CommandName::Register => (2, Some(2)),
            CommandName::Login => (1, Some(1)),
            CommandName::Logout | CommandName::Whoami => (0, Some(0)),
            CommandName::ApiKey => (0, Some(1)),
            CommandName::Manager => (1, Some(1)),
            other => return Err(Error::unknown(other.to_string())),
        };
        Ok(Self {
            core: CommandCore::new(name, args, FlagPolicy::help_and_arity(min, max, usage(name))),
        })
    }

    fn register(&self, ctx: &mut AppContext, input: Input<'_>) -> Result<()> {
        let name = self.core.arg(0)?;
        let email = self.core.arg(1)?;
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: read_password(input)?,
            venue_manager: Flag::is_present(self.core.args, Flag::Manager),
            avatar: None,
        };
        request.validate()?;

        let profile = ctx.api.register(&request)?;
        ctx.logger.info(
            format!("Registered {profile}. Run 'holidaze login {}' to sign in.", profile.email),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn login(&self, ctx: &mut AppContext, input: Input<'_>) -> Result<()> {
        let request = LoginRequest {
            email: self.core.arg(0)?.to_string(),
            password: read_password(input)?,
        };
        let user = ctx.api.login(&request)?;
        let user = ctx.session.sign_in(user)?;
        ctx.logger
            .info(format!("Signed in as {}", user.profile), LogTarget::ConsoleOnly);
        Ok(())
    }

    fn logout(&self, ctx: &mut AppContext) -> Result<()> {
        let msg = if ctx.session.is_signed_in() {
            "Signed out."
        } else {
            "Not signed in."
        };
        ctx.session.teardown()?;
        ctx.logger.info(msg, LogTarget::ConsoleOnly);
        Ok(())
    }

    fn whoami(&self, ctx: &mut AppContext) -> Result<()> {
        let user = ctx.session.require_user()?;
        show(ctx, |dm, out| dm.render_profile(&user.profile, out))
    }

    fn api_key(&self, ctx: &mut AppContext) -> Result<()> {
        let token = ctx.session.require_token()?;
        let name = self
            .core
            .positionals()
            .first()
            .copied()
            .unwrap_or(DEFAULT_KEY_NAME);
        let key = ctx.api.create_api_key(token, name)?;
        ctx.config.set_key(ConfigKey::ApiKey, &key.key)?;
        ctx.config.take_last_change();
        ctx.logger.info(
            format!("Created API key '{}' and saved it as {}.", key.name, ConfigKey::ApiKey),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    fn manager(&self, ctx: &mut AppContext) -> Result<()> {
        let enable = Bool::try_from_str(self.core.arg(0)?)?.0;
        let user = ctx.session.require_user()?;
        let update = ProfileUpdate {
            venue_manager: Some(enable),
            ..ProfileUpdate::default()
        };
        let profile = ctx
            .api
            .update_profile(&user.access_token, &user.profile.name, &update)?;
        ctx.session.refresh_profile(profile)?;
        let state = if enable { "on" } else { "off" };
        ctx.logger.info(
            format!("Venue manager mode is {state}."),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}

impl<'a> sealed::Sealed<'a> for AccountCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for AccountCommand<'a> {
    fn perform(&self, ctx: &mut AppContext, input: Input<'_>) -> Result<()> {
        match self.core.name {
            CommandName::Register => self.register(ctx, input),
            CommandName::Login => self.login(ctx, input),
            CommandName::Logout => self.logout(ctx),
            CommandName::Whoami => self.whoami(ctx),
            CommandName::ApiKey => self.api_key(ctx),
            CommandName::Manager => self.manager(ctx),
            other => Err(Error::unknown(other.to_string())),
        }
    }
}
