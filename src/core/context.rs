use crate::api::{HolidazeApi, HttpClient};
use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::errors::Result;
use crate::logging::Logger;
use crate::session::{FileSessionStore, Session, SessionStore};
use crate::ui::display_manager::DisplayManager;
use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::PathBuf;

/// Everything one command run needs: config, session, API client and logger.
pub struct AppContext {
    pub config: Config,
    pub session: Session,
    pub api: Box<dyn HolidazeApi>,
    pub logger: Logger,
    pub display: DisplayManager,
    pub config_path: PathBuf,
    pub session_path: PathBuf,
    pub logs_dir: PathBuf,
    today: Option<NaiveDate>,
}

impl AppContext {
    pub fn new_with_paths(
        config_path: PathBuf,
        session_path: PathBuf,
        logs_dir: PathBuf,
    ) -> Result<Self> {
        let config = Config::load_from(&config_path)?;

        let logger = Logger::with_log_dir(&logs_dir, config.file_logging_enabled());

        let api = HttpClient::from_config(&config, logger.clone())?;
        let session = Session::init(
            Box::new(FileSessionStore::new(&session_path)),
            logger.clone(),
        );

        Ok(Self {
            config,
            session,
            api: Box::new(api),
            logger,
            display: DisplayManager::new(),
            config_path,
            session_path,
            logs_dir,
            today: None,
        })
    }

    pub fn from_cli(paths: &CliPaths) -> Result<Self> {
        Self::new_with_paths(
            paths.config_path.clone(),
            paths.session_path.clone(),
            paths.logs_dir.clone(),
        )
    }

    /// Context over caller-supplied parts, used by tests and embedders. Output is unstyled.
    pub fn with_parts(
        config: Config,
        api: Box<dyn HolidazeApi>,
        store: Box<dyn SessionStore>,
        logger: Logger,
    ) -> Self {
        let config_path = config.path().to_path_buf();
        let session = Session::init(store, logger.clone());
        let logs_dir = logger.log_dir().unwrap_or_else(|| PathBuf::from("logs"));
        Self {
            config,
            session,
            api,
            logger,
            display: DisplayManager::plain(),
            config_path,
            session_path: PathBuf::new(),
            logs_dir,
            today: None,
        }
    }

    /// Pin the calendar day used for availability checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The user's local calendar day, unless pinned.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("config_path", &self.config_path)
            .field("session", &self.session)
            .field("logger", &self.logger)
            .finish()
    }
}
