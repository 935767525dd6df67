use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

use crate::availability::ValidationError;

/// Every failure a command, the API client, or the config layer can report.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Routing --------------------------------------------------
    /// Bad command-line arguments, dates, numbers, or draft files.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No command with this name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Booking / Domain ---------------------------------------------------
    /// A candidate range rejected by the availability calculator.
    #[error("Booking rejected: {0}")]
    Validation(#[from] ValidationError),

    /// The command needs a signed-in user.
    #[error("You are not signed in. Run 'login <email>' first.")]
    NotSignedIn,

    /// The command needs a venue manager profile.
    #[error("Profile '{name}' is not a venue manager.")]
    NotVenueManager { name: String },

    // ---- Remote API ---------------------------------------------------------
    /// 401 from the API (bad credentials, expired token, missing key).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403 from the API.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404 from the API.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// Generic domain error when you want to bubble a message without a new variant.
    #[error("{0}")]
    Domain(String),

    /// IO passthrough (config, session and draft files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough (config, session, API bodies).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    /// Helper to create a parse error from any displayable value.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    /// Helper to create a generic config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    /// Helper for unknown command.
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }

    /// Map an HTTP status and the API's message onto the matching variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Error::Unauthorized(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            _ => Error::Api { status, message },
        }
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
/// Useful when pulling positional command arguments.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}
