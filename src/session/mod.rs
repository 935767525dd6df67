//! The signed-in user, passed explicitly through `AppContext`.
//!
//! A `Session` is created with `Session::init(store)`, which restores whatever
//! the store holds. `sign_in` replaces the user and persists it; `teardown`
//! forgets it and clears the store. Nothing else reads or writes session data.


use crate::core::models::{AuthUser, Profile};
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Where a session lives between runs.
pub trait SessionStore {
    /// `Ok(None)` when there is nothing stored.
    fn load(&self) -> Result<Option<AuthUser>>;
    fn save(&self, user: &AuthUser) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    saved_at: DateTime<Utc>,
    user: AuthUser,
}

/// JSON file store, one user per file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<AuthUser>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let file: SessionFile = serde_json::from_str(&text).map_err(|e| {
            Error::Parse(format!(
                "Invalid session file '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(file.user))
    }

    fn save(&self, user: &AuthUser) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = SessionFile {
            saved_at: Utc::now(),
            user: user.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<AuthUser>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: AuthUser) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(user))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<AuthUser>>> {
        self.slot
            .lock()
            .map_err(|_| Error::Domain("Session store lock poisoned".into()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<AuthUser>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, user: &AuthUser) -> Result<()> {
        *self.lock()? = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

pub struct Session {
    store: Box<dyn SessionStore>,
    user: Option<AuthUser>,
    logger: Logger,
}

impl Session {
    /// Restore from `store`. An unreadable store counts as signed out.
    pub fn init(store: Box<dyn SessionStore>, logger: Logger) -> Self {
        let user = match store.load() {
            Ok(user) => user,
            Err(err) => {
                logger.warn(
                    format!("Ignoring stored session: {err}"),
                    LogTarget::FileOnly,
                );
                None
            }
        };
        Self {
            store,
            user,
            logger,
        }
    }

    pub fn sign_in(&mut self, user: AuthUser) -> Result<&AuthUser> {
        self.store.save(&user)?;
        self.logger.info(
            format!("Signed in as {}", user.profile.name),
            LogTarget::FileOnly,
        );
        Ok(&*self.user.insert(user))
    }

    pub fn teardown(&mut self) -> Result<()> {
        self.store.clear()?;
        if let Some(user) = self.user.take() {
            self.logger.info(
                format!("Signed out {}", user.profile.name),
                LogTarget::FileOnly,
            );
        }
        Ok(())
    }

    /// Replace the cached profile after the API changed it, keeping the token.
    pub fn refresh_profile(&mut self, profile: Profile) -> Result<()> {
        let user = self.user.as_mut().ok_or(Error::NotSignedIn)?;
        user.profile = profile;
        self.store.save(user)
    }

    pub fn current(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> Result<&AuthUser> {
        self.user.as_ref().ok_or(Error::NotSignedIn)
    }

    pub fn require_token(&self) -> Result<&str> {
        Ok(self.require_user()?.access_token.as_str())
    }

    pub fn require_manager(&self) -> Result<&AuthUser> {
        let user = self.require_user()?;
        if !user.profile.venue_manager {
            return Err(Error::NotVenueManager {
                name: user.profile.name.clone(),
            });
        }
        Ok(user)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user.as_ref().map(|u| &u.profile.name))
            .finish()
    }
}
