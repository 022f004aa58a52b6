//! Environment configuration and the saved CLI session.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    api::BackendBuilder,
    error::{BookingError, Result},
    models::Session,
};

/// Base URL of the REST backend. Unset means the local store.
pub const API_URL_ENV: &str = "BOOKAM_API_URL";
/// Path of the local SQLite database.
pub const DATABASE_ENV: &str = "BOOKAM_DATABASE";

/// Backend settings from the environment, overridable by flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub database_path: Option<PathBuf>,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_url: non_empty_var(API_URL_ENV),
            database_path: non_empty_var(DATABASE_ENV).map(PathBuf::from),
        }
    }

    /// Explicit values win over the environment.
    pub fn with_overrides(self, api_url: Option<String>, database_path: Option<PathBuf>) -> Self {
        Self {
            api_url: api_url.or(self.api_url),
            database_path: database_path.or(self.database_path),
        }
    }

    pub fn builder(&self) -> BackendBuilder {
        BackendBuilder::new()
            .with_api_url(self.api_url.clone())
            .with_database_path(self.database_path.as_ref())
    }
}

/// The logged-in session kept between CLI invocations.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// `$XDG_STATE_HOME/bookam/session.json`
    pub fn default_location() -> Result<Self> {
        let path = xdg::BaseDirectories::with_prefix("bookam")
            .place_state_file("session.json")
            .map_err(|e| BookingError::XdgDirectory(e.to_string()))?;
        Ok(Self { path })
    }

    /// Session file beside the database, so separate databases keep
    /// separate logins.
    pub fn beside(database: &Path) -> Self {
        Self {
            path: database.with_extension("session.json"),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fs_error(&self, source: std::io::Error) -> BookingError {
        BookingError::FileSystem {
            path: self.path.clone(),
            source,
        }
    }

    pub fn load(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.fs_error(e)),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.fs_error(e))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json).map_err(|e| self.fs_error(e))?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Removes the file; returns whether a session existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.fs_error(e)),
        }
    }
}
