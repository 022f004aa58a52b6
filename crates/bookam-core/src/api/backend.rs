//! Backend selection and construction.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::{BookingApi, LocalBackend, RestClient};
use crate::{
    db::Database,
    error::{BookingError, Result},
    models::{Booking, Bus, Route, SeatId, Session, User},
    params::{
        ConfirmAccount, CreateBooking, CreateBus, CreateRoute, Login, Register, SearchRoutes,
        UpdateBooking, UpdateBus, UpdateRoute,
    },
};

/// The backend the app talks to.
#[derive(Debug, Clone)]
pub enum Backend {
    Rest(RestClient),
    Local(LocalBackend),
}

impl Backend {
    pub fn as_local(&self) -> Option<&LocalBackend> {
        match self {
            Backend::Local(local) => Some(local),
            Backend::Rest(_) => None,
        }
    }

    /// Where the data lives, for status output.
    pub fn location(&self) -> String {
        match self {
            Backend::Rest(rest) => rest.base_url().to_string(),
            Backend::Local(local) => local.database_path().display().to_string(),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $inner:ident => $call:expr) => {
        match $self {
            Backend::Rest($inner) => $call,
            Backend::Local($inner) => $call,
        }
    };
}

impl BookingApi for Backend {
    fn set_token(&mut self, token: Option<String>) {
        delegate!(self, api => api.set_token(token))
    }

    fn token(&self) -> Option<&str> {
        delegate!(self, api => api.token())
    }

    async fn login(&self, params: &Login) -> Result<Session> {
        delegate!(self, api => api.login(params).await)
    }

    async fn register(&self, params: &Register) -> Result<User> {
        delegate!(self, api => api.register(params).await)
    }

    async fn confirm_account(&self, params: &ConfirmAccount) -> Result<User> {
        delegate!(self, api => api.confirm_account(params).await)
    }

    async fn create_booking(&self, params: &CreateBooking) -> Result<Booking> {
        delegate!(self, api => api.create_booking(params).await)
    }

    async fn update_booking(&self, params: &UpdateBooking) -> Result<Booking> {
        delegate!(self, api => api.update_booking(params).await)
    }

    async fn delete_booking(&self, id: u64) -> Result<()> {
        delegate!(self, api => api.delete_booking(id).await)
    }

    async fn get_booking(&self, id: u64) -> Result<Booking> {
        delegate!(self, api => api.get_booking(id).await)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        delegate!(self, api => api.list_bookings().await)
    }

    async fn create_bus(&self, params: &CreateBus) -> Result<Bus> {
        delegate!(self, api => api.create_bus(params).await)
    }

    async fn update_bus(&self, params: &UpdateBus) -> Result<Bus> {
        delegate!(self, api => api.update_bus(params).await)
    }

    async fn delete_bus(&self, id: u64) -> Result<()> {
        delegate!(self, api => api.delete_bus(id).await)
    }

    async fn list_buses(&self) -> Result<Vec<Bus>> {
        delegate!(self, api => api.list_buses().await)
    }

    async fn get_bus(&self, id: u64) -> Result<Bus> {
        delegate!(self, api => api.get_bus(id).await)
    }

    async fn create_route(&self, params: &CreateRoute) -> Result<Route> {
        delegate!(self, api => api.create_route(params).await)
    }

    async fn update_route(&self, params: &UpdateRoute) -> Result<Route> {
        delegate!(self, api => api.update_route(params).await)
    }

    async fn delete_route(&self, id: u64) -> Result<()> {
        delegate!(self, api => api.delete_route(id).await)
    }

    async fn list_routes(&self) -> Result<Vec<Route>> {
        delegate!(self, api => api.list_routes().await)
    }

    async fn search_routes(&self, params: &SearchRoutes) -> Result<Vec<Route>> {
        delegate!(self, api => api.search_routes(params).await)
    }

    async fn get_route(&self, id: u64) -> Result<Route> {
        delegate!(self, api => api.get_route(id).await)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        delegate!(self, api => api.list_users().await)
    }

    async fn delete_user(&self, id: u64) -> Result<()> {
        delegate!(self, api => api.delete_user(id).await)
    }

    async fn taken_seats(&self, route_id: u64) -> Result<Vec<SeatId>> {
        delegate!(self, api => api.taken_seats(route_id).await)
    }
}

/// Builder for [`Backend`] instances.
///
/// With an API URL the builder produces a [`RestClient`]; otherwise a
/// [`LocalBackend`] on the configured or default database file.
#[derive(Debug, Clone, Default)]
pub struct BackendBuilder {
    database_path: Option<PathBuf>,
    api_url: Option<String>,
    token: Option<String>,
}

impl BackendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/bookam/bookam.db` or `~/.local/share/bookam/bookam.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses the REST backend at `url` instead of the local store.
    pub fn with_api_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.api_url = Some(url.into());
        }
        self
    }

    /// Bearer token to start with, e.g. from a saved session.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Builds the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Configuration` for an unusable API URL,
    /// `BookingError::FileSystem` if the database directory cannot be created
    /// and `BookingError::Database` if database initialization fails
    pub async fn build(self) -> Result<Backend> {
        let mut backend = match self.api_url {
            Some(url) => {
                debug!("Using REST backend at {url}");
                Backend::Rest(RestClient::new(&url)?)
            }
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| BookingError::FileSystem {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }

                let init_path = db_path.clone();
                task::spawn_blocking(move || Database::new(&init_path).map(|_| ()))
                    .await
                    .map_err(BookingError::join)??;
                debug!("Using local database at {}", db_path.display());
                Backend::Local(LocalBackend::new(db_path))
            }
        };
        backend.set_token(self.token);
        Ok(backend)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("bookam")
            .place_data_file("bookam.db")
            .map_err(|e| BookingError::XdgDirectory(e.to_string()))
    }
}
