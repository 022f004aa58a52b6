//! Offline backend over the local SQLite store.

use std::path::{Path, PathBuf};

use jiff::{civil::Date, Timestamp};
use log::{debug, warn};
use tokio::task;

use super::BookingApi;
use crate::{
    db::{seed::SeedSummary, Database},
    error::{BookingError, Result},
    models::{Booking, Bus, Route, RouteFilter, SeatId, Session, User},
    params::{
        ConfirmAccount, CreateBooking, CreateBus, CreateRoute, Login, Register, SearchRoutes,
        UpdateBooking, UpdateBus, UpdateRoute,
    },
};

const TOKEN_PREFIX: &str = "local-";

/// [`BookingApi`] served from a SQLite file.
///
/// Every call opens its own connection on the blocking pool. Passwords are
/// not stored or checked: any confirmed account can log in.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    db_path: PathBuf,
    token: Option<String>,
}

impl LocalBackend {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            token: None,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(BookingError::join)?
    }

    /// User id encoded in the current token.
    fn session_user_id(&self) -> Option<u64> {
        self.token
            .as_deref()?
            .strip_prefix(TOKEN_PREFIX)?
            .split('-')
            .next()?
            .parse()
            .ok()
    }

    /// Inserts demo fixtures relative to `today`.
    pub async fn seed(&self, today: Date) -> Result<SeedSummary> {
        self.with_db(move |db| db.seed(today)).await
    }

    /// Pending confirmation code of an account. The local backend has no
    /// mailer, so the caller shows the code instead.
    pub async fn confirmation_code(&self, email: &str) -> Result<Option<String>> {
        let email = email.to_string();
        self.with_db(move |db| db.confirmation_code(&email)).await
    }
}

/// User behind the token, or `Unauthorized`.
fn signed_in_user(db: &Database, user_id: Option<u64>) -> Result<User> {
    let id = user_id.ok_or(BookingError::Unauthorized)?;
    db.get_user(id)?.ok_or(BookingError::Unauthorized)
}

impl BookingApi for LocalBackend {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn login(&self, params: &Login) -> Result<Session> {
        let email = params.email.clone();
        let user = self
            .with_db(move |db| db.find_user_by_email(&email))
            .await?
            .ok_or_else(|| BookingError::Api {
                status: Some(401),
                message: "Invalid email or password".to_string(),
            })?;
        if !user.confirmed {
            return Err(BookingError::Api {
                status: Some(403),
                message: "Please confirm your account before logging in".to_string(),
            });
        }
        warn!("Local backend does not verify passwords");

        let token = format!(
            "{TOKEN_PREFIX}{}-{}",
            user.id,
            Timestamp::now().as_millisecond()
        );
        Ok(Session { token, user })
    }

    async fn register(&self, params: &Register) -> Result<User> {
        let params = params.clone();
        self.with_db(move |db| db.register_user(&params)).await
    }

    async fn confirm_account(&self, params: &ConfirmAccount) -> Result<User> {
        let ConfirmAccount { email, code } = params.clone();
        self.with_db(move |db| db.confirm_user(&email, &code)).await
    }

    async fn create_booking(&self, params: &CreateBooking) -> Result<Booking> {
        let params = params.clone();
        let user_id = self.session_user_id();
        let booking = self
            .with_db(move |db| db.create_booking(&params, user_id))
            .await?;
        debug!(
            "Stored booking {} for route {} ({} seat(s))",
            booking.reference,
            booking.route_id,
            booking.seats.len()
        );
        Ok(booking)
    }

    async fn update_booking(&self, params: &UpdateBooking) -> Result<Booking> {
        let status = params.validate()?;
        let id = params.id;
        self.with_db(move |db| match status {
            Some(status) => db.update_booking_status(id, status),
            None => db.get_booking(id)?.ok_or(BookingError::BookingNotFound { id }),
        })
        .await
    }

    async fn delete_booking(&self, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_booking(id)).await
    }

    /// Customers may only read their own bookings.
    async fn get_booking(&self, id: u64) -> Result<Booking> {
        let user_id = self.session_user_id();
        self.with_db(move |db| {
            let viewer = signed_in_user(db, user_id)?;
            let booking = db
                .get_booking(id)?
                .ok_or(BookingError::BookingNotFound { id })?;
            if !viewer.is_admin() && booking.user_id != Some(viewer.id) {
                return Err(BookingError::Forbidden);
            }
            Ok(booking)
        })
        .await
    }

    /// Administrators see every booking; customers only their own.
    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        let user_id = self.session_user_id();
        self.with_db(move |db| {
            let viewer = signed_in_user(db, user_id)?;
            db.list_bookings((!viewer.is_admin()).then_some(viewer.id))
        })
        .await
    }

    async fn create_bus(&self, params: &CreateBus) -> Result<Bus> {
        let params = params.clone();
        self.with_db(move |db| db.create_bus(&params)).await
    }

    async fn update_bus(&self, params: &UpdateBus) -> Result<Bus> {
        let params = params.clone();
        self.with_db(move |db| db.update_bus(&params)).await
    }

    async fn delete_bus(&self, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_bus(id)).await
    }

    async fn list_buses(&self) -> Result<Vec<Bus>> {
        self.with_db(|db| db.list_buses()).await
    }

    async fn get_bus(&self, id: u64) -> Result<Bus> {
        self.with_db(move |db| db.get_bus(id)?.ok_or(BookingError::BusNotFound { id }))
            .await
    }

    async fn create_route(&self, params: &CreateRoute) -> Result<Route> {
        let params = params.clone();
        self.with_db(move |db| db.create_route(&params)).await
    }

    async fn update_route(&self, params: &UpdateRoute) -> Result<Route> {
        let params = params.clone();
        self.with_db(move |db| db.update_route(&params)).await
    }

    async fn delete_route(&self, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_route(id)).await
    }

    async fn list_routes(&self) -> Result<Vec<Route>> {
        self.with_db(|db| db.list_routes(None)).await
    }

    async fn search_routes(&self, params: &SearchRoutes) -> Result<Vec<Route>> {
        let filter = RouteFilter::from(params);
        self.with_db(move |db| db.list_routes(Some(&filter))).await
    }

    async fn get_route(&self, id: u64) -> Result<Route> {
        self.with_db(move |db| db.get_route(id)?.ok_or(BookingError::RouteNotFound { id }))
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.with_db(|db| db.list_users()).await
    }

    async fn delete_user(&self, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_user(id)).await
    }

    async fn taken_seats(&self, route_id: u64) -> Result<Vec<SeatId>> {
        self.with_db(move |db| db.taken_seats(route_id)).await
    }
}
