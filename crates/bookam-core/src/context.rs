//! Application context: the backend, the signed-in session and cached
//! collections, passed explicitly to whoever needs them.

use log::info;

use crate::{
    api::BookingApi,
    error::{BookingError, Result},
    models::{Booking, BookingStatus, Bus, Route, Session, User},
    params::{ConfirmAccount, UpdateBooking, UpdateBus, UpdateRoute},
    schema::{
        BusForm, BusSchema, LoginForm, LoginSchema, RegisterForm, RegisterSchema, RouteForm,
        RouteSchema,
    },
};

/// Session and data shared by every screen.
///
/// Construct one per run with [`AppContext::new`]. Signing in installs the
/// bearer token in the backend; [`logout`](Self::logout) clears it along
/// with every cache.
#[derive(Debug)]
pub struct AppContext<A: BookingApi> {
    api: A,
    session: Option<Session>,
    buses: Option<Vec<Bus>>,
    routes: Option<Vec<Route>>,
    bookings: Option<Vec<Booking>>,
}

impl<A: BookingApi> AppContext<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: None,
            buses: None,
            routes: None,
            bookings: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_admin(&self) -> bool {
        self.user().map(User::is_admin).unwrap_or(false)
    }

    /// Reinstates a saved session without calling the backend.
    pub fn restore(&mut self, session: Session) {
        self.api.set_token(Some(session.token.clone()));
        self.session = Some(session);
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<&Session> {
        let params = LoginSchema::default().validate(form)?;
        let session = self.api.login(&params).await?;
        info!("Logged in as {}", session.user.email);
        self.clear_caches();
        self.restore(session);
        self.session.as_ref().ok_or(BookingError::Unauthorized)
    }

    /// Drops the session, the token and every cache. Returns the user that
    /// was signed in.
    pub fn logout(&mut self) -> Option<User> {
        self.api.set_token(None);
        self.clear_caches();
        let user = self.session.take().map(|s| s.user);
        if let Some(user) = &user {
            info!("Logged out {}", user.email);
        }
        user
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<User> {
        let params = RegisterSchema::default().validate(form)?;
        self.api.register(&params).await
    }

    pub async fn confirm_account(&self, email: &str, code: &str) -> Result<User> {
        let params = ConfirmAccount {
            email: email.trim().to_lowercase(),
            code: code.trim().to_string(),
        };
        self.api.confirm_account(&params).await
    }

    fn clear_caches(&mut self) {
        self.buses = None;
        self.routes = None;
        self.bookings = None;
    }

    pub async fn refresh_buses(&mut self) -> Result<&[Bus]> {
        let buses = self.api.list_buses().await?;
        Ok(self.buses.insert(buses).as_slice())
    }

    pub async fn refresh_routes(&mut self) -> Result<&[Route]> {
        let routes = self.api.list_routes().await?;
        Ok(self.routes.insert(routes).as_slice())
    }

    /// Bookings visible to the session: all of them for admins, the user's
    /// own otherwise.
    pub async fn refresh_bookings(&mut self) -> Result<&[Booking]> {
        self.require_session()?;
        let bookings = self.api.list_bookings().await?;
        Ok(self.bookings.insert(bookings).as_slice())
    }

    /// Last fetched buses, if any.
    pub fn buses(&self) -> Option<&[Bus]> {
        self.buses.as_deref()
    }

    pub fn routes(&self) -> Option<&[Route]> {
        self.routes.as_deref()
    }

    pub fn bookings(&self) -> Option<&[Booking]> {
        self.bookings.as_deref()
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(BookingError::Unauthorized)
    }

    fn require_admin(&self) -> Result<&User> {
        let user = &self.require_session()?.user;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(BookingError::Forbidden)
        }
    }

    /// One booking, if it belongs to the session user or the user is an
    /// admin.
    pub async fn get_booking(&self, id: u64) -> Result<Booking> {
        let user = &self.require_session()?.user;
        let booking = self.api.get_booking(id).await?;
        if !user.is_admin() && booking.user_id != Some(user.id) {
            return Err(BookingError::Forbidden);
        }
        Ok(booking)
    }

    /// Cancels one of the session user's bookings.
    pub async fn cancel_booking(&mut self, id: u64) -> Result<Booking> {
        self.get_booking(id).await?;
        let booking = self
            .api
            .update_booking(&UpdateBooking {
                id,
                status: Some(BookingStatus::Cancelled.as_str().to_string()),
            })
            .await?;
        self.bookings = None;
        Ok(booking)
    }

    pub async fn create_bus(&mut self, form: &BusForm) -> Result<Bus> {
        self.require_admin()?;
        let params = BusSchema::default().validate(form)?;
        let bus = self.api.create_bus(&params).await?;
        self.buses = None;
        Ok(bus)
    }

    pub async fn update_bus(&mut self, params: &UpdateBus) -> Result<Bus> {
        self.require_admin()?;
        params.validate()?;
        let bus = self.api.update_bus(params).await?;
        self.buses = None;
        Ok(bus)
    }

    pub async fn delete_bus(&mut self, id: u64) -> Result<()> {
        self.require_admin()?;
        self.api.delete_bus(id).await?;
        self.buses = None;
        Ok(())
    }

    pub async fn create_route(&mut self, form: &RouteForm) -> Result<Route> {
        self.require_admin()?;
        let params = RouteSchema::default().validate(form)?;
        let route = self.api.create_route(&params).await?;
        self.routes = None;
        Ok(route)
    }

    pub async fn update_route(&mut self, params: &UpdateRoute) -> Result<Route> {
        self.require_admin()?;
        let route = self.api.update_route(params).await?;
        self.routes = None;
        Ok(route)
    }

    pub async fn delete_route(&mut self, id: u64) -> Result<()> {
        self.require_admin()?;
        self.api.delete_route(id).await?;
        self.routes = None;
        Ok(())
    }

    pub async fn update_booking(&mut self, params: &UpdateBooking) -> Result<Booking> {
        self.require_admin()?;
        params.validate()?;
        let booking = self.api.update_booking(params).await?;
        self.bookings = None;
        Ok(booking)
    }

    pub async fn delete_booking(&mut self, id: u64) -> Result<()> {
        self.require_admin()?;
        self.api.delete_booking(id).await?;
        self.bookings = None;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.require_admin()?;
        self.api.list_users().await
    }

    pub async fn delete_user(&self, id: u64) -> Result<()> {
        let admin = self.require_admin()?;
        if admin.id == id {
            return Err(BookingError::invalid_input("id")
                .with_reason("You cannot delete your own account"));
        }
        self.api.delete_user(id).await
    }
}
