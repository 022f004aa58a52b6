//! Backend access.
//!
//! [`BookingApi`] is the one seam between the app and whatever stores the
//! data. Two implementations exist:
//!
//! - [`RestClient`] talks JSON over HTTP to the bookAM REST backend;
//! - [`LocalBackend`] keeps everything in a local SQLite file.
//!
//! [`Backend`] wraps either one and is what [`BackendBuilder`] produces.

pub mod backend;
pub mod endpoint;
pub mod envelope;
pub mod local;
pub mod rest;

pub use backend::{Backend, BackendBuilder};
pub use endpoint::Endpoint;
pub use envelope::ApiResponse;
pub use local::LocalBackend;
pub use rest::RestClient;

use crate::{
    error::Result,
    models::{Booking, Bus, Route, SeatId, Session, User},
    params::{
        ConfirmAccount, CreateBooking, CreateBus, CreateRoute, Login, Register, SearchRoutes,
        UpdateBooking, UpdateBus, UpdateRoute,
    },
};

/// Operations offered by the booking backend.
#[allow(async_fn_in_trait)]
pub trait BookingApi {
    /// Installs or clears the bearer token sent with later calls.
    fn set_token(&mut self, token: Option<String>);

    fn token(&self) -> Option<&str>;

    async fn login(&self, params: &Login) -> Result<Session>;

    async fn register(&self, params: &Register) -> Result<User>;

    async fn confirm_account(&self, params: &ConfirmAccount) -> Result<User>;

    async fn create_booking(&self, params: &CreateBooking) -> Result<Booking>;

    async fn update_booking(&self, params: &UpdateBooking) -> Result<Booking>;

    async fn delete_booking(&self, id: u64) -> Result<()>;

    async fn get_booking(&self, id: u64) -> Result<Booking>;

    async fn list_bookings(&self) -> Result<Vec<Booking>>;

    async fn create_bus(&self, params: &CreateBus) -> Result<Bus>;

    async fn update_bus(&self, params: &UpdateBus) -> Result<Bus>;

    async fn delete_bus(&self, id: u64) -> Result<()>;

    async fn list_buses(&self) -> Result<Vec<Bus>>;

    async fn get_bus(&self, id: u64) -> Result<Bus>;

    async fn create_route(&self, params: &CreateRoute) -> Result<Route>;

    async fn update_route(&self, params: &UpdateRoute) -> Result<Route>;

    async fn delete_route(&self, id: u64) -> Result<()>;

    async fn list_routes(&self) -> Result<Vec<Route>>;

    async fn search_routes(&self, params: &SearchRoutes) -> Result<Vec<Route>>;

    async fn get_route(&self, id: u64) -> Result<Route>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn delete_user(&self, id: u64) -> Result<()>;

    /// Seats already held on a route. The default derives them from the
    /// booking list.
    async fn taken_seats(&self, route_id: u64) -> Result<Vec<SeatId>> {
        let bookings = self.list_bookings().await?;
        let mut seats: Vec<SeatId> = bookings
            .into_iter()
            .filter(|b| b.route_id == route_id && b.status.holds_seats())
            .flat_map(|b| b.seats)
            .collect();
        seats.sort();
        seats.dedup();
        Ok(seats)
    }
}
