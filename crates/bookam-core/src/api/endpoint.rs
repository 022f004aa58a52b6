//! REST endpoints of the booking backend.

use std::fmt;

use reqwest::Method;

/// Every call the client makes. Paths are relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    ConfirmAccount,
    CreateBooking,
    UpdateBooking,
    DeleteBooking,
    GetBooking,
    ListBookings,
    CreateBus,
    UpdateBus,
    DeleteBus,
    ListBuses,
    GetBus(u64),
    CreateRoute,
    UpdateRoute,
    DeleteRoute,
    ListRoutes,
    SearchRoutes,
    GetRoute(u64),
    ListUsers,
    DeleteUser,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::ConfirmAccount
            | Endpoint::CreateBooking
            | Endpoint::CreateBus
            | Endpoint::CreateRoute => Method::POST,
            Endpoint::UpdateBooking | Endpoint::UpdateBus | Endpoint::UpdateRoute => Method::PUT,
            Endpoint::DeleteBooking
            | Endpoint::DeleteBus
            | Endpoint::DeleteRoute
            | Endpoint::DeleteUser => Method::DELETE,
            Endpoint::GetBooking
            | Endpoint::ListBookings
            | Endpoint::ListBuses
            | Endpoint::GetBus(_)
            | Endpoint::ListRoutes
            | Endpoint::SearchRoutes
            | Endpoint::GetRoute(_)
            | Endpoint::ListUsers => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "account/login".into(),
            Endpoint::Register => "account/register".into(),
            Endpoint::ConfirmAccount => "account/confirm".into(),
            Endpoint::CreateBooking => "booking/create".into(),
            Endpoint::UpdateBooking => "booking/update".into(),
            Endpoint::DeleteBooking => "booking/delete".into(),
            Endpoint::GetBooking => "booking/get".into(),
            Endpoint::ListBookings => "booking/getall".into(),
            Endpoint::CreateBus => "bus/create".into(),
            Endpoint::UpdateBus => "bus/update".into(),
            Endpoint::DeleteBus => "bus/delete".into(),
            Endpoint::ListBuses => "bus/getAll".into(),
            Endpoint::GetBus(id) => format!("bus/{id}"),
            Endpoint::CreateRoute => "route/create".into(),
            Endpoint::UpdateRoute => "route/update".into(),
            Endpoint::DeleteRoute => "route/delete".into(),
            Endpoint::ListRoutes => "route/getall".into(),
            Endpoint::SearchRoutes => "route/search".into(),
            Endpoint::GetRoute(id) => format!("route/{id}"),
            Endpoint::ListUsers => "user/all".into(),
            Endpoint::DeleteUser => "user/delete".into(),
        }
    }

    /// Whether the call works without a bearer token.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Endpoint::Login
                | Endpoint::Register
                | Endpoint::ConfirmAccount
                | Endpoint::ListBuses
                | Endpoint::GetBus(_)
                | Endpoint::ListRoutes
                | Endpoint::SearchRoutes
                | Endpoint::GetRoute(_)
                | Endpoint::CreateBooking
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
