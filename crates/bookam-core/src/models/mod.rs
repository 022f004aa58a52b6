//! Data models for buses, routes, bookings and the checkout flow.
//!
//! Persistent entities ([`Bus`], [`Route`], [`Booking`], [`User`]) mirror what
//! the backend stores. The remaining types only live for one booking attempt:
//! the chosen [`JourneySelection`], the [`SeatSelection`], raw
//! [`PassengerEntry`] values typed into the passenger forms and the validated
//! [`Passenger`] records produced from them, and the [`PaymentSelection`].
//!
//! Display implementations live in [`crate::display::models`].

pub mod booking;
pub mod bus;
pub mod journey;
pub mod passenger;
pub mod payment;
pub mod route;
pub mod seat;
pub mod status;
pub mod user;


pub use booking::Booking;
pub use bus::Bus;
pub use journey::JourneySelection;
pub use passenger::{
    LeadContact, LeadPassenger, OtherPassenger, Passenger, PassengerEntry, PassengerField,
    PassengerRole, Title,
};
pub use payment::{CardDetails, PaymentMethod, PaymentSelection};
pub use route::{Route, RouteFilter};
pub use seat::{seat_map, SeatId, SeatSelection, SEAT_LETTERS};
pub use status::{BookingStatus, BusType, UserRole};
pub use user::{Session, User};
