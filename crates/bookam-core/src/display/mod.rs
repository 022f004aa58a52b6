//! Display formatting for domain models, checkout pages and admin tables.
//!
//! Everything here renders markdown, which the CLI passes through its
//! terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Display impls,  │    │   Markdown      │
//! │  & Pages        │───▶│ wrappers and    │───▶│   output        │
//! │                 │    │ tables          │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`models`]: `Display` for buses, routes, bookings and users
//! - [`tables`]: fixed column sets for the admin dashboard
//! - [`checkout`]: seat map, passenger tabs, draft summary and ticket
//! - [`results`]: create / update / delete confirmations
//! - [`status`]: one-line notices
//! - [`datetime`]: timestamp and travel time formatting
//!
//! ```rust
//! use bookam_core::display::Notice;
//!
//! let notice = Notice::success("Booking confirmed");
//! assert_eq!(notice.to_string(), "✓ Booking confirmed\n");
//! ```

pub mod checkout;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod tables;

pub use checkout::{DraftSummary, PassengerTabs, SeatMap, Ticket};
pub use datetime::{LocalDateTime, TravelTime, TripDuration};
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
pub use status::{Notice, NoticeLevel};
pub use tables::{booking_columns, bus_columns, route_columns, user_columns, Column, Table};
