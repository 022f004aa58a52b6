//! Core library for bookAM, an intercity bus booking app.
//!
//! The crate holds everything except the user interface: domain models,
//! form schemas, the multi-passenger wizard, the four checkout pages and the
//! versioned draft that carries state between them, and two interchangeable
//! backends (a REST client and a local SQLite store).
//!
//! # Checkout flow
//!
//! ```text
//! seat-selection ──▶ passenger-details ──▶ payment ──▶ confirmation
//!        │                  │                  │              │
//!        └── BookingDraft ──┴── BookingDraft ──┴─ BookingDraft┘
//! ```
//!
//! Each page is opened from the draft addressed to it and submits the draft
//! for the next one. The draft travels as a query string, so any step can be
//! resumed from a URL.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bookam_core::{
//!     checkout::{PassengerDetailsPage, SeatSelectionPage},
//!     BackendBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = BackendBuilder::new()
//!     .with_database_path(Some("bookam.db"))
//!     .build()
//!     .await?;
//!
//! let mut seats = SeatSelectionPage::load(&backend, 1).await?;
//! seats.toggle(&"1A".parse()?)?;
//! seats.toggle(&"1B".parse()?)?;
//! let draft = seats.proceed(None)?;
//!
//! // Two seats open the tabbed passenger form.
//! let page = PassengerDetailsPage::from_query(&draft.href()?)?;
//! println!("{}", page.fare());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod checkout;
pub mod config;
pub mod context;
pub mod currency;
pub mod db;
pub mod display;
pub mod draft;
pub mod error;
pub mod models;
pub mod params;
pub mod schema;
pub mod wizard;

// Re-export commonly used types
pub use api::{Backend, BackendBuilder, BookingApi, LocalBackend, RestClient};
pub use context::AppContext;
pub use currency::Naira;
pub use db::Database;
pub use draft::{BookingDraft, DRAFT_VERSION};
pub use error::{BookingError, Result};
pub use models::{
    Booking, BookingStatus, Bus, JourneySelection, Passenger, PaymentMethod, Route, SeatId,
    SeatSelection, Session, User,
};
pub use wizard::{BookingStep, PassengerMode, PassengerWizard};
