//! The four checkout pages.
//!
//! Each page is built from the [`BookingDraft`](crate::draft::BookingDraft)
//! addressed to it, checks that the draft carries what the page needs and
//! produces the draft for the next page on submit. Nothing else is shared
//! between pages.
//!
//! | Step | Page | Needs |
//! |------|------|-------|
//! | seat-selection | [`SeatSelectionPage`] | journey, bus capacity, taken seats |
//! | passenger-details | [`PassengerDetailsPage`] | seats, price |
//! | payment | [`PaymentPage`] | seats, price, contact |
//! | confirmation | [`ConfirmationPage`] | journey, seats, price, contact, method |

pub mod confirmation;
pub mod passenger_details;
pub mod payment;
pub mod seat_selection;

pub use confirmation::ConfirmationPage;
pub use passenger_details::{MultiPassengerPage, PassengerDetailsPage, SinglePassengerPage};
pub use payment::PaymentPage;
pub use seat_selection::{SeatSelectionPage, SeatStatus};
