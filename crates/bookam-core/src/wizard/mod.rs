//! Passenger entry: step sequence, per-passenger forms and the
//! multi-passenger tab controller.

pub mod controller;
pub mod form;
pub mod step;

pub use controller::{Blocker, PassengerDetails, PassengerWizard, WizardError};
pub use form::{PassengerForm, SlotKey, SlotState, SlotUpdate};
pub use step::{BookingStep, PassengerMode};
