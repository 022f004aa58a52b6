//! Parameter structures for bookAM operations
//!
//! These are the request payloads exchanged with the backend, shared by the
//! REST client, the local store and the CLI. They carry no framework derives
//! beyond serde (and JSON schema behind the `schema` feature), so each
//! interface converts its own argument types into them.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Form Schemas   │    │  Core Params    │
//! │  (clap derives) │───▶│  (validation)   │───▶│ (JSON payloads) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Payloads are serialized in camelCase to match the REST contract.

use jiff::civil::{Date, DateTime};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{
    BookingStatus, BusType, LeadContact, Passenger, PaymentMethod, SeatId,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for registering a new bus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateBus {
    /// Display name of the bus
    pub name: String,
    /// Registration plate
    pub plate_number: String,
    /// Class of service
    #[serde(default)]
    pub bus_type: BusType,
    /// Number of seats
    pub capacity: u32,
    /// Amenities on board
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Partial update of a bus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateBus {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_type: Option<BusType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
}

/// Parameters for scheduling a new route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateRoute {
    /// Bus that runs the trip
    pub bus_id: u64,
    pub from_city: String,
    pub to_city: String,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub departure_time: DateTime,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub arrival_time: DateTime,
    /// Fare per seat in whole naira
    pub price: u64,
}

/// Partial update of a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoute {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub departure_time: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub arrival_time: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

/// Parameters for the route search page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchRoutes {
    /// Departure city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Arrival city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Travel date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub date: Option<Date>,
}

/// Payload sent by the confirmation step to create a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub route_id: u64,
    pub seats: Vec<SeatId>,
    pub passengers: Vec<Passenger>,
    pub contact: LeadContact,
    pub payment_method: PaymentMethod,
    /// Fare total in whole naira
    pub amount: u64,
    /// Last four card digits for online payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
}

/// Admin update of a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateBooking {
    pub id: u64,
    /// New status ('pending', 'confirmed' or 'cancelled')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateBus {
    /// Checks the new capacity, if any, against the allowed seat count.
    pub fn validate(&self) -> crate::Result<()> {
        let max = crate::schema::bus::MAX_CAPACITY;
        match self.capacity {
            Some(capacity) if capacity == 0 || capacity > max => Err(
                crate::BookingError::invalid_input("capacity")
                    .with_reason(format!("Capacity must be between 1 and {max}")),
            ),
            _ => Ok(()),
        }
    }
}

impl UpdateBooking {
    /// Parse the requested status.
    ///
    /// ```rust
    /// use bookam_core::{models::BookingStatus, params::UpdateBooking};
    ///
    /// let params = UpdateBooking { id: 1, status: Some("cancelled".into()) };
    /// assert_eq!(params.validate()?, Some(BookingStatus::Cancelled));
    ///
    /// let params = UpdateBooking { id: 1, status: Some("lost".into()) };
    /// assert!(params.validate().is_err());
    /// # Ok::<(), bookam_core::BookingError>(())
    /// ```
    pub fn validate(&self) -> crate::Result<Option<BookingStatus>> {
        self.status
            .as_deref()
            .map(|s| {
                s.parse::<BookingStatus>().map_err(|_| {
                    crate::BookingError::invalid_input("status").with_reason(format!(
                        "Invalid status: {s}. Must be 'pending', 'confirmed', or 'cancelled'"
                    ))
                })
            })
            .transpose()
    }
}

/// Credentials for `account/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// Payload for `account/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// Payload for `account/confirm`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmAccount {
    pub email: String,
    pub code: String,
}
