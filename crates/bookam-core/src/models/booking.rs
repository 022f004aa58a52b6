//! Booking model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{BookingStatus, LeadContact, Passenger, PaymentMethod, SeatId};

/// A confirmed or pending reservation of one or more seats on a route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: u64,

    /// Human-facing booking reference printed on the ticket
    pub reference: String,

    /// Route the seats are reserved on
    pub route_id: u64,

    /// Account that made the booking, if logged in
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Reserved seats, in passenger order
    pub seats: Vec<SeatId>,

    /// One passenger per seat; the first is the lead passenger
    #[serde(default)]
    pub passengers: Vec<Passenger>,

    /// Contact for the whole booking
    pub contact: LeadContact,

    /// How the fare is paid
    pub payment_method: PaymentMethod,

    /// Last four card digits for online payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,

    /// Total fare in whole naira
    pub amount: u64,

    /// Current status
    #[serde(default)]
    pub status: BookingStatus,

    /// Timestamp when the booking was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the booking was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Booking {
    /// Builds the booking reference for a database id, e.g. `BKA-000042`.
    pub fn reference_for(id: u64) -> String {
        format!("BKA-{id:06}")
    }
}
