//! Bus model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{seat_map, BusType, SeatId};

/// A coach operated on one or more routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    /// Unique identifier for the bus
    pub id: u64,

    /// Display name, usually operator plus fleet number
    pub name: String,

    /// Registration plate, unique per bus
    pub plate_number: String,

    /// Class of service
    #[serde(default)]
    pub bus_type: BusType,

    /// Number of passenger seats
    pub capacity: u32,

    /// On-board amenities (AC, WiFi, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,

    /// Timestamp when the bus was registered (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the bus was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Bus {
    /// All seats of this bus in row order.
    pub fn seats(&self) -> Vec<SeatId> {
        seat_map(self.capacity)
    }

    /// Whether `seat` exists on this bus.
    pub fn has_seat(&self, seat: &SeatId) -> bool {
        self.seats().contains(seat)
    }
}
