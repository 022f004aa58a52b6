//! Status enumerations for buses, bookings and users.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of booking statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Booking recorded, payment collected at the terminal (cash)
    #[default]
    Pending,

    /// Booking paid and confirmed
    Confirmed,

    /// Booking cancelled; its seats are free again
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {s}")),
        }
    }
}

impl BookingStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the booking still holds its seats.
    pub fn holds_seats(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use bookam_core::models::BookingStatus;
    ///
    /// assert_eq!(BookingStatus::Confirmed.with_icon(), "✓ Confirmed");
    /// assert_eq!(BookingStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "✓ Confirmed",
            BookingStatus::Pending => "○ Pending",
            BookingStatus::Cancelled => "✗ Cancelled",
        }
    }
}

/// Role attached to a user account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" | "user" => Ok(UserRole::Customer),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }
}

/// Class of service offered by a bus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    #[default]
    Standard,
    Executive,
    Luxury,
}

impl FromStr for BusType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(BusType::Standard),
            "executive" => Ok(BusType::Executive),
            "luxury" => Ok(BusType::Luxury),
            _ => Err(format!("Invalid bus type: {s}")),
        }
    }
}

impl BusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusType::Standard => "standard",
            BusType::Executive => "executive",
            BusType::Luxury => "luxury",
        }
    }
}
