//! The fixed order of booking steps.

use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One page of the checkout flow.
///
/// Steps only move forward; each step knows its successor and the path of
/// the page that renders it.
///
/// ```rust
/// use bookam_core::wizard::BookingStep;
///
/// let step = BookingStep::from_path("/booking/payment?v=1&seats=1A").unwrap();
/// assert_eq!(step, BookingStep::Payment);
/// assert_eq!(step.next(), Some(BookingStep::Confirmation));
/// assert_eq!(BookingStep::Confirmation.next(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum BookingStep {
    SeatSelection,
    PassengerDetails,
    Payment,
    Confirmation,
}

const PATH_PREFIX: &str = "/booking/";

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::SeatSelection,
        BookingStep::PassengerDetails,
        BookingStep::Payment,
        BookingStep::Confirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::SeatSelection => "seat-selection",
            BookingStep::PassengerDetails => "passenger-details",
            BookingStep::Payment => "payment",
            BookingStep::Confirmation => "confirmation",
        }
    }

    /// 1-based position shown in the progress header.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn next(&self) -> Option<BookingStep> {
        Self::ALL.get(self.number()).copied()
    }

    pub fn previous(&self) -> Option<BookingStep> {
        (*self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Path of the page rendering this step.
    pub fn path(&self) -> String {
        format!("{PATH_PREFIX}{}", self.as_str())
    }

    /// Resolves a page path (query string allowed) to its step. Only exact
    /// segment matches count.
    pub fn from_path(path: &str) -> Option<BookingStep> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path
            .trim_end_matches('/')
            .strip_prefix(PATH_PREFIX)
            .or_else(|| path.trim_end_matches('/').strip_prefix("booking/"))?;
        segment.parse().ok()
    }
}

impl FromStr for BookingStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown booking step: {s}"))
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which passenger-details variant handles the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum PassengerMode {
    /// One contact form for the whole booking
    #[default]
    Single,
    /// One tabbed form per seat
    Multi,
}

impl PassengerMode {
    /// Multi for more than one seat.
    pub fn for_seat_count(seats: usize) -> Self {
        if seats > 1 {
            PassengerMode::Multi
        } else {
            PassengerMode::Single
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerMode::Single => "single",
            PassengerMode::Multi => "multi",
        }
    }
}

impl FromStr for PassengerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(PassengerMode::Single),
            "multi" | "multiple" => Ok(PassengerMode::Multi),
            _ => Err(format!("Invalid passenger mode: {s}")),
        }
    }
}

impl fmt::Display for PassengerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(
            BookingStep::SeatSelection.next(),
            Some(BookingStep::PassengerDetails)
        );
        assert_eq!(
            BookingStep::PassengerDetails.next(),
            Some(BookingStep::Payment)
        );
        assert_eq!(BookingStep::SeatSelection.previous(), None);
        assert_eq!(
            BookingStep::Confirmation.previous(),
            Some(BookingStep::Payment)
        );
        assert_eq!(BookingStep::Payment.number(), 3);
    }

    #[test]
    fn test_paths_round_trip() {
        for step in BookingStep::ALL {
            assert_eq!(BookingStep::from_path(&step.path()), Some(step));
        }
    }

    #[test]
    fn test_from_path_requires_exact_segment() {
        assert_eq!(BookingStep::from_path("/booking/payment/"), Some(BookingStep::Payment));
        assert_eq!(BookingStep::from_path("/booking/payment-old"), None);
        assert_eq!(BookingStep::from_path("/admin/payment"), None);
        assert_eq!(BookingStep::from_path("/booking/confirmation#ticket"), Some(BookingStep::Confirmation));
    }

    #[test]
    fn test_mode_for_seat_count() {
        assert_eq!(PassengerMode::for_seat_count(0), PassengerMode::Single);
        assert_eq!(PassengerMode::for_seat_count(1), PassengerMode::Single);
        assert_eq!(PassengerMode::for_seat_count(3), PassengerMode::Multi);
        assert_eq!("MULTI".parse::<PassengerMode>().unwrap(), PassengerMode::Multi);
    }
}
