//! Date and time display helpers.

use std::fmt;

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};

/// A `Timestamp` shown in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A departure or arrival time, e.g. `Sat 1 Mar 2025, 07:00`.
///
/// Schedules are stored as civil times at the terminal, so no timezone
/// conversion happens.
///
/// ```rust
/// use bookam_core::display::TravelTime;
///
/// let time = "2025-03-01T07:00".parse().unwrap();
/// assert_eq!(TravelTime(&time).to_string(), "Sat 1 Mar 2025, 07:00");
/// ```
pub struct TravelTime<'a>(pub &'a DateTime);

impl fmt::Display for TravelTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %-d %b %Y, %H:%M"))
    }
}

/// Trip length in minutes, shown as `10h 30m`.
pub struct TripDuration(pub i64);

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0 / 60, self.0 % 60) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h {m}m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_duration() {
        assert_eq!(TripDuration(630).to_string(), "10h 30m");
        assert_eq!(TripDuration(120).to_string(), "2h");
        assert_eq!(TripDuration(45).to_string(), "45m");
    }
}
