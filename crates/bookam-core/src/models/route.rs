//! Route model definition and related functionality.

use jiff::{civil::DateTime, Timestamp};
use serde::{Deserialize, Serialize};

/// A scheduled trip between two cities served by one bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Unique identifier for the route
    pub id: u64,

    /// Bus assigned to this trip
    pub bus_id: u64,

    /// Departure city
    pub from_city: String,

    /// Arrival city
    pub to_city: String,

    /// Local (West Africa Time) departure
    pub departure_time: DateTime,

    /// Local (West Africa Time) arrival
    pub arrival_time: DateTime,

    /// Fare per seat in whole naira
    pub price: u64,

    /// Timestamp when the route was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the route was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Route {
    /// Trip duration in whole minutes; zero if the schedule is inverted.
    pub fn duration_minutes(&self) -> i64 {
        self.departure_time
            .until((jiff::Unit::Minute, self.arrival_time))
            .map(|span| span.get_minutes().max(0))
            .unwrap_or(0)
    }

    /// "Lagos → Abuja"
    pub fn label(&self) -> String {
        format!("{} → {}", self.from_city, self.to_city)
    }
}

/// Filter options for searching routes.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    /// Departure city (case-insensitive exact match)
    pub from_city: Option<String>,

    /// Arrival city (case-insensitive exact match)
    pub to_city: Option<String>,

    /// Only trips departing on this calendar day
    pub date: Option<jiff::civil::Date>,

    /// Only trips run by this bus
    pub bus_id: Option<u64>,
}

impl RouteFilter {
    /// Whether a route satisfies every set criterion.
    pub fn matches(&self, route: &Route) -> bool {
        let city_matches = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .map(|w| w.trim().eq_ignore_ascii_case(actual.trim()))
                .unwrap_or(true)
        };

        city_matches(&self.from_city, &route.from_city)
            && city_matches(&self.to_city, &route.to_city)
            && self
                .date
                .map(|d| route.departure_time.date() == d)
                .unwrap_or(true)
            && self.bus_id.map(|id| route.bus_id == id).unwrap_or(true)
    }
}

impl From<&crate::params::SearchRoutes> for RouteFilter {
    fn from(params: &crate::params::SearchRoutes) -> Self {
        Self {
            from_city: params.from.clone(),
            to_city: params.to.clone(),
            date: params.date,
            bus_id: None,
        }
    }
}
