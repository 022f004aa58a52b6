//! The journey a customer picked from the search results.

use jiff::civil::DateTime;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Route;
use crate::currency::Naira;

/// Route and bus chosen on the search page. Immutable once handed to seat
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct JourneySelection {
    pub route_id: u64,
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

impl From<&Route> for JourneySelection {
    fn from(route: &Route) -> Self {
        Self {
            route_id: route.id,
            bus_id: route.bus_id,
            from_city: route.from_city.clone(),
            to_city: route.to_city.clone(),
            departure_time: route.departure_time,
            arrival_time: route.arrival_time,
            price: route.price,
        }
    }
}

impl JourneySelection {
    /// Fare for `seats` seats.
    pub fn fare_for(&self, seats: usize) -> u64 {
        Naira::fare(self.price, seats).0
    }
}
