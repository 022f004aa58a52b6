//! Admin form for scheduling a route.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{FieldError, FieldSpec, Rule, ValidationErrors};
use crate::params::CreateRoute;

/// Raw route input as typed into the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteForm {
    pub bus_id: String,
    pub from_city: String,
    pub to_city: String,
    /// `YYYY-MM-DDTHH:MM`
    pub departure_time: String,
    pub arrival_time: String,
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct RouteSchema {
    bus_id: FieldSpec,
    from_city: FieldSpec,
    to_city: FieldSpec,
    departure_time: FieldSpec,
    arrival_time: FieldSpec,
    price: FieldSpec,
}

impl Default for RouteSchema {
    fn default() -> Self {
        Self {
            bus_id: FieldSpec::required("busId").rule(Rule::Digits(1)),
            from_city: FieldSpec::required("fromCity").rule(Rule::MinLength(2)),
            to_city: FieldSpec::required("toCity").rule(Rule::MinLength(2)),
            departure_time: FieldSpec::required("departureTime"),
            arrival_time: FieldSpec::required("arrivalTime"),
            price: FieldSpec::required("price").rule(Rule::Digits(1)),
        }
    }
}

fn parse_time(raw: &str, field: &'static str, errors: &mut ValidationErrors) -> Option<DateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<DateTime>() {
        Ok(dt) => Some(dt),
        Err(_) => {
            errors.push(FieldError::new(field, "Use YYYY-MM-DDTHH:MM format"));
            None
        }
    }
}

impl RouteSchema {
    pub fn validate(&self, form: &RouteForm) -> Result<CreateRoute, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.bus_id.check_into(&form.bus_id, &mut errors);
        self.from_city.check_into(&form.from_city, &mut errors);
        self.to_city.check_into(&form.to_city, &mut errors);
        self.departure_time
            .check_into(&form.departure_time, &mut errors);
        self.arrival_time.check_into(&form.arrival_time, &mut errors);
        self.price.check_into(&form.price, &mut errors);

        let from_city = form.from_city.trim();
        let to_city = form.to_city.trim();
        if !from_city.is_empty() && from_city.eq_ignore_ascii_case(to_city) {
            errors.push(FieldError::new(
                "toCity",
                "Destination must differ from origin",
            ));
        }

        let departure = parse_time(&form.departure_time, "departureTime", &mut errors);
        let arrival = parse_time(&form.arrival_time, "arrivalTime", &mut errors);
        if let (Some(departure), Some(arrival)) = (departure, arrival) {
            if arrival <= departure {
                errors.push(FieldError::new(
                    "arrivalTime",
                    "Arrival must be after departure",
                ));
            }
        }

        let price = form.price.trim().parse::<u64>().ok();
        if price == Some(0) {
            errors.push(FieldError::new("price", "Price must be greater than zero"));
        }
        let bus_id = form.bus_id.trim().parse::<u64>().ok();

        match (bus_id, departure, arrival, price) {
            (Some(bus_id), Some(departure_time), Some(arrival_time), Some(price))
                if errors.is_empty() =>
            {
                Ok(CreateRoute {
                    bus_id,
                    from_city: from_city.to_string(),
                    to_city: to_city.to_string(),
                    departure_time,
                    arrival_time,
                    price,
                })
            }
            _ => {
                if errors.is_empty() {
                    errors.push(FieldError::new("price", "Enter a whole number"));
                }
                Err(errors)
            }
        }
    }
}
