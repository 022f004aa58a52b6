//! Admin form for registering a bus.

use serde::{Deserialize, Serialize};

use super::{FieldError, FieldSpec, Rule, ValidationErrors};
use crate::{models::BusType, params::CreateBus};

const BUS_TYPES: &[&str] = &["standard", "executive", "luxury"];
/// Largest seat count a bus may have.
pub const MAX_CAPACITY: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusForm {
    pub name: String,
    pub plate_number: String,
    pub bus_type: String,
    pub capacity: String,
    /// Comma-separated
    pub amenities: String,
}

#[derive(Debug, Clone)]
pub struct BusSchema {
    name: FieldSpec,
    plate_number: FieldSpec,
    bus_type: FieldSpec,
    capacity: FieldSpec,
}

impl Default for BusSchema {
    fn default() -> Self {
        Self {
            name: FieldSpec::required("name").rule(Rule::MinLength(2)),
            plate_number: FieldSpec::required("plateNumber")
                .rule(Rule::MinLength(5))
                .rule(Rule::MaxLength(12)),
            bus_type: FieldSpec::optional("busType").rule(Rule::OneOf(BUS_TYPES)),
            capacity: FieldSpec::required("capacity").rule(Rule::Digits(1)),
        }
    }
}

impl BusSchema {
    pub fn validate(&self, form: &BusForm) -> Result<CreateBus, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.name.check_into(&form.name, &mut errors);
        self.plate_number.check_into(&form.plate_number, &mut errors);
        self.bus_type.check_into(&form.bus_type, &mut errors);
        self.capacity.check_into(&form.capacity, &mut errors);

        let capacity = form.capacity.trim().parse::<u32>().ok();
        if let Some(capacity) = capacity {
            if capacity == 0 || capacity > MAX_CAPACITY {
                errors.push(FieldError::new(
                    "capacity",
                    format!("Capacity must be between 1 and {MAX_CAPACITY}"),
                ));
            }
        }

        let bus_type = form.bus_type.trim().parse::<BusType>().unwrap_or_default();
        let amenities = form
            .amenities
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();

        match capacity {
            Some(capacity) if errors.is_empty() => Ok(CreateBus {
                name: form.name.trim().to_string(),
                plate_number: form.plate_number.trim().to_uppercase(),
                bus_type,
                capacity,
                amenities,
            }),
            _ => Err(errors),
        }
    }
}
