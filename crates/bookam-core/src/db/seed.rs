//! Demo fixtures for running the app offline.

use jiff::{civil::Date, ToSpan};
use log::info;

use crate::{
    error::{BookingError, Result},
    models::{BusType, UserRole},
    params::{CreateBus, CreateRoute, Register},
};

/// What [`Database::seed`](super::Database::seed) inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub buses: usize,
    pub routes: usize,
}

/// Demo administrator account.
pub const ADMIN_EMAIL: &str = "admin@bookam.ng";
/// Demo customer account.
pub const CUSTOMER_EMAIL: &str = "ada.obi@example.com";

const BUSES: &[(&str, &str, BusType, u32, &[&str])] = &[
    ("GUO Luxury 12", "LSR-412-GU", BusType::Luxury, 32, &["AC", "WiFi", "USB charging"]),
    ("ABC Executive 4", "ABC-104-LG", BusType::Executive, 16, &["AC", "Snacks"]),
    ("Peace Mass 3", "PMT-303-EN", BusType::Standard, 18, &["AC"]),
];

/// (bus index, from, to, day offset, departure hour, duration hours, price)
const ROUTES: &[(usize, &str, &str, i64, i8, i64, u64)] = &[
    (0, "Lagos", "Abuja", 1, 7, 10, 25000),
    (1, "Lagos", "Ibadan", 1, 8, 2, 6500),
    (2, "Enugu", "Port Harcourt", 1, 9, 4, 9000),
    (0, "Abuja", "Lagos", 2, 7, 10, 25000),
    (1, "Lagos", "Benin City", 2, 6, 5, 12000),
    (2, "Port Harcourt", "Enugu", 3, 14, 4, 9000),
];

fn schedule_error(err: jiff::Error) -> BookingError {
    BookingError::Configuration {
        message: format!("Cannot compute fixture schedule: {err}"),
    }
}

impl super::Database {
    /// Inserts demo users, buses and routes departing in the days after
    /// `today`. Does nothing when buses already exist.
    pub fn seed(&mut self, today: Date) -> Result<SeedSummary> {
        if !self.list_buses()?.is_empty() {
            info!("Database already has buses, skipping fixtures");
            return Ok(SeedSummary::default());
        }

        let mut summary = SeedSummary::default();
        for (email, first, last, role) in [
            (ADMIN_EMAIL, "Bookam", "Admin", UserRole::Admin),
            (CUSTOMER_EMAIL, "Ada", "Obi", UserRole::Customer),
        ] {
            if self.find_user_by_email(email)?.is_none() {
                let account = Register {
                    first_name: first.into(),
                    last_name: last.into(),
                    email: email.into(),
                    phone: Some("08030000000".into()),
                    password: String::new(),
                };
                self.insert_user(&account, role, true)?;
                summary.users += 1;
            }
        }

        let mut bus_ids = Vec::with_capacity(BUSES.len());
        for (name, plate, bus_type, capacity, amenities) in BUSES {
            let bus = self.create_bus(&CreateBus {
                name: (*name).into(),
                plate_number: (*plate).into(),
                bus_type: *bus_type,
                capacity: *capacity,
                amenities: amenities.iter().map(|a| (*a).to_string()).collect(),
            })?;
            bus_ids.push(bus.id);
        }
        summary.buses = bus_ids.len();

        for (bus, from, to, offset, hour, hours, price) in ROUTES {
            let day = today.checked_add((*offset).days()).map_err(schedule_error)?;
            let departure_time = day.at(*hour, 0, 0, 0);
            let arrival_time = departure_time
                .checked_add((*hours).hours())
                .map_err(schedule_error)?;
            self.create_route(&CreateRoute {
                bus_id: bus_ids[*bus],
                from_city: (*from).into(),
                to_city: (*to).into(),
                departure_time,
                arrival_time,
                price: *price,
            })?;
            summary.routes += 1;
        }

        info!(
            "Seeded {} users, {} buses, {} routes",
            summary.users, summary.buses, summary.routes
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_seed_once() {
        let mut db = Database::in_memory().unwrap();
        let today: Date = "2025-06-01".parse().unwrap();
        let summary = db.seed(today).unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                users: 2,
                buses: 3,
                routes: 6
            }
        );
        let admin = db.find_user_by_email(ADMIN_EMAIL).unwrap().unwrap();
        assert!(admin.is_admin());
        assert!(admin.confirmed);

        let routes = db.list_routes(None).unwrap();
        assert_eq!(routes[0].departure_time.date(), "2025-06-02".parse().unwrap());

        assert_eq!(db.seed(today).unwrap(), SeedSummary::default());
    }
}
