//! Bus CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{get_enum, get_id, get_json, get_timestamp};
use crate::{
    error::{BookingError, DatabaseResultExt, Result},
    models::{seat_map, Bus, SeatId},
    params::{CreateBus, UpdateBus},
};

const BUS_COLUMNS: &str =
    "id, name, plate_number, bus_type, capacity, amenities, created_at, updated_at";
const INSERT_BUS_SQL: &str = "INSERT INTO buses (name, plate_number, bus_type, capacity, amenities, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
const UPDATE_BUS_SQL: &str = "UPDATE buses SET name = ?1, plate_number = ?2, bus_type = ?3, capacity = ?4, amenities = ?5, updated_at = ?6 WHERE id = ?7";
const DELETE_BUS_SQL: &str = "DELETE FROM buses WHERE id = ?1";
const BUS_HAS_ROUTES_SQL: &str = "SELECT EXISTS(SELECT 1 FROM routes WHERE bus_id = ?1)";
const HELD_SEATS_SQL: &str = "SELECT DISTINCT s.seat FROM booking_seats s JOIN routes r ON r.id = s.route_id WHERE r.bus_id = ?1 AND s.released = 0";

fn bus_from_row(row: &Row<'_>) -> rusqlite::Result<Bus> {
    Ok(Bus {
        id: get_id(row, 0)?,
        name: row.get(1)?,
        plate_number: row.get(2)?,
        bus_type: get_enum(row, 3)?,
        capacity: row.get(4)?,
        amenities: get_json(row, 5)?,
        created_at: get_timestamp(row, 6)?,
        updated_at: get_timestamp(row, 7)?,
    })
}

impl super::Database {
    pub fn create_bus(&mut self, params: &CreateBus) -> Result<Bus> {
        let now = Timestamp::now();
        let amenities = serde_json::to_string(&params.amenities)?;

        self.connection
            .execute(
                INSERT_BUS_SQL,
                params![
                    params.name,
                    params.plate_number,
                    params.bus_type.as_str(),
                    params.capacity,
                    amenities,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert bus")?;

        let id = self.connection.last_insert_rowid() as u64;
        Ok(Bus {
            id,
            name: params.name.clone(),
            plate_number: params.plate_number.clone(),
            bus_type: params.bus_type,
            capacity: params.capacity,
            amenities: params.amenities.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_bus(&self, id: u64) -> Result<Option<Bus>> {
        self.connection
            .query_row(
                &format!("SELECT {BUS_COLUMNS} FROM buses WHERE id = ?1"),
                params![id as i64],
                bus_from_row,
            )
            .optional()
            .db_context("Failed to query bus")
    }

    pub fn list_buses(&self) -> Result<Vec<Bus>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {BUS_COLUMNS} FROM buses ORDER BY id"))
            .db_context("Failed to prepare query")?;
        let buses = stmt
            .query_map([], bus_from_row)
            .db_context("Failed to query buses")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read bus row")?;
        Ok(buses)
    }

    /// Applies the set fields of `params`; returns the updated bus.
    pub fn update_bus(&mut self, params: &UpdateBus) -> Result<Bus> {
        params.validate()?;
        let mut bus = self
            .get_bus(params.id)?
            .ok_or(BookingError::BusNotFound { id: params.id })?;

        if let Some(name) = &params.name {
            bus.name = name.clone();
        }
        if let Some(plate) = &params.plate_number {
            bus.plate_number = plate.clone();
        }
        if let Some(bus_type) = params.bus_type {
            bus.bus_type = bus_type;
        }
        if let Some(capacity) = params.capacity {
            let seats = seat_map(capacity);
            if let Some(seat) = self
                .held_seats(bus.id)?
                .into_iter()
                .find(|seat| !seats.contains(seat))
            {
                return Err(BookingError::invalid_input("capacity").with_reason(format!(
                    "Seat {seat} is still booked on this bus"
                )));
            }
            bus.capacity = capacity;
        }
        if let Some(amenities) = &params.amenities {
            bus.amenities = amenities.clone();
        }
        bus.updated_at = Timestamp::now();

        self.connection
            .execute(
                UPDATE_BUS_SQL,
                params![
                    bus.name,
                    bus.plate_number,
                    bus.bus_type.as_str(),
                    bus.capacity,
                    serde_json::to_string(&bus.amenities)?,
                    bus.updated_at.to_string(),
                    bus.id as i64
                ],
            )
            .db_context("Failed to update bus")?;
        Ok(bus)
    }

    /// Seats held by live bookings on any route of the bus.
    fn held_seats(&self, bus_id: u64) -> Result<Vec<SeatId>> {
        let mut stmt = self
            .connection
            .prepare(HELD_SEATS_SQL)
            .db_context("Failed to prepare query")?;
        let labels = stmt
            .query_map(params![bus_id as i64], |row| row.get::<_, String>(0))
            .db_context("Failed to query held seats")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read seat row")?;
        labels.iter().map(|label| label.parse()).collect()
    }

    /// Deletes a bus that no route refers to.
    pub fn delete_bus(&mut self, id: u64) -> Result<()> {
        let in_use: bool = self
            .connection
            .query_row(BUS_HAS_ROUTES_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check bus routes")?;
        if in_use {
            return Err(BookingError::invalid_input("id")
                .with_reason(format!("Bus {id} still has scheduled routes")));
        }

        let deleted = self
            .connection
            .execute(DELETE_BUS_SQL, params![id as i64])
            .db_context("Failed to delete bus")?;
        if deleted == 0 {
            return Err(BookingError::BusNotFound { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        db::Database,
        error::BookingError,
        models::{BookingStatus, BusType, LeadContact, PaymentMethod},
        params::{CreateBooking, CreateBus, CreateRoute, UpdateBus},
    };

    fn new_bus() -> CreateBus {
        CreateBus {
            name: "ABC Executive 4".into(),
            plate_number: "ABC-101-LG".into(),
            bus_type: BusType::Executive,
            capacity: 16,
            amenities: vec!["AC".into(), "WiFi".into()],
        }
    }

    #[test]
    fn test_bus_crud() {
        let mut db = Database::in_memory().unwrap();
        let bus = db.create_bus(&new_bus()).unwrap();
        assert_eq!(db.get_bus(bus.id).unwrap().unwrap().amenities, vec!["AC", "WiFi"]);

        let updated = db
            .update_bus(&UpdateBus {
                id: bus.id,
                capacity: Some(18),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.capacity, 18);
        assert_eq!(updated.name, "ABC Executive 4");

        db.delete_bus(bus.id).unwrap();
        assert!(db.get_bus(bus.id).unwrap().is_none());
        assert!(db.list_buses().unwrap().is_empty());
    }

    #[test]
    fn test_plate_numbers_unique() {
        let mut db = Database::in_memory().unwrap();
        db.create_bus(&new_bus()).unwrap();
        let mut duplicate = new_bus();
        duplicate.plate_number = "abc-101-lg".into();
        assert!(db.create_bus(&duplicate).is_err());
    }

    #[test]
    fn test_capacity_bounds_on_update() {
        let mut db = Database::in_memory().unwrap();
        let bus = db.create_bus(&new_bus()).unwrap();
        let resize = |capacity| UpdateBus {
            id: bus.id,
            capacity: Some(capacity),
            ..Default::default()
        };

        for capacity in [0, 101] {
            assert!(matches!(
                db.update_bus(&resize(capacity)),
                Err(BookingError::InvalidInput { ref field, .. }) if field == "capacity"
            ));
        }

        let route = db
            .create_route(&CreateRoute {
                bus_id: bus.id,
                from_city: "Lagos".into(),
                to_city: "Ibadan".into(),
                departure_time: "2025-05-01T09:00".parse().unwrap(),
                arrival_time: "2025-05-01T11:00".parse().unwrap(),
                price: 5000,
            })
            .unwrap();
        let booking = db
            .create_booking(
                &CreateBooking {
                    route_id: route.id,
                    seats: vec!["3B".parse().unwrap()],
                    passengers: vec![],
                    contact: LeadContact {
                        name: "Ada Obi".into(),
                        email: "ada@example.com".into(),
                        phone: "08031234567".into(),
                    },
                    payment_method: PaymentMethod::Cash,
                    amount: 5000,
                    card_last_four: None,
                },
                None,
            )
            .unwrap();

        // 3B is the tenth seat
        assert!(db.update_bus(&resize(9)).is_err());
        assert_eq!(db.update_bus(&resize(10)).unwrap().capacity, 10);

        db.update_booking_status(booking.id, BookingStatus::Cancelled)
            .unwrap();
        assert_eq!(db.update_bus(&resize(4)).unwrap().capacity, 4);
    }
}
