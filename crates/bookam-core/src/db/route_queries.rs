//! Route CRUD operations and search.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::utils::{datetime_text, get_datetime, get_id, get_timestamp};
use crate::{
    error::{BookingError, DatabaseResultExt, Result},
    models::{Route, RouteFilter},
    params::{CreateRoute, UpdateRoute},
};

const ROUTE_COLUMNS: &str = "id, bus_id, from_city, to_city, departure_time, arrival_time, price, created_at, updated_at";
const INSERT_ROUTE_SQL: &str = "INSERT INTO routes (bus_id, from_city, to_city, departure_time, arrival_time, price, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";
const UPDATE_ROUTE_SQL: &str = "UPDATE routes SET bus_id = ?1, from_city = ?2, to_city = ?3, departure_time = ?4, arrival_time = ?5, price = ?6, updated_at = ?7 WHERE id = ?8";
const DELETE_ROUTE_SQL: &str = "DELETE FROM routes WHERE id = ?1";
const ROUTE_HAS_BOOKINGS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM bookings WHERE route_id = ?1 AND status != 'cancelled')";
const BUS_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM buses WHERE id = ?1)";

fn route_from_row(row: &Row<'_>) -> rusqlite::Result<Route> {
    Ok(Route {
        id: get_id(row, 0)?,
        bus_id: get_id(row, 1)?,
        from_city: row.get(2)?,
        to_city: row.get(3)?,
        departure_time: get_datetime(row, 4)?,
        arrival_time: get_datetime(row, 5)?,
        price: row.get::<_, i64>(6)? as u64,
        created_at: get_timestamp(row, 7)?,
        updated_at: get_timestamp(row, 8)?,
    })
}

fn check_schedule(route: &Route) -> Result<()> {
    if route.arrival_time <= route.departure_time {
        return Err(BookingError::invalid_input("arrivalTime")
            .with_reason("Arrival must be after departure"));
    }
    if route.from_city.trim().eq_ignore_ascii_case(route.to_city.trim()) {
        return Err(BookingError::invalid_input("toCity")
            .with_reason("Destination must differ from origin"));
    }
    if route.price == 0 {
        return Err(BookingError::invalid_input("price").with_reason("Price must be greater than zero"));
    }
    Ok(())
}

impl super::Database {
    fn ensure_bus_exists(&self, bus_id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(BUS_EXISTS_SQL, params![bus_id as i64], |row| row.get(0))
            .db_context("Failed to check bus existence")?;
        if exists {
            Ok(())
        } else {
            Err(BookingError::BusNotFound { id: bus_id })
        }
    }

    pub fn create_route(&mut self, params: &CreateRoute) -> Result<Route> {
        let now = Timestamp::now();
        let mut route = Route {
            id: 0,
            bus_id: params.bus_id,
            from_city: params.from_city.trim().to_string(),
            to_city: params.to_city.trim().to_string(),
            departure_time: params.departure_time,
            arrival_time: params.arrival_time,
            price: params.price,
            created_at: now,
            updated_at: now,
        };
        check_schedule(&route)?;
        self.ensure_bus_exists(route.bus_id)?;

        self.connection
            .execute(
                INSERT_ROUTE_SQL,
                params![
                    route.bus_id as i64,
                    route.from_city,
                    route.to_city,
                    datetime_text(route.departure_time),
                    datetime_text(route.arrival_time),
                    route.price as i64,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert route")?;
        route.id = self.connection.last_insert_rowid() as u64;
        Ok(route)
    }

    pub fn get_route(&self, id: u64) -> Result<Option<Route>> {
        self.connection
            .query_row(
                &format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = ?1"),
                params![id as i64],
                route_from_row,
            )
            .optional()
            .db_context("Failed to query route")
    }

    /// Routes matching `filter`, earliest departure first.
    pub fn list_routes(&self, filter: Option<&RouteFilter>) -> Result<Vec<Route>> {
        let mut query = format!("SELECT {ROUTE_COLUMNS} FROM routes");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(from) = &f.from_city {
                conditions.push("from_city = ? COLLATE NOCASE");
                params_vec.push(Box::new(from.trim().to_string()));
            }
            if let Some(to) = &f.to_city {
                conditions.push("to_city = ? COLLATE NOCASE");
                params_vec.push(Box::new(to.trim().to_string()));
            }
            if let Some(date) = f.date {
                conditions.push("substr(departure_time, 1, 10) = ?");
                params_vec.push(Box::new(date.to_string()));
            }
            if let Some(bus_id) = f.bus_id {
                conditions.push("bus_id = ?");
                params_vec.push(Box::new(bus_id as i64));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY departure_time, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();
        let routes = stmt
            .query_map(&params_refs[..], route_from_row)
            .db_context("Failed to query routes")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read route row")?;
        Ok(routes)
    }

    pub fn update_route(&mut self, params: &UpdateRoute) -> Result<Route> {
        let mut route = self
            .get_route(params.id)?
            .ok_or(BookingError::RouteNotFound { id: params.id })?;

        if let Some(bus_id) = params.bus_id {
            self.ensure_bus_exists(bus_id)?;
            route.bus_id = bus_id;
        }
        if let Some(from) = &params.from_city {
            route.from_city = from.trim().to_string();
        }
        if let Some(to) = &params.to_city {
            route.to_city = to.trim().to_string();
        }
        if let Some(departure) = params.departure_time {
            route.departure_time = departure;
        }
        if let Some(arrival) = params.arrival_time {
            route.arrival_time = arrival;
        }
        if let Some(price) = params.price {
            route.price = price;
        }
        check_schedule(&route)?;
        route.updated_at = Timestamp::now();

        self.connection
            .execute(
                UPDATE_ROUTE_SQL,
                params![
                    route.bus_id as i64,
                    route.from_city,
                    route.to_city,
                    datetime_text(route.departure_time),
                    datetime_text(route.arrival_time),
                    route.price as i64,
                    route.updated_at.to_string(),
                    route.id as i64
                ],
            )
            .db_context("Failed to update route")?;
        Ok(route)
    }

    /// Deletes a route without active bookings.
    pub fn delete_route(&mut self, id: u64) -> Result<()> {
        let booked: bool = self
            .connection
            .query_row(ROUTE_HAS_BOOKINGS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check route bookings")?;
        if booked {
            return Err(BookingError::invalid_input("id")
                .with_reason(format!("Route {id} has active bookings")));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute(
            "DELETE FROM booking_seats WHERE route_id = ?1",
            params![id as i64],
        )
        .db_context("Failed to release route seats")?;
        tx.execute(
            "DELETE FROM bookings WHERE route_id = ?1",
            params![id as i64],
        )
        .db_context("Failed to delete cancelled bookings")?;
        let deleted = tx
            .execute(DELETE_ROUTE_SQL, params![id as i64])
            .db_context("Failed to delete route")?;
        if deleted == 0 {
            return Err(BookingError::RouteNotFound { id });
        }
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        db::Database,
        models::{BusType, RouteFilter},
        params::{CreateBus, CreateRoute, UpdateRoute},
    };

    fn setup() -> (Database, u64) {
        let mut db = Database::in_memory().unwrap();
        let bus = db
            .create_bus(&CreateBus {
                name: "Chisco 7".into(),
                plate_number: "CHS-777-EN".into(),
                bus_type: BusType::Standard,
                capacity: 20,
                amenities: vec![],
            })
            .unwrap();
        (db, bus.id)
    }

    fn trip(bus_id: u64, from: &str, to: &str, departure: &str, arrival: &str) -> CreateRoute {
        CreateRoute {
            bus_id,
            from_city: from.into(),
            to_city: to.into(),
            departure_time: departure.parse().unwrap(),
            arrival_time: arrival.parse().unwrap(),
            price: 12000,
        }
    }

    #[test]
    fn test_route_search() {
        let (mut db, bus_id) = setup();
        db.create_route(&trip(bus_id, "Lagos", "Enugu", "2025-03-02T06:00", "2025-03-02T16:00"))
            .unwrap();
        db.create_route(&trip(bus_id, "Lagos", "Abuja", "2025-03-01T07:00", "2025-03-01T17:00"))
            .unwrap();
        db.create_route(&trip(bus_id, "Lagos", "Enugu", "2025-03-01T06:00", "2025-03-01T16:00"))
            .unwrap();

        let all = db.list_routes(None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].departure_time.hour(), 6);

        let filter = RouteFilter {
            from_city: Some("lagos".into()),
            to_city: Some("ENUGU".into()),
            date: Some("2025-03-01".parse().unwrap()),
            bus_id: None,
        };
        let found = db.list_routes(Some(&filter)).unwrap();
        assert_eq!(found.len(), 1);
        assert!(filter.matches(&found[0]));
    }

    #[test]
    fn test_route_requires_bus_and_sane_schedule() {
        let (mut db, bus_id) = setup();
        assert!(db
            .create_route(&trip(bus_id + 1, "Lagos", "Abuja", "2025-03-01T07:00", "2025-03-01T17:00"))
            .is_err());
        assert!(db
            .create_route(&trip(bus_id, "Lagos", "Abuja", "2025-03-01T17:00", "2025-03-01T07:00"))
            .is_err());
    }

    #[test]
    fn test_update_and_delete_route() {
        let (mut db, bus_id) = setup();
        let route = db
            .create_route(&trip(bus_id, "Lagos", "Ibadan", "2025-03-01T07:00", "2025-03-01T09:30"))
            .unwrap();
        let updated = db
            .update_route(&UpdateRoute {
                id: route.id,
                price: Some(8000),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.price, 8000);
        assert_eq!(db.get_route(route.id).unwrap().unwrap().price, 8000);

        assert!(db.delete_bus(bus_id).is_err());
        db.delete_route(route.id).unwrap();
        assert!(db.get_route(route.id).unwrap().is_none());
    }
}
