//! Booking operations and seat holds.
//!
//! Seats live in `booking_seats`, one row per reserved seat. A partial
//! unique index allows a single held (`released = 0`) row per route and
//! seat, so two bookings can never hold the same seat even if the explicit
//! availability check below races with another writer.

use jiff::Timestamp;
use rusqlite::{params, ErrorCode, OptionalExtension, Row, Transaction};

use super::utils::{get_enum, get_id, get_json, get_timestamp};
use crate::{
    currency::Naira,
    error::{BookingError, DatabaseResultExt, Result},
    models::{Booking, BookingStatus, LeadContact, PaymentMethod, SeatId},
    params::CreateBooking,
};

const BOOKING_COLUMNS: &str = "id, route_id, user_id, passengers, contact_name, contact_email, contact_phone, payment_method, card_last_four, amount, status, created_at, updated_at";
const INSERT_BOOKING_SQL: &str = "INSERT INTO bookings (route_id, user_id, passengers, contact_name, contact_email, contact_phone, payment_method, card_last_four, amount, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)";
const INSERT_SEAT_SQL: &str =
    "INSERT INTO booking_seats (booking_id, route_id, seat, position) VALUES (?1, ?2, ?3, ?4)";
const SELECT_SEATS_SQL: &str =
    "SELECT seat FROM booking_seats WHERE booking_id = ?1 ORDER BY position";
const SEAT_HELD_SQL: &str = "SELECT EXISTS(SELECT 1 FROM booking_seats WHERE route_id = ?1 AND seat = ?2 AND released = 0)";
const TAKEN_SEATS_SQL: &str =
    "SELECT seat FROM booking_seats WHERE route_id = ?1 AND released = 0 ORDER BY seat";
const ROUTE_FARE_SQL: &str =
    "SELECT b.capacity, r.price FROM routes r JOIN buses b ON b.id = r.bus_id WHERE r.id = ?1";
const UPDATE_STATUS_SQL: &str = "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3";
const SET_SEATS_RELEASED_SQL: &str = "UPDATE booking_seats SET released = ?1 WHERE booking_id = ?2";
const DELETE_BOOKING_SQL: &str = "DELETE FROM bookings WHERE id = ?1";

/// Booking row without its seats.
fn booking_from_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let id = get_id(row, 0)?;
    Ok(Booking {
        id,
        reference: Booking::reference_for(id),
        route_id: get_id(row, 1)?,
        user_id: row.get::<_, Option<i64>>(2)?.map(|v| v as u64),
        seats: Vec::new(),
        passengers: get_json(row, 3)?,
        contact: LeadContact {
            name: row.get(4)?,
            email: row.get(5)?,
            phone: row.get(6)?,
        },
        payment_method: get_enum(row, 7)?,
        card_last_four: row.get(8)?,
        amount: row.get::<_, i64>(9)? as u64,
        status: get_enum(row, 10)?,
        created_at: get_timestamp(row, 11)?,
        updated_at: get_timestamp(row, 12)?,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Initial status: card payments are settled at checkout, cash is collected
/// at the terminal.
fn initial_status(method: PaymentMethod) -> BookingStatus {
    match method {
        PaymentMethod::Online => BookingStatus::Confirmed,
        PaymentMethod::Cash => BookingStatus::Pending,
    }
}

fn seat_held(tx: &Transaction<'_>, route_id: u64, seat: &SeatId) -> Result<bool> {
    tx.query_row(
        SEAT_HELD_SQL,
        params![route_id as i64, seat.as_str()],
        |row| row.get(0),
    )
    .db_context("Failed to check seat availability")
}

impl super::Database {
    fn load_seats(&self, booking: &mut Booking) -> Result<()> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SEATS_SQL)
            .db_context("Failed to prepare query")?;
        let labels = stmt
            .query_map(params![booking.id as i64], |row| row.get::<_, String>(0))
            .db_context("Failed to query booking seats")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read seat row")?;
        booking.seats = labels
            .iter()
            .map(|label| label.parse())
            .collect::<Result<Vec<SeatId>>>()?;
        Ok(())
    }

    /// Reserves the seats and records the booking in one transaction.
    pub fn create_booking(
        &mut self,
        params: &CreateBooking,
        user_id: Option<u64>,
    ) -> Result<Booking> {
        if params.seats.is_empty() {
            return Err(BookingError::invalid_input("seats").with_reason("Select at least one seat"));
        }
        if !params.passengers.is_empty() && params.passengers.len() != params.seats.len() {
            return Err(BookingError::invalid_input("passengers").with_reason(format!(
                "{} passenger(s) for {} seat(s)",
                params.passengers.len(),
                params.seats.len()
            )));
        }

        let now = Timestamp::now();
        let status = initial_status(params.payment_method);
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (capacity, price): (u32, i64) = tx
            .query_row(ROUTE_FARE_SQL, params![params.route_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query route")?
            .ok_or(BookingError::RouteNotFound {
                id: params.route_id,
            })?;
        let fare = Naira::fare(price as u64, params.seats.len());
        if params.amount != fare.0 {
            return Err(BookingError::invalid_input("amount").with_reason(format!(
                "{} does not match the fare of {fare}",
                Naira(params.amount)
            )));
        }
        let seat_map = crate::models::seat_map(capacity);

        for seat in &params.seats {
            if !seat_map.contains(seat) {
                return Err(BookingError::invalid_input("seats")
                    .with_reason(format!("Seat {seat} does not exist on this bus")));
            }
            if seat_held(&tx, params.route_id, seat)? {
                return Err(BookingError::SeatUnavailable {
                    seat: seat.to_string(),
                    route_id: params.route_id,
                });
            }
        }

        tx.execute(
            INSERT_BOOKING_SQL,
            params![
                params.route_id as i64,
                user_id.map(|id| id as i64),
                serde_json::to_string(&params.passengers)?,
                params.contact.name,
                params.contact.email,
                params.contact.phone,
                params.payment_method.as_str(),
                params.card_last_four,
                params.amount as i64,
                status.as_str(),
                now.to_string()
            ],
        )
        .db_context("Failed to insert booking")?;
        let id = tx.last_insert_rowid() as u64;

        for (position, seat) in params.seats.iter().enumerate() {
            tx.execute(
                INSERT_SEAT_SQL,
                params![id as i64, params.route_id as i64, seat.as_str(), position as i64],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    BookingError::SeatUnavailable {
                        seat: seat.to_string(),
                        route_id: params.route_id,
                    }
                } else {
                    BookingError::database("Failed to reserve seat").with_source(e)
                }
            })?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Booking {
            id,
            reference: Booking::reference_for(id),
            route_id: params.route_id,
            user_id,
            seats: params.seats.clone(),
            passengers: params.passengers.clone(),
            contact: params.contact.clone(),
            payment_method: params.payment_method,
            card_last_four: params.card_last_four.clone(),
            amount: params.amount,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_booking(&self, id: u64) -> Result<Option<Booking>> {
        let booking = self
            .connection
            .query_row(
                &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
                params![id as i64],
                booking_from_row,
            )
            .optional()
            .db_context("Failed to query booking")?;

        match booking {
            Some(mut booking) => {
                self.load_seats(&mut booking)?;
                Ok(Some(booking))
            }
            None => Ok(None),
        }
    }

    /// All bookings, newest first; only `user_id`'s when given.
    pub fn list_bookings(&self, user_id: Option<u64>) -> Result<Vec<Booking>> {
        let mut query = format!("SELECT {BOOKING_COLUMNS} FROM bookings");
        if user_id.is_some() {
            query.push_str(" WHERE user_id = ?1");
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let rows = match user_id {
            Some(id) => stmt.query_map(params![id as i64], booking_from_row),
            None => stmt.query_map([], booking_from_row),
        }
        .db_context("Failed to query bookings")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read booking row")?;

        let mut bookings = rows;
        for booking in &mut bookings {
            self.load_seats(booking)?;
        }
        Ok(bookings)
    }

    /// Seats held on a route by non-cancelled bookings.
    pub fn taken_seats(&self, route_id: u64) -> Result<Vec<SeatId>> {
        let mut stmt = self
            .connection
            .prepare(TAKEN_SEATS_SQL)
            .db_context("Failed to prepare query")?;
        let labels = stmt
            .query_map(params![route_id as i64], |row| row.get::<_, String>(0))
            .db_context("Failed to query taken seats")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read seat row")?;
        labels.iter().map(|label| label.parse()).collect()
    }

    /// Changes the status. Cancelling releases the seats; reinstating a
    /// cancelled booking holds them again if nobody took them meanwhile.
    pub fn update_booking_status(&mut self, id: u64, status: BookingStatus) -> Result<Booking> {
        let mut booking = self
            .get_booking(id)?
            .ok_or(BookingError::BookingNotFound { id })?;
        let now = Timestamp::now();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if booking.status.holds_seats() != status.holds_seats() {
            tx.execute(
                SET_SEATS_RELEASED_SQL,
                params![!status.holds_seats(), id as i64],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    BookingError::SeatUnavailable {
                        seat: booking
                            .seats
                            .iter()
                            .map(SeatId::as_str)
                            .collect::<Vec<_>>()
                            .join(", "),
                        route_id: booking.route_id,
                    }
                } else {
                    BookingError::database("Failed to update seat holds").with_source(e)
                }
            })?;
        }

        tx.execute(
            UPDATE_STATUS_SQL,
            params![status.as_str(), now.to_string(), id as i64],
        )
        .db_context("Failed to update booking")?;
        tx.commit().db_context("Failed to commit transaction")?;

        booking.status = status;
        booking.updated_at = now;
        Ok(booking)
    }

    pub fn delete_booking(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_BOOKING_SQL, params![id as i64])
            .db_context("Failed to delete booking")?;
        if deleted == 0 {
            return Err(BookingError::BookingNotFound { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::Database,
        models::{BusType, SeatSelection},
        params::{CreateBus, CreateRoute},
    };

    fn setup() -> (Database, u64) {
        let mut db = Database::in_memory().unwrap();
        let bus = db
            .create_bus(&CreateBus {
                name: "Peace Mass 3".into(),
                plate_number: "PMT-333-EN".into(),
                bus_type: BusType::Standard,
                capacity: 8,
                amenities: vec![],
            })
            .unwrap();
        let route = db
            .create_route(&CreateRoute {
                bus_id: bus.id,
                from_city: "Enugu".into(),
                to_city: "Port Harcourt".into(),
                departure_time: "2025-04-01T08:00".parse().unwrap(),
                arrival_time: "2025-04-01T12:00".parse().unwrap(),
                price: 9000,
            })
            .unwrap();
        (db, route.id)
    }

    fn request(route_id: u64, seats: &str, method: PaymentMethod) -> CreateBooking {
        let seats = SeatSelection::from_csv(seats).unwrap();
        CreateBooking {
            route_id,
            amount: 9000 * seats.len() as u64,
            seats: seats.as_slice().to_vec(),
            passengers: vec![],
            contact: LeadContact {
                name: "Ada Obi".into(),
                email: "ada@example.com".into(),
                phone: "08031234567".into(),
            },
            payment_method: method,
            card_last_four: (method == PaymentMethod::Online).then(|| "1111".to_string()),
        }
    }

    #[test]
    fn test_create_and_read_booking() {
        let (mut db, route_id) = setup();
        let booking = db
            .create_booking(&request(route_id, "1A,1B", PaymentMethod::Online), None)
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.reference, format!("BKA-{:06}", booking.id));

        let loaded = db.get_booking(booking.id).unwrap().unwrap();
        assert_eq!(loaded, booking);
        assert_eq!(db.taken_seats(route_id).unwrap().len(), 2);
    }

    #[test]
    fn test_seat_cannot_be_held_twice() {
        let (mut db, route_id) = setup();
        db.create_booking(&request(route_id, "1A,1B", PaymentMethod::Cash), None)
            .unwrap();
        let err = db
            .create_booking(&request(route_id, "1C,1B", PaymentMethod::Cash), None)
            .unwrap_err();
        assert!(matches!(err, BookingError::SeatUnavailable { ref seat, .. } if seat == "1B"));
        assert_eq!(db.list_bookings(None).unwrap().len(), 1);
    }

    #[test]
    fn test_cancel_releases_and_reinstating_rechecks() {
        let (mut db, route_id) = setup();
        let first = db
            .create_booking(&request(route_id, "2A", PaymentMethod::Cash), None)
            .unwrap();
        db.update_booking_status(first.id, BookingStatus::Cancelled)
            .unwrap();
        assert!(db.taken_seats(route_id).unwrap().is_empty());

        db.create_booking(&request(route_id, "2A", PaymentMethod::Cash), None)
            .unwrap();
        let err = db
            .update_booking_status(first.id, BookingStatus::Confirmed)
            .unwrap_err();
        assert!(matches!(err, BookingError::SeatUnavailable { .. }));
        assert_eq!(
            db.get_booking(first.id).unwrap().unwrap().status,
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn test_amount_must_match_route_fare() {
        let (mut db, route_id) = setup();
        let mut underpaid = request(route_id, "1A,1B", PaymentMethod::Cash);
        underpaid.amount = 9000;
        let err = db.create_booking(&underpaid, None).unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput { ref field, .. } if field == "amount"));
        assert!(db.taken_seats(route_id).unwrap().is_empty());
    }

    #[test]
    fn test_seat_must_exist_on_bus() {
        let (mut db, route_id) = setup();
        let err = db
            .create_booking(&request(route_id, "3A", PaymentMethod::Cash), None)
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput { .. }));
    }

    #[test]
    fn test_delete_booking_frees_seats() {
        let (mut db, route_id) = setup();
        let booking = db
            .create_booking(&request(route_id, "1D", PaymentMethod::Cash), None)
            .unwrap();
        db.delete_booking(booking.id).unwrap();
        assert!(db.taken_seats(route_id).unwrap().is_empty());
        assert!(matches!(
            db.delete_booking(booking.id),
            Err(BookingError::BookingNotFound { .. })
        ));
    }
}
