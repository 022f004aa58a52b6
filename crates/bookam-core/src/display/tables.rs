//! Admin dashboard tables.
//!
//! A [`Table`] binds a fixed set of [`Column`]s to a fetched collection and
//! renders it as a markdown table, or as a single empty-state line when there
//! is nothing to show.

use std::fmt;

use super::datetime::{LocalDateTime, TravelTime};
use crate::{
    currency::Naira,
    models::{Booking, Bus, Route, User},
};

/// A column header and how to render one cell.
pub struct Column<T> {
    pub header: &'static str,
    pub cell: fn(&T) -> String,
}

impl<T> Column<T> {
    pub const fn new(header: &'static str, cell: fn(&T) -> String) -> Self {
        Self { header, cell }
    }
}

/// Rows of `T` rendered through `columns`.
///
/// ```rust
/// use bookam_core::display::{Column, Table};
///
/// let columns = [Column::new("City", |c: &&str| c.to_string())];
/// let rows = ["Lagos", "Kano"];
/// let table = Table::new(&columns, &rows).to_string();
/// assert!(table.starts_with("| City |\n|---|\n| Lagos |"));
///
/// let empty: [&str; 0] = [];
/// assert_eq!(Table::new(&columns, &empty).to_string(), "No records found.\n");
/// ```
pub struct Table<'a, T> {
    columns: &'a [Column<T>],
    rows: &'a [T],
    empty: &'a str,
}

impl<'a, T> Table<'a, T> {
    pub fn new(columns: &'a [Column<T>], rows: &'a [T]) -> Self {
        Self {
            columns,
            rows,
            empty: "No records found.",
        }
    }

    /// Replaces the line shown when there are no rows.
    pub fn with_empty_message(mut self, message: &'a str) -> Self {
        self.empty = message;
        self
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

impl<T> fmt::Display for Table<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "{}", self.empty);
        }

        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        writeln!(f, "| {} |", headers.join(" | "))?;
        writeln!(f, "|{}|", vec!["---"; self.columns.len()].join("|"))?;
        for row in self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| escape(&(c.cell)(row)))
                .collect();
            writeln!(f, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

pub fn bus_columns() -> Vec<Column<Bus>> {
    vec![
        Column::new("ID", |b: &Bus| b.id.to_string()),
        Column::new("Name", |b: &Bus| b.name.clone()),
        Column::new("Plate", |b: &Bus| b.plate_number.clone()),
        Column::new("Type", |b: &Bus| b.bus_type.to_string()),
        Column::new("Seats", |b: &Bus| b.capacity.to_string()),
        Column::new("Amenities", |b: &Bus| b.amenities.join(", ")),
    ]
}

pub fn route_columns() -> Vec<Column<Route>> {
    vec![
        Column::new("ID", |r: &Route| r.id.to_string()),
        Column::new("From", |r: &Route| r.from_city.clone()),
        Column::new("To", |r: &Route| r.to_city.clone()),
        Column::new("Departure", |r: &Route| TravelTime(&r.departure_time).to_string()),
        Column::new("Arrival", |r: &Route| TravelTime(&r.arrival_time).to_string()),
        Column::new("Fare", |r: &Route| Naira(r.price).to_string()),
        Column::new("Bus", |r: &Route| r.bus_id.to_string()),
    ]
}

pub fn booking_columns() -> Vec<Column<Booking>> {
    vec![
        Column::new("Reference", |b: &Booking| b.reference.clone()),
        Column::new("Route", |b: &Booking| b.route_id.to_string()),
        Column::new("Seats", |b: &Booking| {
            b.seats
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }),
        Column::new("Contact", |b: &Booking| b.contact.name.clone()),
        Column::new("Amount", |b: &Booking| Naira(b.amount).to_string()),
        Column::new("Status", |b: &Booking| b.status.with_icon().to_string()),
    ]
}

pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("ID", |u: &User| u.id.to_string()),
        Column::new("Name", |u: &User| u.full_name()),
        Column::new("Email", |u: &User| u.email.clone()),
        Column::new("Role", |u: &User| u.role.to_string()),
        Column::new("Confirmed", |u: &User| (if u.confirmed { "yes" } else { "no" }).to_string()),
        Column::new("Joined", |u: &User| LocalDateTime(&u.created_at).to_string()),
    ]
}
