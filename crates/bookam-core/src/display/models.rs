//! `Display` implementations for the persistent models.
//!
//! Each entity renders as a short markdown section: a heading followed by a
//! metadata list.

use std::fmt;

use super::datetime::{LocalDateTime, TravelTime, TripDuration};
use crate::{
    currency::Naira,
    models::{Booking, BookingStatus, Bus, BusType, Route, User, UserRole},
};

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.name, self.plate_number)?;
        writeln!(f)?;
        writeln!(f, "- Type: {}", self.bus_type)?;
        writeln!(f, "- Seats: {}", self.capacity)?;
        if !self.amenities.is_empty() {
            writeln!(f, "- Amenities: {}", self.amenities.join(", "))?;
        }
        writeln!(f, "- Registered: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.label())?;
        writeln!(f)?;
        writeln!(f, "- Departs: {}", TravelTime(&self.departure_time))?;
        writeln!(f, "- Arrives: {}", TravelTime(&self.arrival_time))?;
        writeln!(f, "- Duration: {}", TripDuration(self.duration_minutes()))?;
        writeln!(f, "- Fare: {} per seat", Naira(self.price))?;
        writeln!(f, "- Bus ID: {}", self.bus_id)?;
        writeln!(f)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} ({})",
            self.reference,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Route ID: {}", self.route_id)?;
        writeln!(
            f,
            "- Seats: {}",
            self.seats
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(
            f,
            "- Contact: {} <{}>, {}",
            self.contact.name, self.contact.email, self.contact.phone
        )?;
        match &self.card_last_four {
            Some(card) => writeln!(f, "- Payment: {} •••• {card}", self.payment_method.label())?,
            None => writeln!(f, "- Payment: {}", self.payment_method.label())?,
        }
        writeln!(f, "- Amount: {}", Naira(self.amount))?;
        writeln!(f, "- Booked: {}", LocalDateTime(&self.created_at))?;

        if !self.passengers.is_empty() {
            writeln!(f)?;
            for (seat, passenger) in self.seats.iter().zip(&self.passengers) {
                writeln!(f, "- {seat}: {passenger}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.full_name())?;
        writeln!(f)?;
        writeln!(f, "- Email: {}", self.email)?;
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        writeln!(f, "- Role: {}", self.role)?;
        writeln!(
            f,
            "- Account: {}",
            if self.confirmed { "confirmed" } else { "awaiting confirmation" }
        )?;
        writeln!(f)
    }
}
