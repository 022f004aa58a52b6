//! Views of the checkout pages and the final ticket.

use std::fmt;

use super::datetime::TravelTime;
use crate::{
    checkout::{SeatSelectionPage, SeatStatus},
    currency::Naira,
    draft::BookingDraft,
    models::{Booking, JourneySelection, PaymentMethod, Route},
    wizard::{Blocker, PassengerWizard},
};

fn journey_header(f: &mut fmt::Formatter<'_>, journey: &JourneySelection) -> fmt::Result {
    writeln!(f, "## {} → {}", journey.from_city, journey.to_city)?;
    writeln!(f)?;
    writeln!(
        f,
        "Departs {}, arrives {}. {} per seat.",
        TravelTime(&journey.departure_time),
        TravelTime(&journey.arrival_time),
        Naira(journey.price)
    )?;
    writeln!(f)
}

/// Seat map with selected seats in brackets and taken seats crossed out.
pub struct SeatMap<'a>(pub &'a SeatSelectionPage);

impl fmt::Display for SeatMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        journey_header(f, page.journey())?;

        writeln!(f, "```")?;
        for (i, row) in page.rows().iter().enumerate() {
            write!(f, "{:>3} ", i + 1)?;
            for (j, (seat, status)) in row.iter().enumerate() {
                if j == 2 {
                    write!(f, "   ")?;
                }
                let cell = match status {
                    SeatStatus::Available => format!(" {seat} "),
                    SeatStatus::Selected => format!("[{seat}]"),
                    SeatStatus::Taken => " xx ".to_string(),
                };
                write!(f, "{cell:<6}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "```")?;
        writeln!(f)?;
        writeln!(f, "{} seat(s) available. `[1A]` selected, `xx` taken.", page.available_count())?;
        writeln!(f)?;
        writeln!(f, "Selected: {} ({})", page.selection(), page.fare())
    }
}

/// Tab strip of the passenger wizard plus the active tab's errors.
pub struct PassengerTabs<'a>(pub &'a PassengerWizard);

impl fmt::Display for PassengerTabs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wizard = self.0;
        if wizard.blocker() == Some(Blocker::NoSeats) {
            return writeln!(f, "No seats selected. Go back and choose your seats first.");
        }

        let tabs: Vec<String> = wizard
            .state()
            .iter()
            .map(|(key, slot)| {
                let mark = if slot.is_valid { "✓" } else { "○" };
                if key.index() == wizard.active_index() {
                    format!("**{} {mark}**", key.label())
                } else {
                    format!("{} {mark}", key.label())
                }
            })
            .collect();
        writeln!(f, "{}", tabs.join(" · "))?;

        for (key, seat) in wizard.state().keys().zip(wizard.seats()) {
            if let Some(form) = wizard.form(key.index()) {
                let errors = form.errors();
                if !errors.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "{} (seat {seat}):", key.label())?;
                    for error in errors.iter() {
                        writeln!(f, "- {error}")?;
                    }
                }
            }
        }

        writeln!(f)?;
        if wizard.is_ready() {
            writeln!(f, "All passengers complete. Total {}.", Naira(wizard.fare()))
        } else {
            writeln!(
                f,
                "{} of {} passenger(s) complete. Total {}.",
                wizard.slot_count() - wizard.pending().len(),
                wizard.slot_count(),
                Naira(wizard.fare())
            )
        }
    }
}

/// What a draft carries so far.
pub struct DraftSummary<'a>(pub &'a BookingDraft);

impl fmt::Display for DraftSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = self.0;
        if let Some(journey) = &draft.journey {
            journey_header(f, journey)?;
        }
        writeln!(f, "- Step: {} of 4 ({})", draft.step.number(), draft.step)?;
        if !draft.seats.is_empty() {
            writeln!(f, "- Seats: {}", draft.seats)?;
        }
        if draft.price.is_some() {
            writeln!(f, "- Total: {}", draft.fare())?;
        }
        if let Some(contact) = draft.contact() {
            writeln!(f, "- Contact: {} <{}>, {}", contact.name, contact.email, contact.phone)?;
        }
        for (seat, passenger) in draft.seats.iter().zip(&draft.passengers) {
            writeln!(f, "- {seat}: {passenger}")?;
        }
        match (draft.method, &draft.card) {
            (Some(PaymentMethod::Online), Some(card)) => {
                writeln!(f, "- Payment: {} •••• {card}", PaymentMethod::Online.label())?
            }
            (Some(method), _) => writeln!(f, "- Payment: {}", method.label())?,
            (None, _) => {}
        }
        Ok(())
    }
}

/// Printable ticket for a booking, with the trip when known.
pub struct Ticket<'a> {
    pub booking: &'a Booking,
    pub route: Option<&'a Route>,
}

impl fmt::Display for Ticket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let booking = self.booking;
        writeln!(f, "# Ticket {}", booking.reference)?;
        writeln!(f)?;
        if let Some(route) = self.route {
            writeln!(f, "**{}**", route.label())?;
            writeln!(f)?;
            writeln!(f, "- Departs: {}", TravelTime(&route.departure_time))?;
            writeln!(f, "- Arrives: {}", TravelTime(&route.arrival_time))?;
        }
        writeln!(f, "- Status: {}", booking.status.with_icon())?;
        writeln!(f, "- Paid: {} ({})", Naira(booking.amount), booking.payment_method.label())?;
        writeln!(f)?;

        writeln!(f, "| Seat | Passenger |")?;
        writeln!(f, "|---|---|")?;
        if booking.passengers.is_empty() {
            for seat in &booking.seats {
                writeln!(f, "| {seat} | {} |", booking.contact.name)?;
            }
        } else {
            for (seat, passenger) in booking.seats.iter().zip(&booking.passengers) {
                writeln!(f, "| {seat} | {passenger} |")?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "Lead contact: {} ({}, {})",
            booking.contact.name, booking.contact.email, booking.contact.phone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{PassengerField, SeatSelection},
        wizard::BookingStep,
    };

    fn journey() -> JourneySelection {
        JourneySelection {
            route_id: 1,
            bus_id: 1,
            from_city: "Lagos".into(),
            to_city: "Abuja".into(),
            departure_time: "2025-03-01T07:00".parse().unwrap(),
            arrival_time: "2025-03-01T17:30".parse().unwrap(),
            price: 15000,
        }
    }

    #[test]
    fn test_seat_map_marks_seats() {
        let taken = vec!["1C".parse().unwrap()];
        let mut page = SeatSelectionPage::new(journey(), 8, taken);
        page.toggle(&"1A".parse().unwrap()).unwrap();
        let output = SeatMap(&page).to_string();
        assert!(output.contains("## Lagos → Abuja"));
        assert!(output.contains("[1A]"));
        assert!(output.contains("xx"));
        assert!(output.contains("Selected: 1A (₦15,000)"));
    }

    #[test]
    fn test_tabs_show_progress_and_errors() {
        let mut wizard = PassengerWizard::new(SeatSelection::from_csv("1A,1B").unwrap(), 30000);
        wizard.set_field(1, PassengerField::FirstName, "T").unwrap();
        let output = PassengerTabs(&wizard).to_string();
        assert!(output.starts_with("**Passenger 1 ○** · Passenger 2 ○"));
        assert!(output.contains("Passenger 2 (seat 1B):"));
        assert!(output.contains("0 of 2 passenger(s) complete. Total ₦30,000."));

        let blocked = PassengerWizard::new(SeatSelection::new(), 0);
        assert!(PassengerTabs(&blocked).to_string().starts_with("No seats selected"));
    }

    #[test]
    fn test_draft_summary() {
        let mut draft = BookingDraft::new(BookingStep::Confirmation);
        draft.journey = Some(journey());
        draft.seats = SeatSelection::from_csv("1A").unwrap();
        draft.price = Some(15000);
        draft.method = Some(PaymentMethod::Online);
        draft.card = Some("1111".into());
        let output = DraftSummary(&draft).to_string();
        assert!(output.contains("- Step: 4 of 4 (confirmation)"));
        assert!(output.contains("- Total: ₦15,000"));
        assert!(output.contains("•••• 1111"));
    }
}
