//! Confirmation page: review and create the booking.

use log::info;

use crate::{
    api::BookingApi,
    currency::Naira,
    draft::BookingDraft,
    error::{BookingError, Result},
    models::{Booking, JourneySelection, LeadContact, Passenger, PaymentMethod, SeatSelection},
    params::CreateBooking,
    wizard::BookingStep,
};

/// Final review of a complete draft.
#[derive(Debug, Clone)]
pub struct ConfirmationPage {
    journey: JourneySelection,
    seats: SeatSelection,
    amount: u64,
    contact: LeadContact,
    passengers: Vec<Passenger>,
    method: PaymentMethod,
    card: Option<String>,
}

impl ConfirmationPage {
    pub fn from_draft(draft: BookingDraft) -> Result<Self> {
        draft.expect_step(BookingStep::Confirmation)?;
        let journey = draft.require_journey()?.clone();
        let seats = draft.require_seats()?.clone();
        let amount = draft.require_price()?;
        let contact = draft.require_contact()?;
        let method = draft.require_method()?;
        if method == PaymentMethod::Online && draft.card.is_none() {
            return Err(BookingError::draft("'card' is missing for an online payment"));
        }
        Ok(Self {
            journey,
            seats,
            amount,
            contact,
            passengers: draft.passengers,
            method,
            card: draft.card,
        })
    }

    pub fn from_query(input: &str) -> Result<Self> {
        Self::from_draft(BookingDraft::from_query(input)?)
    }

    pub fn journey(&self) -> &JourneySelection {
        &self.journey
    }

    pub fn seats(&self) -> &SeatSelection {
        &self.seats
    }

    pub fn fare(&self) -> Naira {
        Naira(self.amount)
    }

    pub fn contact(&self) -> &LeadContact {
        &self.contact
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Last four card digits, for online payments.
    pub fn card(&self) -> Option<&str> {
        self.card.as_deref()
    }

    pub fn booking_request(&self) -> CreateBooking {
        CreateBooking {
            route_id: self.journey.route_id,
            seats: self.seats.iter().cloned().collect(),
            passengers: self.passengers.clone(),
            contact: self.contact.clone(),
            payment_method: self.method,
            amount: self.amount,
            card_last_four: self.card.clone(),
        }
    }

    /// Creates the booking once the journey still matches the route on file.
    pub async fn confirm<A: BookingApi>(&self, api: &A) -> Result<Booking> {
        let route = api.get_route(self.journey.route_id).await?;
        if JourneySelection::from(&route) != self.journey {
            return Err(BookingError::draft(format!(
                "'journey' does not match route {}; pick your seats again",
                route.id
            )));
        }
        let booking = api.create_booking(&self.booking_request()).await?;
        info!(
            "Booked {} on route {} as {}",
            booking.seats.len(),
            booking.route_id,
            booking.reference
        );
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeatId;

    fn draft() -> BookingDraft {
        let mut draft = BookingDraft::new(BookingStep::Confirmation);
        draft.journey = Some(JourneySelection {
            route_id: 4,
            bus_id: 1,
            from_city: "Lagos".into(),
            to_city: "Ibadan".into(),
            departure_time: "2025-03-01T07:00".parse().unwrap(),
            arrival_time: "2025-03-01T09:30".parse().unwrap(),
            price: 6500,
        });
        draft.seats = SeatSelection::from_csv("2B").unwrap();
        draft.price = Some(6500);
        draft.name = Some("Ada Obi".into());
        draft.email = Some("ada@example.com".into());
        draft.phone = Some("08031234567".into());
        draft.method = Some(PaymentMethod::Cash);
        draft
    }

    #[test]
    fn test_booking_request() {
        let page = ConfirmationPage::from_draft(draft()).unwrap();
        let request = page.booking_request();
        assert_eq!(request.route_id, 4);
        assert_eq!(request.seats, vec![SeatId::new(2, 'B')]);
        assert_eq!(request.amount, 6500);
        assert_eq!(request.payment_method, PaymentMethod::Cash);
        assert_eq!(page.fare().to_string(), "₦6,500");
    }

    #[test]
    fn test_incomplete_drafts_refused() {
        let mut online = draft();
        online.method = Some(PaymentMethod::Online);
        assert!(ConfirmationPage::from_draft(online.clone()).is_err());
        online.card = Some("1111".into());
        assert!(ConfirmationPage::from_draft(online).is_ok());

        let mut no_method = draft();
        no_method.method = None;
        let err = ConfirmationPage::from_draft(no_method).unwrap_err();
        assert!(err.to_string().contains("'method' is missing"));

        assert!(ConfirmationPage::from_draft(draft().addressed_to(BookingStep::Payment)).is_err());
    }
}
