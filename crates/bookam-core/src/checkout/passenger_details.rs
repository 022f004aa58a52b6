//! Passenger details page in its single and multi variants.

use crate::{
    currency::Naira,
    draft::BookingDraft,
    error::Result,
    models::{PassengerEntry, PassengerField},
    schema::{ContactForm, ContactSchema, ValidationErrors},
    wizard::{Blocker, BookingStep, PassengerMode, PassengerWizard, SlotState, WizardError},
};

/// Passenger details for the seats in the draft.
#[derive(Debug, Clone)]
pub enum PassengerDetailsPage {
    /// One contact form covering every seat
    Single(SinglePassengerPage),
    /// One tab per seat
    Multi(MultiPassengerPage),
}

impl PassengerDetailsPage {
    /// Opens the page for `draft`. The variant follows the draft's `mode`,
    /// falling back to the seat count.
    pub fn from_draft(draft: BookingDraft) -> Result<Self> {
        draft.expect_step(BookingStep::PassengerDetails)?;
        let mode = draft
            .mode
            .unwrap_or_else(|| PassengerMode::for_seat_count(draft.seats.len()));
        match mode {
            PassengerMode::Single => SinglePassengerPage::new(draft).map(Self::Single),
            PassengerMode::Multi => MultiPassengerPage::new(draft).map(Self::Multi),
        }
    }

    pub fn from_query(input: &str) -> Result<Self> {
        Self::from_draft(BookingDraft::from_query(input)?)
    }

    pub fn mode(&self) -> PassengerMode {
        match self {
            Self::Single(_) => PassengerMode::Single,
            Self::Multi(_) => PassengerMode::Multi,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        match self {
            Self::Single(page) => &page.draft,
            Self::Multi(page) => &page.draft,
        }
    }

    pub fn fare(&self) -> Naira {
        self.draft().fare()
    }
}

/// Contact form for the whole booking.
#[derive(Debug, Clone)]
pub struct SinglePassengerPage {
    draft: BookingDraft,
    form: ContactForm,
    schema: ContactSchema,
}

impl SinglePassengerPage {
    fn new(draft: BookingDraft) -> Result<Self> {
        draft.require_seats()?;
        draft.require_price()?;
        let form = ContactForm {
            full_name: draft.name.clone().unwrap_or_default(),
            email: draft.email.clone().unwrap_or_default(),
            phone: draft.phone.clone().unwrap_or_default(),
        };
        Ok(Self {
            draft,
            form,
            schema: ContactSchema::default(),
        })
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn errors(&self) -> ValidationErrors {
        self.schema.errors(&self.form)
    }

    pub fn can_submit(&self) -> bool {
        self.errors().is_empty()
    }

    /// Draft for the payment page.
    pub fn submit(&self) -> Result<BookingDraft> {
        let contact = self.schema.validate(&self.form)?;
        let mut draft = self.draft.clone();
        draft.set_contact(&contact);
        draft.passenger_count = Some(draft.seats.len());
        draft.passengers.clear();
        Ok(draft.addressed_to(BookingStep::Payment))
    }
}

/// Tabbed passenger entry, one slot per seat.
#[derive(Debug, Clone)]
pub struct MultiPassengerPage {
    draft: BookingDraft,
    wizard: PassengerWizard,
}

impl MultiPassengerPage {
    fn new(draft: BookingDraft) -> Result<Self> {
        // An empty seat list opens a blocked page rather than failing.
        let fare = if draft.seats.is_empty() {
            draft.price.unwrap_or_default()
        } else {
            draft.require_price()?
        };
        let wizard = PassengerWizard::new(draft.seats.clone(), fare);
        Ok(Self { draft, wizard })
    }

    pub fn wizard(&self) -> &PassengerWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut PassengerWizard {
        &mut self.wizard
    }

    pub fn blocker(&self) -> Option<Blocker> {
        self.wizard.blocker()
    }

    pub fn set_field(
        &mut self,
        index: usize,
        field: PassengerField,
        value: &str,
    ) -> std::result::Result<&SlotState, WizardError> {
        self.wizard.set_field(index, field, value)
    }

    pub fn fill(
        &mut self,
        index: usize,
        entry: PassengerEntry,
    ) -> std::result::Result<&SlotState, WizardError> {
        self.wizard.fill(index, entry)
    }

    /// Draft for the payment page; needs every slot valid.
    pub fn submit(&self) -> Result<BookingDraft> {
        let details = self.wizard.continue_to_payment()?;
        let mut draft = self.draft.clone();
        draft.set_contact(&details.contact);
        draft.passenger_count = Some(details.passengers.len());
        draft.passengers = details.passengers;
        Ok(draft.addressed_to(BookingStep::Payment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;

    const TWO_SEATS: &str = "/booking/passenger-details?v=1&step=passenger-details&seats=1A,1B&price=30000";

    fn lead() -> PassengerEntry {
        PassengerEntry {
            title: "Mrs".into(),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            phone: "08031234567".into(),
            terms_accepted: true,
            ..Default::default()
        }
    }

    fn companion() -> PassengerEntry {
        PassengerEntry {
            title: "Mr".into(),
            first_name: "Tunde".into(),
            last_name: "Bello".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_seats_open_two_tabs() {
        let page = PassengerDetailsPage::from_query(TWO_SEATS).unwrap();
        assert_eq!(page.mode(), PassengerMode::Multi);
        assert_eq!(page.fare().to_string(), "₦30,000");
        let PassengerDetailsPage::Multi(page) = page else {
            panic!("expected the multi page");
        };
        assert_eq!(page.wizard().tabs(), vec!["Passenger 1", "Passenger 2"]);
        assert!(page.blocker().is_none());
    }

    #[test]
    fn test_multi_submit_carries_passengers() {
        let PassengerDetailsPage::Multi(mut page) = PassengerDetailsPage::from_query(TWO_SEATS).unwrap() else {
            panic!("expected the multi page");
        };
        page.fill(0, lead()).unwrap();
        assert!(matches!(
            page.submit(),
            Err(BookingError::Wizard(WizardError::NotReady { .. }))
        ));

        page.fill(1, companion()).unwrap();
        let draft = page.submit().unwrap();
        assert_eq!(draft.step, BookingStep::Payment);
        assert_eq!(draft.passenger_count, Some(2));
        assert_eq!(draft.passengers.len(), 2);
        assert_eq!(draft.name.as_deref(), Some("Ada Obi"));
    }

    #[test]
    fn test_missing_seats_blocks_multi_page() {
        let page =
            PassengerDetailsPage::from_query("/booking/passenger-details?mode=multi").unwrap();
        let PassengerDetailsPage::Multi(page) = page else {
            panic!("expected the multi page");
        };
        assert_eq!(page.wizard().slot_count(), 0);
        assert_eq!(page.blocker(), Some(Blocker::NoSeats));
        assert!(page.submit().is_err());
    }

    #[test]
    fn test_single_page_contact_boundary() {
        let mut page = match PassengerDetailsPage::from_query(
            "/booking/passenger-details?mode=single&seats=3C&price=15000",
        )
        .unwrap()
        {
            PassengerDetailsPage::Single(page) => page,
            PassengerDetailsPage::Multi(_) => panic!("expected the single page"),
        };
        page.form_mut().full_name = "J".into();
        page.form_mut().email = "jo@example.com".into();
        page.form_mut().phone = "08012345678".into();
        assert!(!page.can_submit());
        assert!(page.errors().contains("fullName"));

        page.form_mut().full_name = "Jo".into();
        let draft = page.submit().unwrap();
        assert_eq!(draft.step, BookingStep::Payment);
        assert_eq!(draft.passenger_count, Some(1));
        assert_eq!(draft.name.as_deref(), Some("Jo"));
    }

    #[test]
    fn test_single_page_needs_seats_and_step() {
        assert!(PassengerDetailsPage::from_query("/booking/passenger-details?mode=single&price=0").is_err());
        assert!(PassengerDetailsPage::from_query("/booking/payment?seats=1A&price=15000").is_err());
    }
}
