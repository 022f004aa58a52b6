//! Payment page.

use crate::{
    currency::Naira,
    draft::BookingDraft,
    error::Result,
    models::{LeadContact, PaymentMethod, SeatSelection},
    schema::{PaymentForm, PaymentSchema, ValidationErrors},
    wizard::BookingStep,
};

/// Choose between card and cash. Card fields only matter for online payment.
#[derive(Debug, Clone)]
pub struct PaymentPage {
    draft: BookingDraft,
    contact: LeadContact,
    form: PaymentForm,
    schema: PaymentSchema,
}

impl PaymentPage {
    pub fn from_draft(draft: BookingDraft) -> Result<Self> {
        draft.expect_step(BookingStep::Payment)?;
        draft.require_seats()?;
        draft.require_price()?;
        let contact = draft.require_contact()?;
        let form = PaymentForm {
            method: draft.method.unwrap_or_default(),
            ..Default::default()
        };
        Ok(Self {
            draft,
            contact,
            form,
            schema: PaymentSchema::default(),
        })
    }

    pub fn from_query(input: &str) -> Result<Self> {
        Self::from_draft(BookingDraft::from_query(input)?)
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn contact(&self) -> &LeadContact {
        &self.contact
    }

    pub fn seats(&self) -> &SeatSelection {
        &self.draft.seats
    }

    pub fn fare(&self) -> Naira {
        self.draft.fare()
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PaymentForm {
        &mut self.form
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        self.form.method = method;
    }

    pub fn errors(&self) -> ValidationErrors {
        self.schema.errors(&self.form)
    }

    /// Whether the pay button is enabled. Always true for cash.
    pub fn can_submit(&self) -> bool {
        self.schema.can_submit(&self.form)
    }

    /// Draft for the confirmation page. Only the last four card digits are
    /// carried forward.
    pub fn submit(&self) -> Result<BookingDraft> {
        let selection = self.schema.validate(&self.form)?;
        let mut draft = self.draft.clone();
        draft.method = Some(selection.method());
        draft.card = selection.card_reference();
        Ok(draft.addressed_to(BookingStep::Confirmation))
    }
}
