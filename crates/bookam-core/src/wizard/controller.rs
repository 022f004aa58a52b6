//! Tabbed multi-passenger controller.

use std::collections::BTreeMap;

use thiserror::Error;

use super::form::{PassengerForm, SlotKey, SlotState, SlotUpdate};
use crate::models::{LeadContact, Passenger, PassengerEntry, PassengerField, SeatSelection};

/// Refused wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// There are no slots; go back to seat selection
    #[error("No seats selected. Go back and choose your seats first")]
    NoSeats,
    /// Some slot is still invalid
    #[error("Passenger details incomplete for {}", format_slots(pending))]
    NotReady { pending: Vec<SlotKey> },
    /// A slot before the requested tab is invalid
    #[error("Complete {} before moving on", slot.label())]
    SlotIncomplete { slot: SlotKey },
    #[error("There is no passenger tab {number}")]
    NoSuchTab { number: usize },
}

fn format_slots(slots: &[SlotKey]) -> String {
    slots
        .iter()
        .map(SlotKey::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why the wizard can never reach its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    NoSeats,
}

/// Everything the payment step needs from the passenger step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerDetails {
    /// Contact of the lead passenger
    pub contact: LeadContact,
    /// Validated passengers in seat order
    pub passengers: Vec<Passenger>,
    pub seats: SeatSelection,
    /// Fare total in whole naira
    pub fare: u64,
}

/// One tab per selected seat; the first tab is the lead passenger.
///
/// The controller owns the slot map and folds every form update into it.
/// Moving forward is only allowed over valid slots, and the terminal
/// [`continue_to_payment`](Self::continue_to_payment) requires all of them.
#[derive(Debug, Clone)]
pub struct PassengerWizard {
    seats: SeatSelection,
    fare: u64,
    forms: Vec<PassengerForm>,
    slots: BTreeMap<SlotKey, SlotState>,
    active: usize,
}

impl PassengerWizard {
    pub fn new(seats: SeatSelection, fare: u64) -> Self {
        let forms: Vec<PassengerForm> = (0..seats.len())
            .map(|i| PassengerForm::for_slot(SlotKey::from_index(i)))
            .collect();
        let slots = forms
            .iter()
            .map(|form| (form.slot(), SlotState::default()))
            .collect();
        Self {
            seats,
            fare,
            forms,
            slots,
            active: 0,
        }
    }

    /// Rebuilds every slot for a changed seat selection. Entered data is
    /// discarded.
    pub fn resync(&mut self, seats: SeatSelection, fare: u64) {
        *self = Self::new(seats, fare);
    }

    pub fn seats(&self) -> &SeatSelection {
        &self.seats
    }

    /// Fare total in whole naira.
    pub fn fare(&self) -> u64 {
        self.fare
    }

    pub fn slot_count(&self) -> usize {
        self.forms.len()
    }

    /// Tab labels in order.
    pub fn tabs(&self) -> Vec<String> {
        self.forms.iter().map(|f| f.slot().label()).collect()
    }

    pub fn state(&self) -> &BTreeMap<SlotKey, SlotState> {
        &self.slots
    }

    pub fn slot(&self, key: SlotKey) -> Option<&SlotState> {
        self.slots.get(&key)
    }

    pub fn form(&self, index: usize) -> Option<&PassengerForm> {
        self.forms.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_form(&self) -> Option<&PassengerForm> {
        self.forms.get(self.active)
    }

    pub fn blocker(&self) -> Option<Blocker> {
        self.forms.is_empty().then_some(Blocker::NoSeats)
    }

    /// Records a form update into the slot map.
    pub fn apply(&mut self, update: SlotUpdate) {
        if let Some(state) = self.slots.get_mut(&update.slot) {
            *state = update.into();
        }
    }

    /// Edits a field of the slot at `index`.
    pub fn set_field(
        &mut self,
        index: usize,
        field: PassengerField,
        value: &str,
    ) -> Result<&SlotState, WizardError> {
        let form = self
            .forms
            .get_mut(index)
            .ok_or(WizardError::NoSuchTab { number: index + 1 })?;
        let key = form.slot();
        if let Some(update) = form.set(field, value) {
            self.apply(update);
        }
        self.slots
            .get(&key)
            .ok_or(WizardError::NoSuchTab { number: index + 1 })
    }

    /// Edits a field of the active tab.
    pub fn set_active_field(
        &mut self,
        field: PassengerField,
        value: &str,
    ) -> Result<&SlotState, WizardError> {
        self.set_field(self.active, field, value)
    }

    /// Replaces the whole entry of the slot at `index`.
    pub fn fill(&mut self, index: usize, entry: PassengerEntry) -> Result<&SlotState, WizardError> {
        let form = self
            .forms
            .get_mut(index)
            .ok_or(WizardError::NoSuchTab { number: index + 1 })?;
        let key = form.slot();
        if let Some(update) = form.fill(entry) {
            self.apply(update);
        }
        self.slots
            .get(&key)
            .ok_or(WizardError::NoSuchTab { number: index + 1 })
    }

    fn is_slot_valid(&self, index: usize) -> bool {
        self.slots
            .get(&SlotKey::from_index(index))
            .map(|s| s.is_valid)
            .unwrap_or(false)
    }

    /// Whether the "next" button of the active tab is enabled.
    pub fn can_advance(&self) -> bool {
        self.active + 1 < self.forms.len() && self.is_slot_valid(self.active)
    }

    pub fn advance(&mut self) -> Result<usize, WizardError> {
        self.select(self.active + 1)
    }

    /// Moves one tab back; stays put on the first tab.
    pub fn back(&mut self) -> usize {
        self.active = self.active.saturating_sub(1);
        self.active
    }

    /// Jumps to tab `index`. Going back is always allowed; going forward
    /// needs every slot before the target to be valid.
    pub fn select(&mut self, index: usize) -> Result<usize, WizardError> {
        if self.forms.is_empty() {
            return Err(WizardError::NoSeats);
        }
        if index >= self.forms.len() {
            return Err(WizardError::NoSuchTab { number: index + 1 });
        }
        if let Some(blocking) = (0..index).find(|&i| !self.is_slot_valid(i)) {
            return Err(WizardError::SlotIncomplete {
                slot: SlotKey::from_index(blocking),
            });
        }
        self.active = index;
        Ok(index)
    }

    /// Slots that are not valid yet.
    pub fn pending(&self) -> Vec<SlotKey> {
        self.slots
            .iter()
            .filter(|(_, s)| !s.is_valid)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Every slot valid and at least one slot.
    pub fn is_ready(&self) -> bool {
        !self.slots.is_empty() && self.slots.values().all(|s| s.is_valid)
    }

    /// Terminal transition: composes the payload for the payment step.
    pub fn continue_to_payment(&self) -> Result<PassengerDetails, WizardError> {
        if self.blocker().is_some() {
            return Err(WizardError::NoSeats);
        }
        if !self.is_ready() {
            return Err(WizardError::NotReady {
                pending: self.pending(),
            });
        }

        let passengers = self
            .forms
            .iter()
            .map(|form| {
                form.validate().map_err(|_| WizardError::NotReady {
                    pending: vec![form.slot()],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let contact = passengers
            .first()
            .and_then(Passenger::lead_contact)
            .ok_or(WizardError::NotReady {
                pending: vec![SlotKey::from_index(0)],
            })?;

        Ok(PassengerDetails {
            contact,
            passengers,
            seats: self.seats.clone(),
            fare: self.fare,
        })
    }
}
