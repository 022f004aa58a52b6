//! Per-passenger form state.

use std::fmt;

use crate::{
    models::{Passenger, PassengerEntry, PassengerField, PassengerRole},
    schema::{PassengerSchema, ValidationErrors},
};

/// Key of one passenger slot, rendered as `passenger-<n>` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey(usize);

impl SlotKey {
    /// Key of the slot at `index` (0-based).
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn index(&self) -> usize {
        self.0 - 1
    }

    pub fn number(&self) -> usize {
        self.0
    }

    /// Tab label, e.g. `Passenger 2`.
    pub fn label(&self) -> String {
        format!("Passenger {}", self.0)
    }

    pub fn role(&self) -> PassengerRole {
        PassengerRole::for_index(self.index())
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "passenger-{}", self.0)
    }
}

/// What the wizard knows about one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub is_valid: bool,
    pub data: PassengerEntry,
}

/// Change notification emitted by a dirty form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUpdate {
    pub slot: SlotKey,
    pub is_valid: bool,
    pub data: PassengerEntry,
}

impl From<SlotUpdate> for SlotState {
    fn from(update: SlotUpdate) -> Self {
        Self {
            is_valid: update.is_valid,
            data: update.data,
        }
    }
}

/// Editable form for one passenger slot.
///
/// The schema (lead or other) is picked when the form is created and never
/// changes. Nothing is reported until the first field is touched.
#[derive(Debug, Clone)]
pub struct PassengerForm {
    slot: SlotKey,
    schema: PassengerSchema,
    entry: PassengerEntry,
    dirty: bool,
}

impl PassengerForm {
    pub fn new(slot: SlotKey, role: PassengerRole) -> Self {
        Self {
            slot,
            schema: PassengerSchema::for_role(role),
            entry: PassengerEntry::default(),
            dirty: false,
        }
    }

    /// Form for `slot` with the role its position implies.
    pub fn for_slot(slot: SlotKey) -> Self {
        Self::new(slot, slot.role())
    }

    pub fn slot(&self) -> SlotKey {
        self.slot
    }

    pub fn role(&self) -> PassengerRole {
        self.schema.role()
    }

    pub fn entry(&self) -> &PassengerEntry {
        &self.entry
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_required(&self, field: PassengerField) -> bool {
        self.schema.is_required(field)
    }

    /// Writes a field and returns the update to report.
    pub fn set(&mut self, field: PassengerField, value: &str) -> Option<SlotUpdate> {
        self.entry.set(field, value);
        self.dirty = true;
        self.update()
    }

    /// Replaces the whole entry, e.g. when restoring a slot.
    pub fn fill(&mut self, entry: PassengerEntry) -> Option<SlotUpdate> {
        self.entry = entry;
        self.dirty = true;
        self.update()
    }

    /// Current update, or `None` while the form is pristine.
    pub fn update(&self) -> Option<SlotUpdate> {
        self.dirty.then(|| SlotUpdate {
            slot: self.slot,
            is_valid: self.is_valid(),
            data: self.entry.clone(),
        })
    }

    pub fn is_valid(&self) -> bool {
        self.schema.is_valid(&self.entry)
    }

    /// Inline errors; empty while the form is pristine.
    pub fn errors(&self) -> ValidationErrors {
        if self.dirty {
            self.schema.errors(&self.entry)
        } else {
            ValidationErrors::default()
        }
    }

    pub fn validate(&self) -> Result<Passenger, ValidationErrors> {
        self.schema.validate(&self.entry)
    }
}
