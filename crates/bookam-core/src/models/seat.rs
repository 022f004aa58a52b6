//! Seat identifiers and the ordered seat selection of a booking attempt.

use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Seat letters used on every bus, four seats per row.
pub const SEAT_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A validated seat label such as `"12A"`: a row number from 1 to 999 followed
/// by a seat letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(try_from = "String", into = "String")]
pub struct SeatId(String);

impl SeatId {
    /// Builds the seat at `row` (1-based) and `letter`.
    pub fn new(row: u32, letter: char) -> Self {
        Self(format!("{row}{}", letter.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Row number of the seat.
    pub fn row(&self) -> u32 {
        self.0[..self.0.len() - 1].parse().unwrap_or(0)
    }

    /// Seat letter within the row.
    pub fn letter(&self) -> char {
        self.0.chars().last().unwrap_or('A')
    }
}

impl FromStr for SeatId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_ascii_uppercase();
        let invalid = || {
            BookingError::invalid_input("seat")
                .with_reason(format!("'{s}' is not a seat label like 12A"))
        };
        if !label.is_ascii() {
            return Err(invalid());
        }

        let (row, letter) = label.split_at(label.len().saturating_sub(1));
        let letter = letter.chars().next().ok_or_else(invalid)?;
        if !letter.is_ascii_alphabetic()
            || row.is_empty()
            || row.len() > 3
            || row.starts_with('0')
            || !row.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        Ok(Self(label))
    }
}

impl TryFrom<String> for SeatId {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates the seat map for a bus with `capacity` seats, row by row.
pub fn seat_map(capacity: u32) -> Vec<SeatId> {
    let per_row = SEAT_LETTERS.len() as u32;
    (0..capacity)
        .map(|i| SeatId::new(i / per_row + 1, SEAT_LETTERS[(i % per_row) as usize]))
        .collect()
}

/// Ordered set of seats picked during one booking attempt.
///
/// Insertion order is preserved because slot `n` of the passenger wizard is
/// bound to the `n`th selected seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct SeatSelection(Vec<SeatId>);

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated seat list as carried in the `seats` query
    /// parameter. Blank entries are skipped and duplicates dropped.
    pub fn from_csv(csv: &str) -> Result<Self> {
        let mut selection = Self::new();
        for part in csv.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            selection.insert(part.parse()?);
        }
        Ok(selection)
    }

    /// Adds a seat; returns false when it was already selected.
    pub fn insert(&mut self, seat: SeatId) -> bool {
        if self.contains(&seat) {
            return false;
        }
        self.0.push(seat);
        true
    }

    /// Selects the seat, or deselects it when already selected. Returns
    /// whether the seat is selected afterwards.
    pub fn toggle(&mut self, seat: SeatId) -> bool {
        match self.0.iter().position(|s| *s == seat) {
            Some(index) => {
                self.0.remove(index);
                false
            }
            None => {
                self.0.push(seat);
                true
            }
        }
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        self.0.contains(seat)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeatId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SeatId] {
        &self.0
    }

    /// Comma-separated form used in the query string.
    pub fn to_csv(&self) -> String {
        self.0
            .iter()
            .map(SeatId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<SeatId> for SeatSelection {
    fn from_iter<I: IntoIterator<Item = SeatId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for seat in iter {
            selection.insert(seat);
        }
        selection
    }
}

impl<'a> IntoIterator for &'a SeatSelection {
    type Item = &'a SeatId;
    type IntoIter = std::slice::Iter<'a, SeatId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for SeatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&self.0.iter().map(SeatId::as_str).collect::<Vec<_>>().join(", "))
        }
    }
}
