//! Seat map and selection for one journey.

use std::collections::BTreeSet;

use crate::{
    api::BookingApi,
    currency::Naira,
    draft::BookingDraft,
    error::{BookingError, Result},
    models::{seat_map, JourneySelection, SeatId, SeatSelection, SEAT_LETTERS},
    wizard::{BookingStep, PassengerMode},
};

/// How a seat shows on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Available,
    Selected,
    Taken,
}

/// First page of checkout: pick seats on the chosen bus.
#[derive(Debug, Clone)]
pub struct SeatSelectionPage {
    journey: JourneySelection,
    seats: Vec<SeatId>,
    taken: BTreeSet<SeatId>,
    selection: SeatSelection,
}

impl SeatSelectionPage {
    pub fn new(
        journey: JourneySelection,
        capacity: u32,
        taken: impl IntoIterator<Item = SeatId>,
    ) -> Self {
        Self {
            journey,
            seats: seat_map(capacity),
            taken: taken.into_iter().collect(),
            selection: SeatSelection::new(),
        }
    }

    /// Fetches the route, its bus and the seats already held.
    pub async fn load<A: BookingApi>(api: &A, route_id: u64) -> Result<Self> {
        let route = api.get_route(route_id).await?;
        let bus = api.get_bus(route.bus_id).await?;
        let taken = api.taken_seats(route_id).await?;
        Ok(Self::new(JourneySelection::from(&route), bus.capacity, taken))
    }

    pub fn journey(&self) -> &JourneySelection {
        &self.journey
    }

    pub fn selection(&self) -> &SeatSelection {
        &self.selection
    }

    pub fn status(&self, seat: &SeatId) -> Option<SeatStatus> {
        if !self.seats.contains(seat) {
            None
        } else if self.taken.contains(seat) {
            Some(SeatStatus::Taken)
        } else if self.selection.contains(seat) {
            Some(SeatStatus::Selected)
        } else {
            Some(SeatStatus::Available)
        }
    }

    /// Seat map grouped by row.
    pub fn rows(&self) -> Vec<Vec<(SeatId, SeatStatus)>> {
        self.seats
            .chunks(SEAT_LETTERS.len())
            .map(|row| {
                row.iter()
                    .map(|seat| {
                        let status = self.status(seat).unwrap_or(SeatStatus::Taken);
                        (seat.clone(), status)
                    })
                    .collect()
            })
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.seats.len() - self.taken.iter().filter(|s| self.seats.contains(s)).count()
    }

    /// Selects or deselects `seat`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, seat: &SeatId) -> Result<bool> {
        match self.status(seat) {
            None => Err(BookingError::invalid_input("seat")
                .with_reason(format!("Seat {seat} does not exist on this bus"))),
            Some(SeatStatus::Taken) => Err(BookingError::SeatUnavailable {
                seat: seat.to_string(),
                route_id: self.journey.route_id,
            }),
            Some(_) => Ok(self.selection.toggle(seat.clone())),
        }
    }

    /// Fare total for the current selection.
    pub fn fare(&self) -> Naira {
        Naira(self.journey.fare_for(self.selection.len()))
    }

    /// Draft for the passenger details page. `mode` defaults to single for
    /// one seat and multi otherwise.
    pub fn proceed(&self, mode: Option<PassengerMode>) -> Result<BookingDraft> {
        if self.selection.is_empty() {
            return Err(BookingError::invalid_input("seats").with_reason("Select at least one seat"));
        }
        let mut draft = BookingDraft::new(BookingStep::PassengerDetails);
        draft.mode = Some(mode.unwrap_or_else(|| PassengerMode::for_seat_count(self.selection.len())));
        draft.journey = Some(self.journey.clone());
        draft.seats = self.selection.clone();
        draft.price = Some(self.fare().0);
        Ok(draft)
    }
}
