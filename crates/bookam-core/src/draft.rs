//! The versioned booking draft carried from one checkout step to the next.
//!
//! A draft is the only state shared between steps. It travels in the query
//! string of the next step's URL:
//!
//! | Key | Value |
//! |-----|-------|
//! | `v` | draft version, currently `1` |
//! | `step` | step the draft is addressed to |
//! | `mode` | `single` or `multi` passenger entry |
//! | `journey` | [`JourneySelection`] as JSON |
//! | `seats` | comma-separated seat labels |
//! | `price` | fare total in whole naira |
//! | `name`, `email`, `phone` | lead contact |
//! | `passengerCount` | number of passengers |
//! | `passengers` | validated passengers as a JSON list |
//! | `method` | `online` or `cash` |
//! | `card` | last four card digits |
//!
//! Unknown keys are ignored so links stay valid when keys are added. A draft
//! with a newer version than [`DRAFT_VERSION`] is refused; a draft without
//! `v` is read as version 1.

use reqwest::Url;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    currency::Naira,
    error::{BookingError, Result},
    models::{JourneySelection, LeadContact, Passenger, PaymentMethod, SeatSelection},
    wizard::{BookingStep, PassengerMode},
};

/// Current draft format version.
pub const DRAFT_VERSION: u32 = 1;

const URL_BASE: &str = "http://bookam.invalid/";

/// Accumulated checkout state addressed to one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Format version
    #[serde(rename = "v")]
    pub version: u32,
    /// Step this draft is addressed to
    pub step: BookingStep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PassengerMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journey: Option<JourneySelection>,
    #[serde(default, skip_serializing_if = "SeatSelection::is_empty")]
    pub seats: SeatSelection,
    /// Fare total in whole naira
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passengers: Vec<Passenger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    /// Last four digits of the card for online payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
}

fn base_url() -> Result<Url> {
    Url::parse(URL_BASE).map_err(|e| BookingError::draft(e.to_string()))
}

fn bad_key(key: &str, reason: impl std::fmt::Display) -> BookingError {
    BookingError::draft(format!("'{key}' {reason}"))
}

fn missing(key: &str) -> BookingError {
    BookingError::draft(format!("'{key}' is missing"))
}

impl BookingDraft {
    /// Empty draft addressed to `step`.
    pub fn new(step: BookingStep) -> Self {
        Self {
            version: DRAFT_VERSION,
            step,
            mode: None,
            journey: None,
            seats: SeatSelection::default(),
            price: None,
            name: None,
            email: None,
            phone: None,
            passenger_count: None,
            passengers: Vec::new(),
            method: None,
            card: None,
        }
    }

    /// Same draft readdressed to `step`.
    pub fn addressed_to(mut self, step: BookingStep) -> Self {
        self.step = step;
        self
    }

    /// Fare total for display.
    pub fn fare(&self) -> Naira {
        Naira(self.price.unwrap_or_default())
    }

    /// Lead contact, when all three fields are present.
    pub fn contact(&self) -> Option<LeadContact> {
        Some(LeadContact {
            name: self.name.clone()?,
            email: self.email.clone()?,
            phone: self.phone.clone()?,
        })
    }

    pub fn set_contact(&mut self, contact: &LeadContact) {
        self.name = Some(contact.name.clone());
        self.email = Some(contact.email.clone());
        self.phone = Some(contact.phone.clone());
    }

    /// Query pairs in their canonical order.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pairs = vec![
            ("v", self.version.to_string()),
            ("step", self.step.to_string()),
        ];
        if let Some(mode) = self.mode {
            pairs.push(("mode", mode.to_string()));
        }
        if let Some(journey) = &self.journey {
            pairs.push(("journey", serde_json::to_string(journey)?));
        }
        if !self.seats.is_empty() {
            pairs.push(("seats", self.seats.to_csv()));
        }
        if let Some(price) = self.price {
            pairs.push(("price", price.to_string()));
        }
        for (key, value) in [("name", &self.name), ("email", &self.email), ("phone", &self.phone)] {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        if let Some(count) = self.passenger_count {
            pairs.push(("passengerCount", count.to_string()));
        }
        if !self.passengers.is_empty() {
            pairs.push(("passengers", serde_json::to_string(&self.passengers)?));
        }
        if let Some(method) = self.method {
            pairs.push(("method", method.to_string()));
        }
        if let Some(card) = &self.card {
            pairs.push(("card", card.clone()));
        }
        Ok(pairs)
    }

    /// URL of the page for this draft's step, relative to `base`.
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let mut url = base
            .join(&self.step.path())
            .map_err(|e| BookingError::draft(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            for (key, value) in self.query_pairs()? {
                query.append_pair(key, &value);
            }
        }
        Ok(url)
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query(&self) -> Result<String> {
        Ok(self.to_url(&base_url()?)?.query().unwrap_or_default().to_string())
    }

    /// Path plus query, e.g. `/booking/payment?v=1&step=payment&...`.
    pub fn href(&self) -> Result<String> {
        Ok(format!("{}?{}", self.step.path(), self.to_query()?))
    }

    /// Parses a draft from a full URL, a path with a query string or a bare
    /// query string. The step comes from the path when it names one,
    /// otherwise from the `step` key.
    pub fn from_query(input: &str) -> Result<Self> {
        let input = input.trim();
        let url = if input.contains("://") {
            Url::parse(input).map_err(|e| BookingError::draft(e.to_string()))?
        } else if input.starts_with('/') {
            base_url()?
                .join(input)
                .map_err(|e| BookingError::draft(e.to_string()))?
        } else {
            let mut url = base_url()?;
            url.set_query(Some(input.trim_start_matches('?')));
            url
        };
        Self::from_url(&url)
    }

    pub fn from_url(url: &Url) -> Result<Self> {
        let path_step = BookingStep::from_path(url.path());
        let mut draft = Self::new(path_step.unwrap_or(BookingStep::SeatSelection));
        let mut step_key = None;

        for (key, value) in url.query_pairs() {
            let value = value.trim();
            match &*key {
                "v" => {
                    let version: u32 = value.parse().map_err(|_| bad_key("v", "is not a version"))?;
                    if version == 0 || version > DRAFT_VERSION {
                        return Err(BookingError::draft(format!(
                            "version {version} is not supported (expected {DRAFT_VERSION})"
                        )));
                    }
                    draft.version = version;
                }
                "step" => step_key = Some(value.parse::<BookingStep>().map_err(|e| bad_key("step", e))?),
                "mode" => draft.mode = Some(value.parse().map_err(|e| bad_key("mode", e))?),
                "journey" => {
                    draft.journey = Some(
                        serde_json::from_str(value)
                            .map_err(|e| bad_key("journey", format!("is not a journey: {e}")))?,
                    )
                }
                "seats" => {
                    draft.seats = SeatSelection::from_csv(value).map_err(|e| bad_key("seats", e))?
                }
                "price" => {
                    draft.price = Some(
                        value
                            .parse()
                            .map_err(|_| bad_key("price", "is not a whole naira amount"))?,
                    )
                }
                "name" => draft.name = non_empty(value),
                "email" => draft.email = non_empty(value),
                "phone" => draft.phone = non_empty(value),
                "passengerCount" => {
                    draft.passenger_count = Some(
                        value
                            .parse()
                            .map_err(|_| bad_key("passengerCount", "is not a number"))?,
                    )
                }
                "passengers" => {
                    draft.passengers = serde_json::from_str(value)
                        .map_err(|e| bad_key("passengers", format!("is not a passenger list: {e}")))?
                }
                "method" => draft.method = Some(value.parse().map_err(|e| bad_key("method", e))?),
                "card" => {
                    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
                        return Err(bad_key("card", "must be the last four card digits"));
                    }
                    draft.card = Some(value.to_string());
                }
                other => log::debug!("Ignoring unknown draft key '{other}'"),
            }
        }

        draft.step = match (path_step, step_key) {
            (Some(path), Some(key)) if path != key => {
                return Err(BookingError::draft(format!(
                    "addressed to {key} but opened on the {path} page"
                )))
            }
            (Some(step), _) | (None, Some(step)) => step,
            (None, None) => return Err(missing("step")),
        };

        draft.check_consistency()?;
        Ok(draft)
    }

    /// Cross-field checks that hold for every step.
    fn check_consistency(&self) -> Result<()> {
        if let (Some(journey), Some(price)) = (&self.journey, self.price) {
            if !self.seats.is_empty() && journey.fare_for(self.seats.len()) != price {
                return Err(bad_key(
                    "price",
                    format!(
                        "{} does not match {} seat(s) at {}",
                        Naira(price),
                        self.seats.len(),
                        Naira(journey.price)
                    ),
                ));
            }
        }
        if let Some(count) = self.passenger_count {
            if count != self.seats.len() {
                return Err(bad_key(
                    "passengerCount",
                    format!("is {count} but {} seat(s) are selected", self.seats.len()),
                ));
            }
        }
        if !self.passengers.is_empty() && self.passengers.len() != self.seats.len() {
            return Err(bad_key(
                "passengers",
                format!(
                    "lists {} passenger(s) for {} seat(s)",
                    self.passengers.len(),
                    self.seats.len()
                ),
            ));
        }
        Ok(())
    }

    /// Fails unless the draft is addressed to `step`.
    pub fn expect_step(&self, step: BookingStep) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(BookingError::draft(format!(
                "addressed to {} but opened on the {step} page",
                self.step
            )))
        }
    }

    pub fn require_journey(&self) -> Result<&JourneySelection> {
        self.journey.as_ref().ok_or_else(|| missing("journey"))
    }

    pub fn require_seats(&self) -> Result<&SeatSelection> {
        if self.seats.is_empty() {
            Err(missing("seats"))
        } else {
            Ok(&self.seats)
        }
    }

    pub fn require_price(&self) -> Result<u64> {
        self.price.ok_or_else(|| missing("price"))
    }

    pub fn require_contact(&self) -> Result<LeadContact> {
        self.contact().ok_or_else(|| {
            let key = if self.name.is_none() {
                "name"
            } else if self.email.is_none() {
                "email"
            } else {
                "phone"
            };
            missing(key)
        })
    }

    pub fn require_method(&self) -> Result<PaymentMethod> {
        self.method.ok_or_else(|| missing("method"))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeatId;

    fn journey() -> JourneySelection {
        JourneySelection {
            route_id: 7,
            bus_id: 2,
            from_city: "Lagos".into(),
            to_city: "Abuja".into(),
            departure_time: "2025-03-01T07:00".parse().unwrap(),
            arrival_time: "2025-03-01T17:30".parse().unwrap(),
            price: 15000,
        }
    }

    #[test]
    fn test_query_keeps_contract_keys() {
        let mut draft = BookingDraft::new(BookingStep::PassengerDetails);
        draft.mode = Some(PassengerMode::Multi);
        draft.journey = Some(journey());
        draft.seats = SeatSelection::from_csv("1A,1B").unwrap();
        draft.price = Some(30000);

        let query = draft.to_query().unwrap();
        assert!(query.starts_with("v=1&step=passenger-details&mode=multi&journey="));
        assert!(query.contains("&seats=1A%2C1B&price=30000"));

        let parsed = BookingDraft::from_query(&query).unwrap();
        assert_eq!(parsed, draft);
    }

    #[test]
    fn test_href_uses_step_path() {
        let mut draft = BookingDraft::new(BookingStep::Payment);
        draft.seats = SeatSelection::from_csv("3C").unwrap();
        draft.set_contact(&LeadContact {
            name: "Ada Obi".into(),
            email: "ada@example.com".into(),
            phone: "08031234567".into(),
        });
        let href = draft.href().unwrap();
        assert!(href.starts_with("/booking/payment?v=1&step=payment"));
        assert!(href.contains("name=Ada+Obi"));

        let parsed = BookingDraft::from_query(&href).unwrap();
        assert_eq!(parsed.require_contact().unwrap().name, "Ada Obi");
    }

    #[test]
    fn test_informal_query_is_version_one() {
        let draft =
            BookingDraft::from_query("/booking/passenger-details?seats=1A,1B&price=30000").unwrap();
        assert_eq!(draft.version, 1);
        assert_eq!(draft.step, BookingStep::PassengerDetails);
        assert_eq!(draft.seats.len(), 2);
        assert_eq!(draft.fare().to_string(), "₦30,000");
    }

    #[test]
    fn test_unknown_keys_ignored_newer_version_rejected() {
        let draft = BookingDraft::from_query("step=payment&utm_source=mail&seats=2D").unwrap();
        assert_eq!(draft.seats.as_slice(), &[SeatId::new(2, 'D')]);

        let err = BookingDraft::from_query("v=2&step=payment").unwrap_err();
        assert!(err.to_string().contains("version 2 is not supported"));
        assert!(BookingDraft::from_query("v=x&step=payment").is_err());
    }

    #[test]
    fn test_missing_or_conflicting_step() {
        assert!(BookingDraft::from_query("seats=1A").is_err());
        let err = BookingDraft::from_query("/booking/payment?step=confirmation").unwrap_err();
        assert!(matches!(err, BookingError::Draft { .. }));
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(BookingDraft::from_query("step=payment&seats=1A,ZZ").is_err());
        assert!(BookingDraft::from_query("step=payment&price=abc").is_err());
        assert!(BookingDraft::from_query("step=payment&journey=%7Bnot-json").is_err());
        assert!(BookingDraft::from_query("step=confirmation&card=4111111111111111").is_err());
        assert!(BookingDraft::from_query("step=payment&method=cheque").is_err());
    }

    #[test]
    fn test_consistency_checks() {
        let mut draft = BookingDraft::new(BookingStep::Payment);
        draft.journey = Some(journey());
        draft.seats = SeatSelection::from_csv("1A,1B").unwrap();
        draft.price = Some(20000);
        let err = BookingDraft::from_query(&draft.to_query().unwrap()).unwrap_err();
        assert!(err.to_string().contains("price"));

        draft.price = Some(30000);
        draft.passenger_count = Some(3);
        let err = BookingDraft::from_query(&draft.to_query().unwrap()).unwrap_err();
        assert!(err.to_string().contains("passengerCount"));
    }

    #[test]
    fn test_require_helpers() {
        let draft = BookingDraft::from_query("step=payment&name=Ada&email=a%40b.ng").unwrap();
        assert!(draft.expect_step(BookingStep::Payment).is_ok());
        assert!(draft.expect_step(BookingStep::Confirmation).is_err());
        assert!(draft.require_seats().is_err());
        assert!(draft.require_journey().is_err());
        let err = draft.require_contact().unwrap_err();
        assert!(err.to_string().contains("'phone' is missing"));
    }
}
