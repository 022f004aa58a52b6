//! Payment method and card details captured at the payment step.

use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The two mutually exclusive payment modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Online,
    Cash,
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" | "card" => Ok(PaymentMethod::Online),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(format!("Invalid payment method: {s}")),
        }
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Human label shown on tickets and tables.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "Card (online)",
            PaymentMethod::Cash => "Cash at terminal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card details that passed the online-payment schema.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub card_name: String,
    /// Digits only
    pub card_number: String,
    pub expiry_month: u8,
    /// Two-digit year
    pub expiry_year: u8,
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number.
    pub fn last_four(&self) -> &str {
        let len = self.card_number.len();
        &self.card_number[len.saturating_sub(4)..]
    }

    /// Masked number safe for display and for carrying to the next step.
    pub fn masked(&self) -> String {
        format!("•••• {}", self.last_four())
    }
}

// Never print the full card number or the CVV.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_name", &self.card_name)
            .field("card_number", &self.masked())
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish_non_exhaustive()
    }
}

/// Outcome of a successful payment form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSelection {
    Online(CardDetails),
    Cash,
}

impl PaymentSelection {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentSelection::Online(_) => PaymentMethod::Online,
            PaymentSelection::Cash => PaymentMethod::Cash,
        }
    }

    /// Masked card reference for online payments.
    pub fn card_reference(&self) -> Option<String> {
        match self {
            PaymentSelection::Online(card) => Some(card.last_four().to_string()),
            PaymentSelection::Cash => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_masking() {
        let card = CardDetails {
            card_name: "Ada Obi".into(),
            card_number: "4111111111111111".into(),
            expiry_month: 12,
            expiry_year: 29,
            cvv: "123".into(),
        };
        assert_eq!(card.last_four(), "1111");
        assert_eq!(card.masked(), "•••• 1111");
        let debug = format!("{card:?}");
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Online);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
