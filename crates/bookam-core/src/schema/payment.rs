//! Payment form: card fields are only checked for online payments.

use serde::{Deserialize, Serialize};

use super::{parse_expiry, FieldSpec, Rule, ValidationErrors};
use crate::models::{CardDetails, PaymentMethod, PaymentSelection};

/// Raw payment input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub method: PaymentMethod,
    pub card_name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentForm {
    /// Cash payment; needs nothing else.
    pub fn cash() -> Self {
        Self {
            method: PaymentMethod::Cash,
            ..Default::default()
        }
    }

    pub fn card(
        card_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry_date: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            method: PaymentMethod::Online,
            card_name: card_name.into(),
            card_number: card_number.into(),
            expiry_date: expiry_date.into(),
            cvv: cvv.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentSchema {
    card_name: FieldSpec,
    card_number: FieldSpec,
    expiry_date: FieldSpec,
    cvv: FieldSpec,
}

impl Default for PaymentSchema {
    fn default() -> Self {
        Self {
            card_name: FieldSpec::required("cardName").rule(Rule::MinLength(2)),
            card_number: FieldSpec::required("cardNumber").rule(Rule::Digits(16)),
            expiry_date: FieldSpec::required("expiryDate").rule(Rule::Expiry),
            cvv: FieldSpec::required("cvv").rule(Rule::Digits(3)),
        }
    }
}

impl PaymentSchema {
    pub fn errors(&self, form: &PaymentForm) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        if form.method == PaymentMethod::Cash {
            return errors;
        }
        self.card_name.check_into(&form.card_name, &mut errors);
        self.card_number.check_into(&form.card_number, &mut errors);
        self.expiry_date.check_into(&form.expiry_date, &mut errors);
        self.cvv.check_into(&form.cvv, &mut errors);
        errors
    }

    /// Whether the submit button would be enabled.
    pub fn can_submit(&self, form: &PaymentForm) -> bool {
        self.errors(form).is_empty()
    }

    pub fn validate(&self, form: &PaymentForm) -> Result<PaymentSelection, ValidationErrors> {
        let errors = self.errors(form);
        if !errors.is_empty() {
            return Err(errors);
        }
        match form.method {
            PaymentMethod::Cash => Ok(PaymentSelection::Cash),
            PaymentMethod::Online => {
                let (expiry_month, expiry_year) =
                    parse_expiry(&form.expiry_date).unwrap_or_default();
                Ok(PaymentSelection::Online(CardDetails {
                    card_name: form.card_name.trim().to_string(),
                    card_number: digits(&form.card_number),
                    expiry_month,
                    expiry_year,
                    cvv: digits(&form.cvv),
                }))
            }
        }
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_never_blocked() {
        let schema = PaymentSchema::default();
        let form = PaymentForm::cash();
        assert!(schema.can_submit(&form));
        assert_eq!(schema.validate(&form).unwrap(), PaymentSelection::Cash);
    }

    #[test]
    fn test_online_requires_card_fields() {
        let schema = PaymentSchema::default();
        let errors = schema.errors(&PaymentForm::default());
        assert_eq!(errors.len(), 4);
        assert!(!schema.can_submit(&PaymentForm::default()));
    }

    #[test]
    fn test_online_card_accepted() {
        let form = PaymentForm::card("Ada Obi", "4111 1111 1111 1111", "09/28", "123");
        let selection = PaymentSchema::default().validate(&form).unwrap();
        match selection {
            PaymentSelection::Online(card) => {
                assert_eq!(card.card_number, "4111111111111111");
                assert_eq!((card.expiry_month, card.expiry_year), (9, 28));
            }
            PaymentSelection::Cash => panic!("expected card payment"),
        }
    }

    #[test]
    fn test_online_field_rules() {
        let schema = PaymentSchema::default();
        let form = PaymentForm::card("Ada Obi", "4111 1111 1111", "13/28", "12");
        let errors = schema.errors(&form);
        assert!(errors.contains("cardNumber"));
        assert!(errors.contains("expiryDate"));
        assert!(errors.contains("cvv"));
        assert!(!errors.contains("cardName"));
    }

    #[test]
    fn test_switching_to_cash_clears_card_errors() {
        let schema = PaymentSchema::default();
        let mut form = PaymentForm::card("", "", "", "");
        assert!(!schema.can_submit(&form));
        form.method = PaymentMethod::Cash;
        assert!(schema.can_submit(&form));
    }
}
