//! Contact form used when a booking has a single passenger.

use serde::{Deserialize, Serialize};

use super::{FieldSpec, Rule, ValidationErrors};
use crate::models::LeadContact;

/// Raw single-passenger contact input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct ContactSchema {
    full_name: FieldSpec,
    email: FieldSpec,
    phone: FieldSpec,
}

impl Default for ContactSchema {
    fn default() -> Self {
        Self {
            full_name: FieldSpec::required("fullName").rule(Rule::MinLength(2)),
            email: FieldSpec::required("email").rule(Rule::Email),
            phone: FieldSpec::required("phone").rule(Rule::MinLength(10)),
        }
    }
}

impl ContactSchema {
    pub fn errors(&self, form: &ContactForm) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        self.full_name.check_into(&form.full_name, &mut errors);
        self.email.check_into(&form.email, &mut errors);
        self.phone.check_into(&form.phone, &mut errors);
        errors
    }

    pub fn validate(&self, form: &ContactForm) -> Result<LeadContact, ValidationErrors> {
        self.errors(form).into_result(|| LeadContact {
            name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
        })
    }
}
