//! Passenger schemas: one for the lead passenger, one for everyone else.

use super::{non_blank, FieldError, FieldSpec, Rule, ValidationErrors};
use crate::models::{
    LeadPassenger, OtherPassenger, Passenger, PassengerEntry, PassengerField, PassengerRole,
    Title,
};

const TITLES: &[&str] = &["Mr", "Mrs", "Ms", "Miss", "Dr", "Chief"];

/// Validation schema for one passenger slot.
///
/// The lead schema requires e-mail, phone and accepted terms; the other
/// schema leaves them optional. A slot picks its schema once, at creation.
#[derive(Debug, Clone)]
pub struct PassengerSchema {
    role: PassengerRole,
    title: FieldSpec,
    first_name: FieldSpec,
    last_name: FieldSpec,
    email: FieldSpec,
    phone: FieldSpec,
    date_of_birth: FieldSpec,
}

impl PassengerSchema {
    /// Schema for the lead passenger (slot 0).
    pub fn lead() -> Self {
        Self::build(PassengerRole::Lead)
    }

    /// Schema for every passenger after the first.
    pub fn other() -> Self {
        Self::build(PassengerRole::Other)
    }

    pub fn for_role(role: PassengerRole) -> Self {
        Self::build(role)
    }

    fn build(role: PassengerRole) -> Self {
        let contact = |name| match role {
            PassengerRole::Lead => FieldSpec::required(name),
            PassengerRole::Other => FieldSpec::optional(name),
        };

        Self {
            role,
            title: FieldSpec::required("title").rule(Rule::OneOf(TITLES)),
            first_name: FieldSpec::required("firstName").rule(Rule::MinLength(2)),
            last_name: FieldSpec::required("lastName").rule(Rule::MinLength(2)),
            email: contact("email").rule(Rule::Email),
            phone: contact("phone").rule(Rule::MinLength(10)),
            date_of_birth: FieldSpec::optional("dateOfBirth").rule(Rule::Date),
        }
    }

    pub fn role(&self) -> PassengerRole {
        self.role
    }

    /// Whether `field` must be filled in under this schema.
    pub fn is_required(&self, field: PassengerField) -> bool {
        match field {
            PassengerField::Title | PassengerField::FirstName | PassengerField::LastName => true,
            PassengerField::Email | PassengerField::Phone | PassengerField::TermsAccepted => {
                self.role == PassengerRole::Lead
            }
            _ => false,
        }
    }

    /// Collects every field error of `entry`.
    pub fn errors(&self, entry: &PassengerEntry) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        self.title.check_into(&entry.title, &mut errors);
        self.first_name.check_into(&entry.first_name, &mut errors);
        self.last_name.check_into(&entry.last_name, &mut errors);
        self.email.check_into(&entry.email, &mut errors);
        self.phone.check_into(&entry.phone, &mut errors);
        self.date_of_birth
            .check_into(&entry.date_of_birth, &mut errors);
        if self.role == PassengerRole::Lead && !entry.terms_accepted {
            errors.push(FieldError::new(
                PassengerField::TermsAccepted.key(),
                "You must accept the terms and conditions",
            ));
        }
        errors
    }

    pub fn is_valid(&self, entry: &PassengerEntry) -> bool {
        self.errors(entry).is_empty()
    }

    /// Converts a raw entry into a validated passenger of this schema's role.
    pub fn validate(&self, entry: &PassengerEntry) -> Result<Passenger, ValidationErrors> {
        let errors = self.errors(entry);
        if !errors.is_empty() {
            return Err(errors);
        }

        let title: Title = entry.title.parse().map_err(|message: String| {
            let mut errors = ValidationErrors::default();
            errors.push(FieldError::new("title", message));
            errors
        })?;
        let first_name = entry.first_name.trim().to_string();
        let last_name = entry.last_name.trim().to_string();
        let date_of_birth = non_blank(&entry.date_of_birth).and_then(|d| d.parse().ok());
        let nationality = non_blank(&entry.nationality);
        let special_requirements = non_blank(&entry.special_requirements);

        Ok(match self.role {
            PassengerRole::Lead => Passenger::Lead(LeadPassenger {
                title,
                first_name,
                last_name,
                email: entry.email.trim().to_string(),
                phone: entry.phone.trim().to_string(),
                date_of_birth,
                nationality,
                special_requirements,
            }),
            PassengerRole::Other => Passenger::Other(OtherPassenger {
                title,
                first_name,
                last_name,
                email: non_blank(&entry.email),
                phone: non_blank(&entry.phone),
                date_of_birth,
                nationality,
                special_requirements,
            }),
        })
    }
}
