//! Passenger data: the raw per-slot form entry and the validated passenger
//! records produced from it.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fixed set of honorifics offered by the passenger form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum Title {
    Mr,
    Mrs,
    Ms,
    Miss,
    Dr,
    Chief,
}

impl Title {
    pub const ALL: [Title; 6] = [
        Title::Mr,
        Title::Mrs,
        Title::Ms,
        Title::Miss,
        Title::Dr,
        Title::Chief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Mrs => "Mrs",
            Title::Ms => "Ms",
            Title::Miss => "Miss",
            Title::Dr => "Dr",
            Title::Chief => "Chief",
        }
    }
}

impl FromStr for Title {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_end_matches('.');
        Title::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| format!("Invalid title: {s}"))
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which schema a passenger slot is validated against.
///
/// Slot 0 is always the lead passenger, who carries the contact details for
/// the whole booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerRole {
    Lead,
    Other,
}

impl PassengerRole {
    /// Role for the slot at `index` (0-based).
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            PassengerRole::Lead
        } else {
            PassengerRole::Other
        }
    }
}

/// Editable fields of the passenger form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PassengerField {
    Title,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Nationality,
    SpecialRequirements,
    TermsAccepted,
}

impl PassengerField {
    pub const ALL: [PassengerField; 9] = [
        PassengerField::Title,
        PassengerField::FirstName,
        PassengerField::LastName,
        PassengerField::Email,
        PassengerField::Phone,
        PassengerField::DateOfBirth,
        PassengerField::Nationality,
        PassengerField::SpecialRequirements,
        PassengerField::TermsAccepted,
    ];

    /// Key used for inline error messages and key=value input.
    pub fn key(&self) -> &'static str {
        match self {
            PassengerField::Title => "title",
            PassengerField::FirstName => "firstName",
            PassengerField::LastName => "lastName",
            PassengerField::Email => "email",
            PassengerField::Phone => "phone",
            PassengerField::DateOfBirth => "dateOfBirth",
            PassengerField::Nationality => "nationality",
            PassengerField::SpecialRequirements => "specialRequirements",
            PassengerField::TermsAccepted => "termsAccepted",
        }
    }
}

impl FromStr for PassengerField {
    type Err = String;

    /// Accepts the camelCase key as well as snake_case and short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match compact.as_str() {
            "title" => Ok(PassengerField::Title),
            "firstname" | "first" => Ok(PassengerField::FirstName),
            "lastname" | "last" => Ok(PassengerField::LastName),
            "email" => Ok(PassengerField::Email),
            "phone" => Ok(PassengerField::Phone),
            "dateofbirth" | "dob" => Ok(PassengerField::DateOfBirth),
            "nationality" => Ok(PassengerField::Nationality),
            "specialrequirements" | "requirements" => Ok(PassengerField::SpecialRequirements),
            "termsaccepted" | "terms" => Ok(PassengerField::TermsAccepted),
            _ => Err(format!("Unknown passenger field: {s}")),
        }
    }
}

/// Raw contents of one passenger slot exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerEntry {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub special_requirements: String,
    pub terms_accepted: bool,
}

impl PassengerEntry {
    /// Current text of a field; `terms_accepted` reads as "true"/"false".
    pub fn get(&self, field: PassengerField) -> String {
        match field {
            PassengerField::Title => self.title.clone(),
            PassengerField::FirstName => self.first_name.clone(),
            PassengerField::LastName => self.last_name.clone(),
            PassengerField::Email => self.email.clone(),
            PassengerField::Phone => self.phone.clone(),
            PassengerField::DateOfBirth => self.date_of_birth.clone(),
            PassengerField::Nationality => self.nationality.clone(),
            PassengerField::SpecialRequirements => self.special_requirements.clone(),
            PassengerField::TermsAccepted => self.terms_accepted.to_string(),
        }
    }

    /// Overwrites a field with user input.
    pub fn set(&mut self, field: PassengerField, value: &str) {
        let value = value.to_string();
        match field {
            PassengerField::Title => self.title = value,
            PassengerField::FirstName => self.first_name = value,
            PassengerField::LastName => self.last_name = value,
            PassengerField::Email => self.email = value,
            PassengerField::Phone => self.phone = value,
            PassengerField::DateOfBirth => self.date_of_birth = value,
            PassengerField::Nationality => self.nationality = value,
            PassengerField::SpecialRequirements => self.special_requirements = value,
            PassengerField::TermsAccepted => {
                self.terms_accepted = matches!(
                    value.trim().to_lowercase().as_str(),
                    "true" | "yes" | "y" | "1" | "on"
                )
            }
        }
    }
}

/// Contact details of the person responsible for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LeadContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated lead passenger; contact fields are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeadPassenger {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub date_of_birth: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

/// Validated companion passenger; contact fields are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct OtherPassenger {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub date_of_birth: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

/// A passenger that passed the schema for its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Passenger {
    Lead(LeadPassenger),
    Other(OtherPassenger),
}

impl Passenger {
    pub fn role(&self) -> PassengerRole {
        match self {
            Passenger::Lead(_) => PassengerRole::Lead,
            Passenger::Other(_) => PassengerRole::Other,
        }
    }

    pub fn title(&self) -> Title {
        match self {
            Passenger::Lead(p) => p.title,
            Passenger::Other(p) => p.title,
        }
    }

    /// "First Last" without the title.
    pub fn full_name(&self) -> String {
        match self {
            Passenger::Lead(p) => format!("{} {}", p.first_name, p.last_name),
            Passenger::Other(p) => format!("{} {}", p.first_name, p.last_name),
        }
    }

    /// Contact details when this is the lead passenger.
    pub fn lead_contact(&self) -> Option<LeadContact> {
        match self {
            Passenger::Lead(p) => Some(LeadContact {
                name: format!("{} {}", p.first_name, p.last_name),
                email: p.email.clone(),
                phone: p.phone.clone(),
            }),
            Passenger::Other(_) => None,
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title(), self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_parsing() {
        assert_eq!("mrs".parse::<Title>().unwrap(), Title::Mrs);
        assert_eq!("Dr.".parse::<Title>().unwrap(), Title::Dr);
        assert!("Sir".parse::<Title>().is_err());
    }

    #[test]
    fn test_field_aliases() {
        assert_eq!(
            "first_name".parse::<PassengerField>().unwrap(),
            PassengerField::FirstName
        );
        assert_eq!(
            "firstName".parse::<PassengerField>().unwrap(),
            PassengerField::FirstName
        );
        assert_eq!(
            "terms".parse::<PassengerField>().unwrap(),
            PassengerField::TermsAccepted
        );
        assert!("age".parse::<PassengerField>().is_err());
    }

    #[test]
    fn test_entry_set_terms() {
        let mut entry = PassengerEntry::default();
        entry.set(PassengerField::TermsAccepted, "yes");
        assert!(entry.terms_accepted);
        entry.set(PassengerField::TermsAccepted, "no");
        assert!(!entry.terms_accepted);
        assert_eq!(entry.get(PassengerField::TermsAccepted), "false");
    }

    #[test]
    fn test_passenger_tagged_serde() {
        let passenger = Passenger::Other(OtherPassenger {
            title: Title::Ms,
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: None,
            phone: None,
            date_of_birth: None,
            nationality: None,
            special_requirements: None,
        });
        let json = serde_json::to_value(&passenger).unwrap();
        assert_eq!(json["role"], "other");
        assert_eq!(json["firstName"], "Ada");
        let back: Passenger = serde_json::from_value(json).unwrap();
        assert_eq!(back, passenger);
        assert!(back.lead_contact().is_none());
    }
}
