//! Form schemas: field-level validation rules for every form in the app.
//!
//! Each form is described by a set of [`FieldSpec`]s, one per field, listing
//! whether the field is required and which [`Rule`]s its value must pass.
//! A schema object per form turns raw input into a typed value or a
//! [`ValidationErrors`] list suitable for inline display.
//!
//! | Schema | Input | Output |
//! |--------|-------|--------|
//! | [`PassengerSchema`] | [`PassengerEntry`](crate::models::PassengerEntry) | [`Passenger`](crate::models::Passenger) |
//! | [`ContactSchema`] | [`ContactForm`] | [`LeadContact`](crate::models::LeadContact) |
//! | [`PaymentSchema`] | [`PaymentForm`] | [`PaymentSelection`](crate::models::PaymentSelection) |
//! | [`RouteSchema`] | [`RouteForm`] | [`CreateRoute`](crate::params::CreateRoute) |
//! | [`BusSchema`] | [`BusForm`] | [`CreateBus`](crate::params::CreateBus) |
//! | [`LoginSchema`] / [`RegisterSchema`] | account forms | login / register payloads |

use std::{fmt, sync::OnceLock};

use regex::Regex;

pub mod account;
pub mod bus;
pub mod contact;
pub mod passenger;
pub mod payment;
pub mod route;

pub use account::{LoginForm, LoginSchema, RegisterForm, RegisterSchema};
pub use bus::{BusForm, BusSchema};
pub use contact::{ContactForm, ContactSchema};
pub use passenger::PassengerSchema;
pub use payment::{PaymentForm, PaymentSchema};
pub use route::{RouteForm, RouteSchema};

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors of one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// First message reported for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// `Ok(value)` when no error was collected.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Constraint applied to a non-empty field value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// At least this many characters after trimming
    MinLength(usize),
    /// At most this many characters after trimming
    MaxLength(usize),
    /// Syntactically valid e-mail address
    Email,
    /// Case-insensitive member of a fixed label set
    OneOf(&'static [&'static str]),
    /// Digits only (spaces ignored), at least this many
    Digits(usize),
    /// Calendar date in `YYYY-MM-DD`
    Date,
    /// Card expiry in `MM/YY`
    Expiry,
}

impl Rule {
    /// Checks `value` (already trimmed and non-empty) against the rule.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Rule::MinLength(min) => {
                if value.chars().count() >= *min {
                    Ok(())
                } else {
                    Err(format!("Must be at least {min} characters"))
                }
            }
            Rule::MaxLength(max) => {
                if value.chars().count() <= *max {
                    Ok(())
                } else {
                    Err(format!("Must be at most {max} characters"))
                }
            }
            Rule::Email => {
                if is_valid_email(value) {
                    Ok(())
                } else {
                    Err("Enter a valid email address".to_string())
                }
            }
            Rule::OneOf(options) => {
                if options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
                    Ok(())
                } else {
                    Err(format!("Choose one of: {}", options.join(", ")))
                }
            }
            Rule::Digits(min) => {
                let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                if !digits.chars().all(|c| c.is_ascii_digit()) {
                    Err("Use digits only".to_string())
                } else if digits.len() < *min {
                    Err(format!("Must be at least {min} digits"))
                } else {
                    Ok(())
                }
            }
            Rule::Date => value
                .parse::<jiff::civil::Date>()
                .map(|_| ())
                .map_err(|_| "Use YYYY-MM-DD format".to_string()),
            Rule::Expiry => parse_expiry(value)
                .map(|_| ())
                .ok_or_else(|| "Use MM/YY format".to_string()),
        }
    }
}

/// Required flag and rules for one form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            rules: Vec::new(),
        }
    }

    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validates `raw` and returns the first failure message. Optional fields
    /// left blank pass; filled optional fields still have to satisfy the rules.
    pub fn check(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return self.required.then(|| "This field is required".to_string());
        }
        self.rules.iter().find_map(|rule| rule.check(value).err())
    }

    /// Like [`check`](Self::check) but records the failure into `errors`.
    pub fn check_into(&self, raw: &str, errors: &mut ValidationErrors) {
        if let Some(message) = self.check(raw) {
            errors.push(FieldError::new(self.name, message));
        }
    }
}

/// Whether `value` looks like an e-mail address.
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
                .expect("email pattern is valid")
        })
        .is_match(value)
}

/// Parses `MM/YY` into (month, year).
pub fn parse_expiry(value: &str) -> Option<(u8, u8)> {
    let (month, year) = value.trim().split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    let month: u8 = month.parse().ok()?;
    let year: u8 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
