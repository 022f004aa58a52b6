//! Login and registration forms.

use serde::{Deserialize, Serialize};

use super::{non_blank, FieldError, FieldSpec, Rule, ValidationErrors};
use crate::params::{Login, Register};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginSchema {
    email: FieldSpec,
    password: FieldSpec,
}

impl Default for LoginSchema {
    fn default() -> Self {
        Self {
            email: FieldSpec::required("email").rule(Rule::Email),
            password: FieldSpec::required("password"),
        }
    }
}

impl LoginSchema {
    pub fn validate(&self, form: &LoginForm) -> Result<Login, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.email.check_into(&form.email, &mut errors);
        self.password.check_into(&form.password, &mut errors);
        errors.into_result(|| Login {
            email: form.email.trim().to_lowercase(),
            password: form.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterSchema {
    first_name: FieldSpec,
    last_name: FieldSpec,
    email: FieldSpec,
    phone: FieldSpec,
    password: FieldSpec,
}

impl Default for RegisterSchema {
    fn default() -> Self {
        Self {
            first_name: FieldSpec::required("firstName").rule(Rule::MinLength(2)),
            last_name: FieldSpec::required("lastName").rule(Rule::MinLength(2)),
            email: FieldSpec::required("email").rule(Rule::Email),
            phone: FieldSpec::optional("phone").rule(Rule::MinLength(10)),
            password: FieldSpec::required("password").rule(Rule::MinLength(8)),
        }
    }
}

impl RegisterSchema {
    pub fn validate(&self, form: &RegisterForm) -> Result<Register, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.first_name.check_into(&form.first_name, &mut errors);
        self.last_name.check_into(&form.last_name, &mut errors);
        self.email.check_into(&form.email, &mut errors);
        self.phone.check_into(&form.phone, &mut errors);
        self.password.check_into(&form.password, &mut errors);
        if form.password != form.confirm_password {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
        errors.into_result(|| Register {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            phone: non_blank(&form.phone),
            password: form.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_normalizes_email() {
        let form = LoginForm {
            email: " Admin@BookAM.ng ".into(),
            password: "secret".into(),
        };
        assert_eq!(LoginSchema::default().validate(&form).unwrap().email, "admin@bookam.ng");
        assert_eq!(
            LoginSchema::default()
                .validate(&LoginForm::default())
                .unwrap_err()
                .len(),
            2
        );
    }

    #[test]
    fn test_register_password_rules() {
        let mut form = RegisterForm {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
        };
        let register = RegisterSchema::default().validate(&form).unwrap();
        assert_eq!(register.phone, None);

        form.confirm_password = "different".into();
        let errors = RegisterSchema::default().validate(&form).unwrap_err();
        assert!(errors.contains("confirmPassword"));

        form.password = "short".into();
        form.confirm_password = "short".into();
        assert!(RegisterSchema::default()
            .validate(&form)
            .unwrap_err()
            .contains("password"));
    }
}
