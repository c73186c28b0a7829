//! Registration and login input validation.
//!
//! Store lookups (email uniqueness, email existence) happen in the caller;
//! their outcome is passed in so every field error is reported in one pass.

use inkpost_core::DomainResult;
use inkpost_core::validation::{MAX_STRING_LEN, Validator, is_valid_email};

/// Raw registration input, exactly as received.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Registration input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationRequest {
    /// The normalized email to check for uniqueness, if it is well-formed.
    pub fn candidate_email(&self) -> Option<String> {
        normalized_email(self.email.as_deref())
    }

    pub fn validate(&self, email_taken: bool) -> DomainResult<NewUser> {
        let mut v = Validator::new();

        let name = v.required("name", self.name.as_deref());
        if let Some(name) = name {
            v.max_len("name", name, MAX_STRING_LEN);
        }

        let email = v.required("email", self.email.as_deref());
        if let Some(email) = email {
            if v.email("email", email) && email_taken {
                v.fail("email", "The email has already been taken.");
            }
        }

        // Passwords are taken verbatim; surrounding whitespace is significant.
        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => Some(p),
            _ => {
                v.fail("password", "The password field is required.");
                None
            }
        };
        if let Some(password) = password {
            v.confirmed("password", password, self.password_confirmation.as_deref());
        }

        v.finish()?;

        // All three are present once `finish` succeeds.
        Ok(NewUser {
            name: name.unwrap_or_default().to_string(),
            email: email.map(|e| e.to_lowercase()).unwrap_or_default(),
            password: password.unwrap_or_default().to_string(),
        })
    }
}

/// Raw login input.
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn candidate_email(&self) -> Option<String> {
        normalized_email(self.email.as_deref())
    }

    /// `email_known` reports whether a user with the candidate email exists.
    pub fn validate(&self, email_known: bool) -> DomainResult<ValidLogin> {
        let mut v = Validator::new();

        let email = v.required("email", self.email.as_deref());
        if let Some(email) = email {
            if v.email("email", email) && !email_known {
                v.fail("email", "The selected email is invalid.");
            }
        }

        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => Some(p),
            _ => {
                v.fail("password", "The password field is required.");
                None
            }
        };

        v.finish()?;

        Ok(ValidLogin {
            email: email.map(|e| e.to_lowercase()).unwrap_or_default(),
            password: password.unwrap_or_default().to_string(),
        })
    }
}

fn normalized_email(raw: Option<&str>) -> Option<String> {
    let email = raw?.trim();
    is_valid_email(email).then(|| email.to_lowercase())
}
