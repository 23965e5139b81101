//! Authentication request types.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = "patient";

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl RegisterRequest {
    /// Builds a patient registration from a single full-name field.
    ///
    /// The first word becomes the first name and the remaining words the last
    /// name. A single-word name is used for both.
    pub fn from_full_name(
        full_name: &str,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let email: String = email.into();
        let mut words = full_name.split_whitespace();
        let first_name = words.next().unwrap_or_default().to_owned();
        let rest = words.collect::<Vec<_>>().join(" ");
        let last_name = if rest.is_empty() {
            first_name.clone()
        } else {
            rest
        };

        Self {
            email: email.trim().to_owned(),
            password: password.into(),
            first_name,
            last_name,
            role: Some(DEFAULT_ROLE.to_owned()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    #[must_use]
    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Checks the fields the signup form requires before submitting.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error with code 400 when the email or a name
    /// is blank, or the password is shorter than [`MIN_PASSWORD_LEN`].
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::invalid_input().with_message("Email is required"));
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::invalid_input().with_message("Full name is required"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::invalid_input().with_message(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        Ok(())
    }
}
