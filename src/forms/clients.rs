use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::client::{NewClient, UpdateClient};
use crate::forms::{parse_iso_date, sanitize_inline_text};

/// Maximum allowed length for a client name.
const NAME_MAX_LEN: usize = 255;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length of an email address (RFC 5321).
const EMAIL_MAX_LEN_VALIDATOR: u64 = 254;

/// Result type returned by the client form helpers.
pub type ClientFormResult<T> = Result<T, ClientFormError>;

/// Errors that can occur while processing client forms.
#[derive(Debug, Error)]
pub enum ClientFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("client name cannot be empty")]
    EmptyName,
    /// The birth date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid birth date `{value}`")]
    InvalidBirthDate { value: String },
}

/// Form payload emitted by the create and edit client screens.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ClientForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Contact email; must be unique among clients.
    #[validate(email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub email: String,
    /// Birth date as `YYYY-MM-DD`.
    pub birth_date: String,
}

impl ClientForm {
    /// Validates and sanitizes the payload into a domain `NewClient`.
    pub fn into_new_client(mut self) -> ClientFormResult<NewClient> {
        self.email = self.email.trim().to_string();
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ClientFormError::EmptyName);
        }

        let raw_date = self.birth_date.trim();
        let birth_date =
            parse_iso_date(raw_date).ok_or_else(|| ClientFormError::InvalidBirthDate {
                value: raw_date.to_string(),
            })?;

        Ok(NewClient::new(sanitized_name, self.email, birth_date))
    }

    /// Validates and sanitizes the payload into a domain `UpdateClient`.
    pub fn into_update_client(self) -> ClientFormResult<UpdateClient> {
        self.into_new_client().map(UpdateClient::from)
    }
}
