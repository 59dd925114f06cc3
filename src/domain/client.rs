use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Domain representation of a client that buys products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    /// Unique identifier of the client.
    pub id: i32,
    /// Human-friendly display name of the client.
    pub name: String,
    /// Email address stored in lowercase; unique across all clients.
    pub email: String,
    /// Calendar date of birth.
    pub birth_date: NaiveDate,
}

/// Payload required to insert a new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl NewClient {
    /// Build a new client payload while normalising the email to lowercase.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            email: email.into().trim().to_lowercase(),
            birth_date,
        }
    }
}

/// Full replacement of the editable client fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateClient {
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl From<NewClient> for UpdateClient {
    fn from(value: NewClient) -> Self {
        Self {
            name: value.name,
            email: value.email,
            birth_date: value.birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_normalises_email() {
        let birth_date = NaiveDate::from_ymd_opt(1990, 5, 17).expect("valid date");
        let client = NewClient::new("Ana", "  Ana.Silva@Example.COM ", birth_date);

        assert_eq!(client.email, "ana.silva@example.com");
        assert_eq!(client.name, "Ana");
    }
}
