// src/domain/contact/entity.rs
use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::school::SchoolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub i64);

impl ContactId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("contact id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ContactId> for i64 {
    fn from(value: ContactId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    New,
    Contacted,
    Closed,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "closed" => Ok(Self::Closed),
            other => Err(DomainError::Validation(format!(
                "unknown contact status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let at = trimmed.find('@');
        let well_formed = match at {
            Some(pos) => {
                pos > 0
                    && trimmed[pos + 1..].contains('.')
                    && !trimmed.contains(char::is_whitespace)
            }
            None => false,
        };
        if !well_formed {
            return Err(DomainError::Validation(format!(
                "malformed email address: {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ContactEmail> for String {
    fn from(value: ContactEmail) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPhone(String);

impl ContactPhone {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let digits = trimmed.chars().filter(char::is_ascii_digit).count();
        let allowed = trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
        if digits < 6 || !allowed {
            return Err(DomainError::Validation(format!(
                "malformed phone number: {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ContactPhone> for String {
    fn from(value: ContactPhone) -> Self {
        value.0
    }
}

/// A lead submitted from a school page. `school_name` is a snapshot taken at
/// submission time, so the lead stays readable even if the school is later
/// renamed or deleted.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: ContactId,
    pub school_id: Option<SchoolId>,
    pub school_name: String,
    pub name: String,
    pub email: ContactEmail,
    pub phone: Option<ContactPhone>,
    pub message: String,
    pub status: ContactStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub school_id: Option<SchoolId>,
    pub school_name: String,
    pub name: String,
    pub email: ContactEmail,
    pub phone: Option<ContactPhone>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_is_checked() {
        assert!(ContactEmail::new("ana@example.com").is_ok());
        assert!(ContactEmail::new("no-at-sign").is_err());
        assert!(ContactEmail::new("@example.com").is_err());
        assert!(ContactEmail::new("ana@nodot").is_err());
        assert!(ContactEmail::new("a na@example.com").is_err());
    }

    #[test]
    fn phone_shape_is_checked() {
        assert!(ContactPhone::new("+54 9 351 123-4567").is_ok());
        assert!(ContactPhone::new("12345").is_err());
        assert!(ContactPhone::new("call me maybe").is_err());
    }

    #[test]
    fn status_round_trips_known_values() {
        for status in [
            ContactStatus::New,
            ContactStatus::Contacted,
            ContactStatus::Closed,
        ] {
            assert_eq!(ContactStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(ContactStatus::parse("archived").is_err());
    }
}
