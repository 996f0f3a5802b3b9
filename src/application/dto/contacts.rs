// src/application/dto/contacts.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::contact::Contact;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    pub id: i64,
    pub school_id: Option<i64>,
    pub school_name: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.into(),
            school_id: contact.school_id.map(Into::into),
            school_name: contact.school_name,
            name: contact.name,
            email: contact.email.into(),
            phone: contact.phone.map(Into::into),
            message: contact.message,
            status: contact.status.as_str().to_string(),
            notes: contact.notes,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}
