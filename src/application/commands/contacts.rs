// src/application/commands/contacts.rs
use std::sync::Arc;

use crate::application::dto::ContactDto;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::contact::{
    ContactEmail, ContactId, ContactPhone, ContactRepository, ContactStatus, NewContact,
};
use crate::domain::school::{SchoolId, SchoolRepository};

pub struct SubmitContactCommand {
    pub school_id: Option<i64>,
    pub school_name: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

pub struct UpdateContactCommand {
    pub status: String,
    pub notes: Option<String>,
}

pub struct ContactCommandService {
    contacts: Arc<dyn ContactRepository>,
    schools: Arc<dyn SchoolRepository>,
    clock: Arc<dyn Clock>,
}

impl ContactCommandService {
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        schools: Arc<dyn SchoolRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contacts,
            schools,
            clock,
        }
    }

    pub async fn submit(&self, command: SubmitContactCommand) -> ApplicationResult<ContactDto> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(ApplicationError::validation("name is required"));
        }
        let message = command.message.trim().to_string();
        if message.is_empty() {
            return Err(ApplicationError::validation("message is required"));
        }
        let email = ContactEmail::new(command.email)?;
        let phone = command.phone.map(ContactPhone::new).transpose()?;

        // The school name is snapshotted at submission time so the lead
        // survives renames and deletions of the school.
        let (school_id, school_name) = match command.school_id {
            Some(raw) => {
                let id = SchoolId::new(raw)?;
                let school = self.schools.find_by_id(id).await?.ok_or_else(|| {
                    ApplicationError::not_found(format!("school {} not found", id.0))
                })?;
                (Some(school.id), String::from(school.name))
            }
            None => {
                let snapshot = command
                    .school_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        ApplicationError::validation("school_id or school_name is required")
                    })?;
                (None, snapshot)
            }
        };

        let now = self.clock.now();
        let created = self
            .contacts
            .insert(NewContact {
                school_id,
                school_name,
                name,
                email,
                phone,
                message,
                status: ContactStatus::New,
                created_at: now,
                updated_at: now,
            })
            .await?;
        Ok(created.into())
    }

    pub async fn update(&self, id: i64, command: UpdateContactCommand) -> ApplicationResult<ContactDto> {
        let id = ContactId::new(id)?;
        let status = ContactStatus::parse(&command.status)?;
        let updated = self
            .contacts
            .update_status(id, status, command.notes, self.clock.now())
            .await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> ApplicationResult<()> {
        let id = ContactId::new(id)?;
        self.contacts.delete(id).await?;
        Ok(())
    }
}
