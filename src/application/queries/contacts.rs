// src/application/queries/contacts.rs
use std::sync::Arc;

use crate::application::dto::{ContactDto, Page, PageRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::contact::{ContactId, ContactRepository, ContactStatus};

pub struct ContactQueryService {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactQueryService {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> ApplicationResult<Page<ContactDto>> {
        let status = status.map(ContactStatus::parse).transpose()?;
        let (contacts, total) = self
            .contacts
            .list(status, page.limit(), page.offset())
            .await?;
        let items = contacts.into_iter().map(Into::into).collect();
        Ok(Page::new(items, total, &page))
    }

    pub async fn get(&self, id: i64) -> ApplicationResult<ContactDto> {
        let id = ContactId::new(id)?;
        self.contacts
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("contact {} not found", id.0)))
    }
}
