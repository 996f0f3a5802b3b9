// src/domain/contact/repository.rs
use async_trait::async_trait;

use crate::domain::contact::entity::{Contact, ContactId, ContactStatus, NewContact};
use crate::domain::errors::DomainResult;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, contact: NewContact) -> DomainResult<Contact>;
    async fn update_status(
        &self,
        id: ContactId,
        status: ContactStatus,
        notes: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Contact>;
    async fn delete(&self, id: ContactId) -> DomainResult<()>;

    async fn find_by_id(&self, id: ContactId) -> DomainResult<Option<Contact>>;
    /// Newest-first offset page, optionally filtered by status. Returns the
    /// page and the total match count.
    async fn list(
        &self,
        status: Option<ContactStatus>,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Contact>, i64)>;
}
