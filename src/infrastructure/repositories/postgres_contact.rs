// src/infrastructure/repositories/postgres_contact.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_sqlx;
use crate::domain::contact::{
    Contact, ContactEmail, ContactId, ContactPhone, ContactRepository, ContactStatus, NewContact,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::school::SchoolId;

const COLUMNS: &str = "id, school_id, school_name, name, email, phone, message, status, notes, \
                       created_at, updated_at";

#[derive(Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactRow {
    id: i64,
    school_id: Option<i64>,
    school_name: String,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = DomainError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(Contact {
            id: ContactId::new(row.id)?,
            school_id: row.school_id.map(SchoolId::new).transpose()?,
            school_name: row.school_name,
            name: row.name,
            email: ContactEmail::new(row.email)?,
            phone: row.phone.map(ContactPhone::new).transpose()?,
            message: row.message,
            status: ContactStatus::parse(&row.status)?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn insert(&self, contact: NewContact) -> DomainResult<Contact> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "INSERT INTO contacts
                 (school_id, school_name, name, email, phone, message, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        ))
        .bind(contact.school_id.map(i64::from))
        .bind(&contact.school_name)
        .bind(&contact.name)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_ref().map(ContactPhone::as_str))
        .bind(&contact.message)
        .bind(contact.status.as_str())
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Contact::try_from(row)
    }

    async fn update_status(
        &self,
        id: ContactId,
        status: ContactStatus,
        notes: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Contact> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "UPDATE contacts
             SET status = $2, notes = COALESCE($3, notes), updated_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(status.as_str())
        .bind(notes)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("contact not found".into()))?;

        Contact::try_from(row)
    }

    async fn delete(&self, id: ContactId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("contact not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ContactId) -> DomainResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {COLUMNS} FROM contacts WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Contact::try_from).transpose()
    }

    async fn list(
        &self,
        status: Option<ContactStatus>,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Contact>, i64)> {
        let status = status.map(ContactStatus::as_str);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contacts WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {COLUMNS} FROM contacts
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let contacts = rows
            .into_iter()
            .map(Contact::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((contacts, total))
    }
}
