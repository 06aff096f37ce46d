//! Generic CRUD over user-owned records.
//!
//! Used for every record type whose writes touch a single table. Savings
//! and bill payments have their own services because each write also
//! regenerates mirrored income/expense rows.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Changeset, Record};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::RecordRepository;

/// CRUD operations on one record type, scoped to the owning user.
#[async_trait]
pub trait RecordService<R: Record>: Send + Sync {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<R>>;

    async fn create(&self, user_id: Uuid, input: R::Create) -> AppResult<R>;

    async fn update(&self, user_id: Uuid, id: Uuid, changes: R::Update) -> AppResult<R>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Reject an empty changeset before touching storage
pub(crate) fn ensure_changes<C: Changeset>(changes: &C) -> AppResult<()> {
    if changes.is_empty() {
        return Err(AppError::bad_request("No valid fields to update"));
    }
    Ok(())
}

/// Mirrored rows may only change through the record that generated them
pub(crate) fn ensure_unmanaged<R: Record>(record: &R) -> AppResult<()> {
    match record.managed_by() {
        Some(owner) => Err(AppError::managed(R::NAME, owner)),
        None => Ok(()),
    }
}

/// Concrete implementation of RecordService over a single repository.
pub struct RecordManager<R: Record> {
    repo: Arc<dyn RecordRepository<R>>,
}

impl<R: Record> RecordManager<R> {
    pub fn new(repo: Arc<dyn RecordRepository<R>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: Record> RecordService<R> for RecordManager<R> {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<R>> {
        self.repo.list(user_id).await
    }

    async fn create(&self, user_id: Uuid, input: R::Create) -> AppResult<R> {
        let record = R::create(user_id, input)?;
        let record = self.repo.insert(record).await?;
        tracing::debug!(record = R::NAME, id = %record.id(), "Record created");
        Ok(record)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, changes: R::Update) -> AppResult<R> {
        ensure_changes(&changes)?;

        let mut record = self.repo.find(user_id, id).await?.ok_or_not_found()?;
        ensure_unmanaged(&record)?;

        record.apply(changes)?;
        self.repo.update(record).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let record = self.repo.find(user_id, id).await?.ok_or_not_found()?;
        ensure_unmanaged(&record)?;

        if !self.repo.delete(user_id, id).await? {
            return Err(AppError::NotFound);
        }
        tracing::debug!(record = R::NAME, id = %id, "Record deleted");
        Ok(())
    }
}
