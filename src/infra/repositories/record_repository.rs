//! CRUD repository shared by every user-owned record.

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::resource::{self, Resource};
use crate::domain::Record;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Record repository trait for dependency injection.
///
/// All lookups are scoped to the owning user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordRepository<R: Record>: Send + Sync {
    /// Rows of a user, newest first
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<R>>;

    async fn find(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<R>>;

    /// Insert a new row; `Conflict` when a unique key clashes
    async fn insert(&self, record: R) -> AppResult<R>;

    /// Persist every column of an existing row
    async fn update(&self, record: R) -> AppResult<R>;

    /// Delete an owned row; false when nothing matched
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// SeaORM implementation of RecordRepository
pub struct RecordStore<R> {
    db: DatabaseConnection,
    _record: PhantomData<fn() -> R>,
}

impl<R> RecordStore<R> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> RecordRepository<R> for RecordStore<R> {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<R>> {
        resource::list(&self.db, user_id).await
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<R>> {
        resource::find(&self.db, user_id, id).await
    }

    async fn insert(&self, record: R) -> AppResult<R> {
        resource::insert(&self.db, &record).await
    }

    async fn update(&self, record: R) -> AppResult<R> {
        resource::update(&self.db, &record).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        resource::delete::<R, _>(&self.db, user_id, id).await
    }
}
