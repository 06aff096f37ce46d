//! Unit of Work pattern implementation.
//!
//! Manages transaction lifecycle and repository access. Operations that
//! touch more than one table (savings and their mirrored income/expense
//! rows, bill payments and their expense, registration with default
//! master data, backup import) run through a single transaction here.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::user::{
    self, ActiveModel as UserActiveModel, Entity as UserEntity,
};
use super::repositories::entities::{expense, income};
use super::repositories::resource;
use super::repositories::{LedgerRepository, LedgerStore, Resource, UserRepository, UserStore};
use crate::domain::{Expense, Income, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, implement it over mock repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Read access to every table a user owns
    fn ledger(&self) -> Arc<dyn LedgerRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    /// Get the repository of one record type for this transaction
    pub fn records<R: Resource>(&self) -> TxRecords<'_, R> {
        TxRecords {
            txn: self.txn,
            _record: PhantomData,
        }
    }

    /// Delete the income and expense rows generated by a saving
    pub async fn delete_saving_mirrors(&self, user_id: Uuid, saving_id: Uuid) -> AppResult<u64> {
        let incomes = resource::delete_where::<Income, _>(
            self.txn,
            user_id,
            Condition::all().add(income::Column::SavingId.eq(saving_id)),
        )
        .await?;
        let expenses = resource::delete_where::<Expense, _>(
            self.txn,
            user_id,
            Condition::all().add(expense::Column::SavingId.eq(saving_id)),
        )
        .await?;
        Ok(incomes + expenses)
    }

    /// Delete the expense row generated by a bill payment
    pub async fn delete_payment_mirror(&self, user_id: Uuid, payment_id: Uuid) -> AppResult<u64> {
        resource::delete_where::<Expense, _>(
            self.txn,
            user_id,
            Condition::all().add(expense::Column::BillPaymentId.eq(payment_id)),
        )
        .await
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    ledger_repo: Arc<LedgerStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let ledger_repo = Arc::new(LedgerStore::new(db.clone()));
        Self {
            db,
            user_repo,
            ledger_repo,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn ledger(&self) -> Arc<dyn LedgerRepository> {
        self.ledger_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    pub async fn create(&self, user: User) -> AppResult<User> {
        let model = UserActiveModel::from(&user)
            .insert(self.txn)
            .await
            .map_err(|err| match err.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::conflict("Username")
                }
                _ => AppError::from(err),
            })?;

        Ok(User::from(model))
    }
}

/// Transaction-aware repository of one record type.
pub struct TxRecords<'a, R> {
    txn: &'a DatabaseTransaction,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> TxRecords<'a, R> {
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<R>> {
        resource::list(self.txn, user_id).await
    }

    pub async fn find(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<R>> {
        resource::find(self.txn, user_id, id).await
    }

    pub async fn insert(&self, record: &R) -> AppResult<R> {
        resource::insert(self.txn, record).await
    }

    pub async fn insert_many(&self, records: &[R]) -> AppResult<()> {
        resource::insert_many(self.txn, records).await
    }

    pub async fn update(&self, record: &R) -> AppResult<R> {
        resource::update(self.txn, record).await
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        resource::delete::<R, _>(self.txn, user_id, id).await
    }

    pub async fn delete_all(&self, user_id: Uuid) -> AppResult<u64> {
        resource::delete_all::<R, _>(self.txn, user_id).await
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
