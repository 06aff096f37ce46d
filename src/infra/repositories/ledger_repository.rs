//! Read access to everything a user owns, for reports and exports.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::resource;
use crate::domain::{Bill, BillPayment, Budget, Expense, Income, MasterData, Saving, SavingsTarget};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn incomes(&self, user_id: Uuid) -> AppResult<Vec<Income>>;
    async fn expenses(&self, user_id: Uuid) -> AppResult<Vec<Expense>>;
    async fn budgets(&self, user_id: Uuid) -> AppResult<Vec<Budget>>;
    async fn savings(&self, user_id: Uuid) -> AppResult<Vec<Saving>>;
    async fn master_data(&self, user_id: Uuid) -> AppResult<Vec<MasterData>>;
    async fn bills(&self, user_id: Uuid) -> AppResult<Vec<Bill>>;
    async fn bill_payments(&self, user_id: Uuid) -> AppResult<Vec<BillPayment>>;
    async fn savings_targets(&self, user_id: Uuid) -> AppResult<Vec<SavingsTarget>>;
}

pub struct LedgerStore {
    db: DatabaseConnection,
}

impl LedgerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerRepository for LedgerStore {
    async fn incomes(&self, user_id: Uuid) -> AppResult<Vec<Income>> {
        resource::list(&self.db, user_id).await
    }

    async fn expenses(&self, user_id: Uuid) -> AppResult<Vec<Expense>> {
        resource::list(&self.db, user_id).await
    }

    async fn budgets(&self, user_id: Uuid) -> AppResult<Vec<Budget>> {
        resource::list(&self.db, user_id).await
    }

    async fn savings(&self, user_id: Uuid) -> AppResult<Vec<Saving>> {
        resource::list(&self.db, user_id).await
    }

    async fn master_data(&self, user_id: Uuid) -> AppResult<Vec<MasterData>> {
        resource::list(&self.db, user_id).await
    }

    async fn bills(&self, user_id: Uuid) -> AppResult<Vec<Bill>> {
        resource::list(&self.db, user_id).await
    }

    async fn bill_payments(&self, user_id: Uuid) -> AppResult<Vec<BillPayment>> {
        resource::list(&self.db, user_id).await
    }

    async fn savings_targets(&self, user_id: Uuid) -> AppResult<Vec<SavingsTarget>> {
        resource::list(&self.db, user_id).await
    }
}
