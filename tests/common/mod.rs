//! Shared fixtures for service tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use finance_tracker::domain::{
    Budget, CreateBudget, CreateExpense, CreateIncome, Expense, Income, Record,
};
use finance_tracker::errors::{AppError, AppResult};
use finance_tracker::infra::{
    LedgerRepository, MockLedgerRepository, MockUserRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

/// Unit of Work over mock repositories.
///
/// Transactions need a live database, so they fail here; `transactions`
/// counts how many were attempted.
pub struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    ledger_repo: Arc<MockLedgerRepository>,
    pub transactions: AtomicUsize,
}

impl TestUnitOfWork {
    pub fn new(user_repo: MockUserRepository, ledger_repo: MockLedgerRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            ledger_repo: Arc::new(ledger_repo),
            transactions: AtomicUsize::new(0),
        }
    }

    pub fn with_users(user_repo: MockUserRepository) -> Self {
        Self::new(user_repo, MockLedgerRepository::new())
    }

    pub fn with_ledger(ledger_repo: MockLedgerRepository) -> Self {
        Self::new(MockUserRepository::new(), ledger_repo)
    }

    pub fn attempted_transactions(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn ledger(&self) -> Arc<dyn LedgerRepository> {
        self.ledger_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.transactions.fetch_add(1, Ordering::SeqCst);
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.transactions.fetch_add(1, Ordering::SeqCst);
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn income(user_id: Uuid, on: &str, category: &str, amount: i64) -> Income {
    Income::create(
        user_id,
        CreateIncome {
            date: date(on),
            month: None,
            source: category.to_string(),
            category: category.to_string(),
            method: "Transfer".to_string(),
            amount: Decimal::from(amount),
            note: None,
        },
    )
    .unwrap()
}

pub fn expense(user_id: Uuid, on: &str, category: &str, amount: i64) -> Expense {
    Expense::create(
        user_id,
        CreateExpense {
            date: date(on),
            month: None,
            name: category.to_string(),
            category: category.to_string(),
            method: "Debit".to_string(),
            amount: Decimal::from(amount),
            note: None,
        },
    )
    .unwrap()
}

pub fn budget(user_id: Uuid, month: &str, category: &str, amount: i64) -> Budget {
    Budget::create(
        user_id,
        CreateBudget {
            month: month.parse().unwrap(),
            category: category.to_string(),
            amount: Decimal::from(amount),
        },
    )
    .unwrap()
}
