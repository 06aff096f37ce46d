//! Service Container - Centralized service access.
//!
//! Handlers depend on the `ServiceContainer` trait, never on concrete
//! services, so tests can swap any service for a hand-written mock.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BackupManager, BackupService, BillPaymentManager, RecordManager,
    RecordService, ReportAnalyst, ReportService, SavingsManager, UserManager, UserService,
};
use crate::config::Config;
use crate::domain::{Bill, BillPayment, Budget, Expense, Income, MasterData, Saving, SavingsTarget};
use crate::infra::{Persistence, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn incomes(&self) -> Arc<dyn RecordService<Income>>;

    fn expenses(&self) -> Arc<dyn RecordService<Expense>>;

    fn budgets(&self) -> Arc<dyn RecordService<Budget>>;

    /// Savings; writes also regenerate mirrored incomes and expenses
    fn savings(&self) -> Arc<dyn RecordService<Saving>>;

    fn master_data(&self) -> Arc<dyn RecordService<MasterData>>;

    fn bills(&self) -> Arc<dyn RecordService<Bill>>;

    /// Bill payments; writes also regenerate the payment's expense
    fn bill_payments(&self) -> Arc<dyn RecordService<BillPayment>>;

    fn savings_targets(&self) -> Arc<dyn RecordService<SavingsTarget>>;

    fn reports(&self) -> Arc<dyn ReportService>;

    fn backup(&self) -> Arc<dyn BackupService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    income_service: Arc<dyn RecordService<Income>>,
    expense_service: Arc<dyn RecordService<Expense>>,
    budget_service: Arc<dyn RecordService<Budget>>,
    saving_service: Arc<dyn RecordService<Saving>>,
    master_data_service: Arc<dyn RecordService<MasterData>>,
    bill_service: Arc<dyn RecordService<Bill>>,
    bill_payment_service: Arc<dyn RecordService<BillPayment>>,
    savings_target_service: Arc<dyn RecordService<SavingsTarget>>,
    report_service: Arc<dyn ReportService>,
    backup_service: Arc<dyn BackupService>,
}

fn records<R>(db: &sea_orm::DatabaseConnection) -> Arc<dyn RecordService<R>>
where
    R: crate::infra::Resource,
{
    Arc::new(RecordManager::new(Arc::new(RecordStore::<R>::new(db.clone()))))
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db.clone()));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            income_service: records::<Income>(&db),
            expense_service: records::<Expense>(&db),
            budget_service: records::<Budget>(&db),
            saving_service: Arc::new(SavingsManager::new(uow.clone())),
            master_data_service: records::<MasterData>(&db),
            bill_service: records::<Bill>(&db),
            bill_payment_service: Arc::new(BillPaymentManager::new(uow.clone())),
            savings_target_service: records::<SavingsTarget>(&db),
            report_service: Arc::new(ReportAnalyst::new(uow.clone())),
            backup_service: Arc::new(BackupManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn incomes(&self) -> Arc<dyn RecordService<Income>> {
        self.income_service.clone()
    }

    fn expenses(&self) -> Arc<dyn RecordService<Expense>> {
        self.expense_service.clone()
    }

    fn budgets(&self) -> Arc<dyn RecordService<Budget>> {
        self.budget_service.clone()
    }

    fn savings(&self) -> Arc<dyn RecordService<Saving>> {
        self.saving_service.clone()
    }

    fn master_data(&self) -> Arc<dyn RecordService<MasterData>> {
        self.master_data_service.clone()
    }

    fn bills(&self) -> Arc<dyn RecordService<Bill>> {
        self.bill_service.clone()
    }

    fn bill_payments(&self) -> Arc<dyn RecordService<BillPayment>> {
        self.bill_payment_service.clone()
    }

    fn savings_targets(&self) -> Arc<dyn RecordService<SavingsTarget>> {
        self.savings_target_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }

    fn backup(&self) -> Arc<dyn BackupService> {
        self.backup_service.clone()
    }
}
