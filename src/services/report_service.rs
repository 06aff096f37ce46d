//! Report service - Loads a user's rows and runs the report calculations.

use async_trait::async_trait;
use chrono::Utc;
use futures::try_join;
use std::sync::Arc;
use uuid::Uuid;

use crate::analytics::{
    bill_schedule, expense_heatmap, expense_insights, health_score, realize_budgets, summarize,
    target_progress, BillSchedule, BudgetReport, ExpenseHeatmap, ExpenseInsights, HealthReport,
    Summary, TargetsReport,
};
use crate::domain::{Month, Period};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    async fn summary(&self, user_id: Uuid, period: Period) -> AppResult<Summary>;

    async fn budgets(&self, user_id: Uuid, month: Month) -> AppResult<BudgetReport>;

    async fn insights(&self, user_id: Uuid, period: Period) -> AppResult<ExpenseInsights>;

    async fn heatmap(&self, user_id: Uuid, month: Month) -> AppResult<ExpenseHeatmap>;

    async fn health(&self, user_id: Uuid, month: Month) -> AppResult<HealthReport>;

    async fn bills(&self, user_id: Uuid, month: Month) -> AppResult<BillSchedule>;

    async fn targets(&self, user_id: Uuid) -> AppResult<TargetsReport>;
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct ReportAnalyst<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportAnalyst<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportAnalyst<U> {
    async fn summary(&self, user_id: Uuid, period: Period) -> AppResult<Summary> {
        let ledger = self.uow.ledger();
        let (incomes, expenses, savings) = try_join!(
            ledger.incomes(user_id),
            ledger.expenses(user_id),
            ledger.savings(user_id),
        )?;

        Ok(summarize(period, &incomes, &expenses, &savings))
    }

    async fn budgets(&self, user_id: Uuid, month: Month) -> AppResult<BudgetReport> {
        let ledger = self.uow.ledger();
        let (budgets, expenses) = try_join!(ledger.budgets(user_id), ledger.expenses(user_id))?;

        Ok(realize_budgets(month, &budgets, &expenses))
    }

    async fn insights(&self, user_id: Uuid, period: Period) -> AppResult<ExpenseInsights> {
        let expenses = self.uow.ledger().expenses(user_id).await?;
        Ok(expense_insights(period, &expenses))
    }

    async fn heatmap(&self, user_id: Uuid, month: Month) -> AppResult<ExpenseHeatmap> {
        let expenses = self.uow.ledger().expenses(user_id).await?;
        Ok(expense_heatmap(month, &expenses))
    }

    async fn health(&self, user_id: Uuid, month: Month) -> AppResult<HealthReport> {
        let ledger = self.uow.ledger();
        let (incomes, expenses, savings, budgets) = try_join!(
            ledger.incomes(user_id),
            ledger.expenses(user_id),
            ledger.savings(user_id),
            ledger.budgets(user_id),
        )?;

        Ok(health_score(month, &incomes, &expenses, &savings, &budgets))
    }

    async fn bills(&self, user_id: Uuid, month: Month) -> AppResult<BillSchedule> {
        let ledger = self.uow.ledger();
        let (bills, payments) = try_join!(ledger.bills(user_id), ledger.bill_payments(user_id))?;

        Ok(bill_schedule(month, &bills, &payments, Utc::now().date_naive()))
    }

    async fn targets(&self, user_id: Uuid) -> AppResult<TargetsReport> {
        let ledger = self.uow.ledger();
        let (targets, savings) =
            try_join!(ledger.savings_targets(user_id), ledger.savings(user_id))?;

        Ok(target_progress(&targets, &savings, Utc::now().date_naive()))
    }
}
