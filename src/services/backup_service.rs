//! Backup service - Full export and replace-all import of a user's data.

use async_trait::async_trait;
use chrono::Utc;
use futures::try_join;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::bill_payment_service::mirror_bill_payment;
use super::savings_service::mirror_saving;
use crate::config::BACKUP_VERSION;
use crate::domain::{
    Backup, Bill, BillPayment, Budget, Expense, ImportSummary, Income, MasterData, Record, Saving,
    SavingsTarget,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork};

/// Backup service trait for dependency injection.
#[async_trait]
pub trait BackupService: Send + Sync {
    async fn export(&self, user_id: Uuid) -> AppResult<Backup>;

    /// Replace every row the user owns with the backup's content
    async fn import(&self, user_id: Uuid, backup: Backup) -> AppResult<ImportSummary>;
}

/// Rows to write for an import, already re-owned and relinked.
///
/// Mirrored incomes and expenses are not part of the plan; they are
/// regenerated from `savings` and `payments` when the plan is applied.
#[derive(Debug, Default)]
pub(crate) struct RestorePlan {
    pub master_data: Vec<MasterData>,
    pub budgets: Vec<Budget>,
    pub bills: Vec<Bill>,
    pub savings: Vec<Saving>,
    pub payments: Vec<(Bill, BillPayment)>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub targets: Vec<SavingsTarget>,
}

impl RestorePlan {
    /// Give every row a fresh id owned by `user_id`, drop duplicates of
    /// unique keys and relink payments to their restored bills.
    ///
    /// Fails on the first row that breaks a record rule; nothing is
    /// written in that case.
    pub fn build(user_id: Uuid, backup: Backup) -> AppResult<Self> {
        let mut plan = RestorePlan::default();

        let mut seen_values = HashSet::new();
        for entry in backup.master_data {
            if seen_values.insert((entry.kind, entry.value.clone())) {
                let entry = MasterData::new(user_id, entry.kind, entry.value);
                plan.master_data.push(restorable(entry)?);
            }
        }

        let mut seen_budgets = HashSet::new();
        for budget in backup.budgets {
            if seen_budgets.insert((budget.month, budget.category.clone())) {
                plan.budgets.push(restorable(Budget {
                    id: Uuid::new_v4(),
                    user_id,
                    ..budget
                })?);
            }
        }

        let mut bill_ids = HashMap::new();
        for bill in backup.bills {
            let old_id = bill.id;
            let restored = restorable(Bill {
                id: Uuid::new_v4(),
                user_id,
                ..bill
            })?;
            bill_ids.insert(old_id, restored.clone());
            plan.bills.push(restored);
        }

        for saving in backup.savings {
            plan.savings.push(restorable(Saving {
                id: Uuid::new_v4(),
                user_id,
                ..saving
            })?);
        }

        let mut seen_payments = HashSet::new();
        for payment in backup.bill_payments {
            let Some(bill) = bill_ids.get(&payment.bill_id) else {
                tracing::warn!(bill_id = %payment.bill_id, "Skipping payment of unknown bill");
                continue;
            };
            if !seen_payments.insert((bill.id, payment.month)) {
                continue;
            }
            let payment = restorable(BillPayment {
                id: Uuid::new_v4(),
                user_id,
                bill_id: bill.id,
                ..payment
            })?;
            plan.payments.push((bill.clone(), payment));
        }

        for income in backup.incomes {
            if income.saving_id.is_none() {
                plan.incomes.push(restorable(Income {
                    id: Uuid::new_v4(),
                    user_id,
                    ..income
                })?);
            }
        }

        for expense in backup.expenses {
            if !expense.is_mirrored() {
                plan.expenses.push(restorable(Expense {
                    id: Uuid::new_v4(),
                    user_id,
                    ..expense
                })?);
            }
        }

        for target in backup.savings_targets {
            plan.targets.push(restorable(SavingsTarget {
                id: Uuid::new_v4(),
                user_id,
                ..target
            })?);
        }

        Ok(plan)
    }

    fn summary(&self) -> ImportSummary {
        ImportSummary {
            incomes: self.incomes.len(),
            expenses: self.expenses.len(),
            budgets: self.budgets.len(),
            savings: self.savings.len(),
            master_data: self.master_data.len(),
            bills: self.bills.len(),
            bill_payments: self.payments.len(),
            savings_targets: self.targets.len(),
        }
    }
}

/// Pass a backup row through the same rules as a created one
fn restorable<R: Record>(row: R) -> AppResult<R> {
    row.ensure_valid().map_err(|err| match err {
        AppError::Validation(msg) => {
            AppError::validation(format!("Invalid {} in backup: {}", R::NAME.to_lowercase(), msg))
        }
        other => other,
    })?;
    Ok(row)
}

async fn clear(ctx: &TransactionContext<'_>, user_id: Uuid) -> AppResult<()> {
    ctx.records::<Income>().delete_all(user_id).await?;
    ctx.records::<Expense>().delete_all(user_id).await?;
    ctx.records::<BillPayment>().delete_all(user_id).await?;
    ctx.records::<Bill>().delete_all(user_id).await?;
    ctx.records::<Saving>().delete_all(user_id).await?;
    ctx.records::<Budget>().delete_all(user_id).await?;
    ctx.records::<MasterData>().delete_all(user_id).await?;
    ctx.records::<SavingsTarget>().delete_all(user_id).await?;
    Ok(())
}

async fn restore(ctx: &TransactionContext<'_>, plan: &RestorePlan) -> AppResult<()> {
    ctx.records::<MasterData>().insert_many(&plan.master_data).await?;
    ctx.records::<Budget>().insert_many(&plan.budgets).await?;
    ctx.records::<Bill>().insert_many(&plan.bills).await?;

    for saving in &plan.savings {
        ctx.records::<Saving>().insert(saving).await?;
        mirror_saving(ctx, saving).await?;
    }
    for (bill, payment) in &plan.payments {
        ctx.records::<BillPayment>().insert(payment).await?;
        mirror_bill_payment(ctx, bill, payment).await?;
    }

    ctx.records::<Income>().insert_many(&plan.incomes).await?;
    ctx.records::<Expense>().insert_many(&plan.expenses).await?;
    ctx.records::<SavingsTarget>().insert_many(&plan.targets).await?;
    Ok(())
}

/// Concrete implementation of BackupService using Unit of Work.
pub struct BackupManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BackupManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> BackupService for BackupManager<U> {
    async fn export(&self, user_id: Uuid) -> AppResult<Backup> {
        let ledger = self.uow.ledger();
        let (
            incomes,
            expenses,
            budgets,
            savings,
            master_data,
            bills,
            bill_payments,
            savings_targets,
        ) = try_join!(
            ledger.incomes(user_id),
            ledger.expenses(user_id),
            ledger.budgets(user_id),
            ledger.savings(user_id),
            ledger.master_data(user_id),
            ledger.bills(user_id),
            ledger.bill_payments(user_id),
            ledger.savings_targets(user_id),
        )?;

        Ok(Backup {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            incomes,
            expenses,
            budgets,
            savings,
            master_data,
            bills,
            bill_payments,
            savings_targets,
        })
    }

    async fn import(&self, user_id: Uuid, backup: Backup) -> AppResult<ImportSummary> {
        backup.ensure_supported()?;
        let plan = RestorePlan::build(user_id, backup)?;
        let summary = plan.summary();

        self.uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    clear(&ctx, user_id).await?;
                    restore(&ctx, &plan).await
                })
            })
            .await?;

        tracing::info!(user_id = %user_id, ?summary, "Backup imported");
        Ok(summary)
    }
}
