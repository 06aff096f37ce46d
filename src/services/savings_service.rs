//! Savings service - Saving movements and their mirrored rows.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::record_service::{ensure_changes, RecordService};
use crate::domain::{CreateSaving, Expense, Income, Record, Saving, UpdateSaving};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};

/// Insert the expense mirroring a deposit and the income mirroring a withdrawal
pub(crate) async fn mirror_saving(ctx: &TransactionContext<'_>, saving: &Saving) -> AppResult<()> {
    if let Some(entry) = saving.deposit_entry() {
        ctx.records::<Expense>()
            .insert(&Expense::for_saving(saving.user_id, entry, saving.id))
            .await?;
    }
    if let Some(entry) = saving.withdrawal_entry() {
        ctx.records::<Income>()
            .insert(&Income::linked(saving.user_id, entry, saving.id))
            .await?;
    }
    Ok(())
}

/// Concrete RecordService for savings; every write runs in one transaction.
pub struct SavingsManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SavingsManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RecordService<Saving> for SavingsManager<U> {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Saving>> {
        self.uow.ledger().savings(user_id).await
    }

    async fn create(&self, user_id: Uuid, input: CreateSaving) -> AppResult<Saving> {
        let saving = Saving::create(user_id, input)?;

        let saving = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let saving = ctx.records::<Saving>().insert(&saving).await?;
                    mirror_saving(&ctx, &saving).await?;
                    Ok(saving)
                })
            })
            .await?;

        tracing::debug!(saving_id = %saving.id, "Saving created");
        Ok(saving)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, changes: UpdateSaving) -> AppResult<Saving> {
        ensure_changes(&changes)?;

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut saving = ctx
                        .records::<Saving>()
                        .find(user_id, id)
                        .await?
                        .ok_or_not_found()?;
                    saving.apply(changes)?;

                    ctx.delete_saving_mirrors(user_id, id).await?;
                    let saving = ctx.records::<Saving>().update(&saving).await?;
                    mirror_saving(&ctx, &saving).await?;
                    Ok(saving)
                })
            })
            .await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.delete_saving_mirrors(user_id, id).await?;
                    if !ctx.records::<Saving>().delete(user_id, id).await? {
                        return Err(AppError::NotFound);
                    }
                    Ok(())
                })
            })
            .await?;

        tracing::debug!(saving_id = %id, "Saving deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::Value;

    use crate::analytics::testing::{date, expense, income, saving};
    use crate::domain::SavingKind;
    use crate::infra::repositories::entities::saving as saving_entity;
    use crate::infra::Persistence;
    use crate::services::testing::{affected, outline, postgres, row, statements, values_of};

    fn owned(user_id: Uuid, deposit: i64, withdrawal: i64) -> Saving {
        Saving {
            user_id,
            ..saving("2024-05-02", "Emergency fund", deposit, withdrawal)
        }
    }

    #[tokio::test]
    async fn test_create_mirrors_deposit_as_expense() {
        let user_id = Uuid::new_v4();
        let stored = owned(user_id, 500_000, 0);
        let db = postgres()
            .append_query_results([vec![row(&stored)]])
            .append_query_results([vec![row(&expense("2024-05-02", "Savings", 500_000))]])
            .into_connection();
        let service = SavingsManager::new(Arc::new(Persistence::new(db.clone())));

        let created = service
            .create(
                user_id,
                CreateSaving {
                    date: date("2024-05-02"),
                    kind: SavingKind::Savings,
                    account_name: "Emergency fund".to_string(),
                    deposit: Decimal::from(500_000),
                    withdrawal: Decimal::ZERO,
                    note: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(created, stored);

        let log = statements(db);
        assert_eq!(
            outline(&log),
            ["BEGIN", "INSERT INTO savings", "INSERT INTO expenses", "COMMIT"]
        );
        let mirror = values_of(&log, r#"INSERT INTO "expenses""#);
        assert!(mirror.contains(&Value::from(stored.id)));
        assert!(mirror.contains(&Value::from("Deposit Savings - Emergency fund")));
        assert!(mirror.contains(&Value::from(Decimal::from(500_000))));
    }

    #[tokio::test]
    async fn test_update_replaces_mirrors() {
        let user_id = Uuid::new_v4();
        let existing = owned(user_id, 500_000, 0);
        let updated = Saving {
            deposit: Decimal::ZERO,
            withdrawal: Decimal::from(200_000),
            ..existing.clone()
        };
        let db = postgres()
            .append_query_results([vec![row(&existing)]])
            .append_query_results([vec![row(&updated)]])
            .append_query_results([vec![row(&income("2024-05-02", 200_000))]])
            .append_exec_results([affected(0), affected(1)])
            .into_connection();
        let service = SavingsManager::new(Arc::new(Persistence::new(db.clone())));

        let result = service
            .update(
                user_id,
                existing.id,
                UpdateSaving {
                    deposit: Some(Decimal::ZERO),
                    withdrawal: Some(Decimal::from(200_000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result, updated);

        // old mirrors go before the saving changes; the withdrawal comes back as an income
        let log = statements(db);
        assert_eq!(
            outline(&log),
            [
                "BEGIN",
                "SELECT savings",
                "DELETE FROM incomes",
                "DELETE FROM expenses",
                "UPDATE savings",
                "INSERT INTO incomes",
                "COMMIT",
            ]
        );
        let mirror = values_of(&log, r#"INSERT INTO "incomes""#);
        assert!(mirror.contains(&Value::from(existing.id)));
        assert!(mirror.contains(&Value::from("Withdrawal Savings - Emergency fund")));
    }

    #[tokio::test]
    async fn test_update_of_foreign_saving_is_not_found() {
        let db = postgres()
            .append_query_results([Vec::<saving_entity::Model>::new()])
            .into_connection();
        let service = SavingsManager::new(Arc::new(Persistence::new(db.clone())));

        let result = service
            .update(
                Uuid::new_v4(),
                Uuid::new_v4(),
                UpdateSaving {
                    deposit: Some(Decimal::ONE),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
        assert_eq!(
            outline(&statements(db)),
            ["BEGIN", "SELECT savings", "ROLLBACK"]
        );
    }

    #[tokio::test]
    async fn test_delete_of_missing_saving_rolls_back() {
        let db = postgres()
            .append_exec_results([affected(0), affected(0), affected(0)])
            .into_connection();
        let service = SavingsManager::new(Arc::new(Persistence::new(db.clone())));

        let result = service.delete(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
        assert_eq!(
            outline(&statements(db)),
            [
                "BEGIN",
                "DELETE FROM incomes",
                "DELETE FROM expenses",
                "DELETE FROM savings",
                "ROLLBACK",
            ]
        );
    }
}
