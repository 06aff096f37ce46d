//! Bill payment service - Payments and the expense each one generates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::record_service::{ensure_changes, RecordService};
use crate::domain::{Bill, BillPayment, CreateBillPayment, Expense, Record, UpdateBillPayment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};

/// Insert the expense generated by `payment` of `bill`
pub(crate) async fn mirror_bill_payment(
    ctx: &TransactionContext<'_>,
    bill: &Bill,
    payment: &BillPayment,
) -> AppResult<()> {
    let expense =
        Expense::for_bill_payment(payment.user_id, bill.payment_entry(payment), payment.id);
    ctx.records::<Expense>().insert(&expense).await?;
    Ok(())
}

/// Concrete RecordService for bill payments.
pub struct BillPaymentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BillPaymentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RecordService<BillPayment> for BillPaymentManager<U> {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<BillPayment>> {
        self.uow.ledger().bill_payments(user_id).await
    }

    async fn create(&self, user_id: Uuid, mut input: CreateBillPayment) -> AppResult<BillPayment> {
        let payment = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    // A foreign bill is reported like a missing one
                    let bill = ctx
                        .records::<Bill>()
                        .find(user_id, input.bill_id)
                        .await?
                        .ok_or_not_found()?;
                    input.amount_paid = input.amount_paid.or(Some(bill.amount));

                    let payment = BillPayment::create(user_id, input)?;
                    let payment = ctx.records::<BillPayment>().insert(&payment).await?;
                    mirror_bill_payment(&ctx, &bill, &payment).await?;
                    Ok(payment)
                })
            })
            .await?;

        tracing::debug!(payment_id = %payment.id, bill_id = %payment.bill_id, "Bill paid");
        Ok(payment)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: UpdateBillPayment,
    ) -> AppResult<BillPayment> {
        ensure_changes(&changes)?;

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut payment = ctx
                        .records::<BillPayment>()
                        .find(user_id, id)
                        .await?
                        .ok_or_not_found()?;
                    let bill = ctx
                        .records::<Bill>()
                        .find(user_id, payment.bill_id)
                        .await?
                        .ok_or_not_found()?;
                    payment.apply(changes)?;

                    ctx.delete_payment_mirror(user_id, id).await?;
                    let payment = ctx.records::<BillPayment>().update(&payment).await?;
                    mirror_bill_payment(&ctx, &bill, &payment).await?;
                    Ok(payment)
                })
            })
            .await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.delete_payment_mirror(user_id, id).await?;
                    if !ctx.records::<BillPayment>().delete(user_id, id).await? {
                        return Err(AppError::NotFound);
                    }
                    Ok(())
                })
            })
            .await?;

        tracing::debug!(payment_id = %id, "Bill payment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::Value;

    use crate::analytics::testing::{bill, expense, month, payment};
    use crate::infra::repositories::entities::{bill as bill_entity, bill_payment as payment_entity};
    use crate::infra::Persistence;
    use crate::services::testing::{affected, outline, postgres, row, statements, values_of};

    fn internet(user_id: Uuid) -> Bill {
        Bill {
            user_id,
            ..bill("Internet", 10, 350_000, "2024-01", None)
        }
    }

    #[tokio::test]
    async fn test_create_defaults_amount_and_mirrors_expense() {
        let user_id = Uuid::new_v4();
        let bill = internet(user_id);
        let stored = BillPayment {
            user_id,
            ..payment(&bill, "2024-05", 350_000)
        };
        let db = postgres()
            .append_query_results([vec![row(&bill)]])
            .append_query_results([Vec::<payment_entity::Model>::new()])
            .append_query_results([vec![row(&stored)]])
            .append_query_results([vec![row(&expense("2024-05-01", "Bills", 350_000))]])
            .into_connection();
        let service = BillPaymentManager::new(Arc::new(Persistence::new(db.clone())));

        let created = service
            .create(
                user_id,
                CreateBillPayment {
                    bill_id: bill.id,
                    month: month("2024-05"),
                    paid_at: None,
                    amount_paid: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(created, stored);

        let log = statements(db);
        assert_eq!(
            outline(&log),
            [
                "BEGIN",
                "SELECT bills",
                "SELECT bill_payments",
                "INSERT INTO bill_payments",
                "INSERT INTO expenses",
                "COMMIT",
            ]
        );
        let inserted = values_of(&log, r#"INSERT INTO "bill_payments""#);
        assert!(inserted.contains(&Value::from(Decimal::from(350_000))));

        let mirror = values_of(&log, r#"INSERT INTO "expenses""#);
        assert!(mirror.contains(&Value::from(stored.id)));
        assert!(mirror.contains(&Value::from("Bill: Internet")));
    }

    #[tokio::test]
    async fn test_create_for_foreign_bill_is_not_found() {
        let db = postgres()
            .append_query_results([Vec::<bill_entity::Model>::new()])
            .into_connection();
        let service = BillPaymentManager::new(Arc::new(Persistence::new(db.clone())));

        let result = service
            .create(
                Uuid::new_v4(),
                CreateBillPayment {
                    bill_id: Uuid::new_v4(),
                    month: month("2024-05"),
                    paid_at: None,
                    amount_paid: Some(Decimal::from(100)),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
        assert_eq!(outline(&statements(db)), ["BEGIN", "SELECT bills", "ROLLBACK"]);
    }

    #[tokio::test]
    async fn test_update_regenerates_expense() {
        let user_id = Uuid::new_v4();
        let bill = internet(user_id);
        let existing = BillPayment {
            user_id,
            ..payment(&bill, "2024-05", 350_000)
        };
        let updated = BillPayment {
            amount_paid: Decimal::from(300_000),
            ..existing.clone()
        };
        let db = postgres()
            .append_query_results([vec![row(&existing)]])
            .append_query_results([vec![row(&bill)]])
            .append_query_results([Vec::<payment_entity::Model>::new()])
            .append_query_results([vec![row(&updated)]])
            .append_query_results([vec![row(&expense("2024-05-01", "Bills", 300_000))]])
            .append_exec_results([affected(1)])
            .into_connection();
        let service = BillPaymentManager::new(Arc::new(Persistence::new(db.clone())));

        let result = service
            .update(
                user_id,
                existing.id,
                UpdateBillPayment {
                    amount_paid: Some(Decimal::from(300_000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result, updated);

        let log = statements(db);
        assert_eq!(
            outline(&log),
            [
                "BEGIN",
                "SELECT bill_payments",
                "SELECT bills",
                "DELETE FROM expenses",
                "SELECT bill_payments",
                "UPDATE bill_payments",
                "INSERT INTO expenses",
                "COMMIT",
            ]
        );
        let mirror = values_of(&log, r#"INSERT INTO "expenses""#);
        assert!(mirror.contains(&Value::from(existing.id)));
        assert!(mirror.contains(&Value::from(Decimal::from(300_000))));
    }
}
