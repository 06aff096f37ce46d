//! Bill payments, one per bill and month.

use sea_orm::entity::prelude::*;
use sea_orm::{Condition, Set};

use super::parse_stored;
use crate::domain::BillPayment;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bill_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub bill_id: Uuid,
    pub month: String,
    pub paid_at: DateTimeUtc,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount_paid: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for BillPayment {
    type Entity = Entity;
    type Row = Model;
    type Active = ActiveModel;

    fn owner(&self) -> Uuid {
        self.user_id
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn user_column() -> Column {
        Column::UserId
    }

    fn order_column() -> Column {
        Column::PaidAt
    }

    fn from_row(row: Model) -> AppResult<Self> {
        Ok(BillPayment {
            id: row.id,
            user_id: row.user_id,
            bill_id: row.bill_id,
            month: parse_stored(&row.month, "bill_payments.month")?,
            paid_at: row.paid_at,
            amount_paid: row.amount_paid,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            bill_id: Set(self.bill_id),
            month: Set(self.month.to_string()),
            paid_at: Set(self.paid_at),
            amount_paid: Set(self.amount_paid),
        }
    }

    fn unique_key(&self) -> Option<Condition> {
        Some(
            Condition::all()
                .add(Column::BillId.eq(self.bill_id))
                .add(Column::Month.eq(self.month.to_string())),
        )
    }
}
