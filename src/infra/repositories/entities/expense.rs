//! Expense rows.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use super::parse_stored;
use crate::domain::Expense;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub month: String,
    pub name: String,
    pub category: String,
    pub method: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub note: Option<String>,
    pub bill_payment_id: Option<Uuid>,
    pub saving_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Expense {
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
        Column::Date
    }

    fn from_row(row: Model) -> AppResult<Self> {
        Ok(Expense {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            month: parse_stored(&row.month, "expenses.month")?,
            name: row.name,
            category: row.category,
            method: row.method,
            amount: row.amount,
            note: row.note,
            bill_payment_id: row.bill_payment_id,
            saving_id: row.saving_id,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            date: Set(self.date),
            month: Set(self.month.to_string()),
            name: Set(self.name.clone()),
            category: Set(self.category.clone()),
            method: Set(self.method.clone()),
            amount: Set(self.amount),
            note: Set(self.note.clone()),
            bill_payment_id: Set(self.bill_payment_id),
            saving_id: Set(self.saving_id),
        }
    }
}
