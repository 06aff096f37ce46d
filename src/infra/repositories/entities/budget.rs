//! Monthly budget per expense category.

use sea_orm::entity::prelude::*;
use sea_orm::{Condition, Set};

use super::parse_stored;
use crate::domain::Budget;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub month: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Budget {
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
        Column::Month
    }

    fn from_row(row: Model) -> AppResult<Self> {
        Ok(Budget {
            id: row.id,
            user_id: row.user_id,
            month: parse_stored(&row.month, "budgets.month")?,
            category: row.category,
            amount: row.amount,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            month: Set(self.month.to_string()),
            category: Set(self.category.clone()),
            amount: Set(self.amount),
        }
    }

    /// One budget per category and month
    fn unique_key(&self) -> Option<Condition> {
        Some(
            Condition::all()
                .add(Column::Month.eq(self.month.to_string()))
                .add(Column::Category.eq(self.category.clone())),
        )
    }
}
