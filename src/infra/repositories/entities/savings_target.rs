//! Savings goals tied to a savings account name.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::SavingsTarget;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_targets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub target_amount: Decimal,
    pub start_date: Date,
    pub target_date: Date,
    pub account_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for SavingsTarget {
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
        Column::TargetDate
    }

    fn from_row(row: Model) -> AppResult<Self> {
        Ok(SavingsTarget {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            target_amount: row.target_amount,
            start_date: row.start_date,
            target_date: row.target_date,
            account_name: row.account_name,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            name: Set(self.name.clone()),
            target_amount: Set(self.target_amount),
            start_date: Set(self.start_date),
            target_date: Set(self.target_date),
            account_name: Set(self.account_name.clone()),
        }
    }
}
