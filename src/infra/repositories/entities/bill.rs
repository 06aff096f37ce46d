//! Recurring bills.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use super::parse_stored;
use crate::domain::Bill;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub due_day: i32,
    pub start_month: String,
    pub end_month: Option<String>,
    pub note: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Bill {
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
        Column::StartMonth
    }

    fn from_row(row: Model) -> AppResult<Self> {
        let end_month = match row.end_month {
            Some(raw) => Some(parse_stored(&raw, "bills.end_month")?),
            None => None,
        };
        Ok(Bill {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            category: row.category,
            amount: row.amount,
            due_day: row.due_day,
            start_month: parse_stored(&row.start_month, "bills.start_month")?,
            end_month,
            note: row.note,
            is_active: row.is_active,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            name: Set(self.name.clone()),
            category: Set(self.category.clone()),
            amount: Set(self.amount),
            due_day: Set(self.due_day),
            start_month: Set(self.start_month.to_string()),
            end_month: Set(self.end_month.map(|m| m.to_string())),
            note: Set(self.note.clone()),
            is_active: Set(self.is_active),
        }
    }
}
