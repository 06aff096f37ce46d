//! Savings and investment movements.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use super::parse_stored;
use crate::domain::Saving;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "savings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    /// `savings` or `investment`
    pub kind: String,
    pub account_name: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub deposit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub withdrawal: Decimal,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for Saving {
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
        Ok(Saving {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            kind: parse_stored(&row.kind, "savings.kind")?,
            account_name: row.account_name,
            deposit: row.deposit,
            withdrawal: row.withdrawal,
            note: row.note,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            date: Set(self.date),
            kind: Set(self.kind.as_str().to_string()),
            account_name: Set(self.account_name.clone()),
            deposit: Set(self.deposit),
            withdrawal: Set(self.withdrawal),
            note: Set(self.note.clone()),
        }
    }
}
