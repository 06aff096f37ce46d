//! Per-user category and payment method lists.

use sea_orm::entity::prelude::*;
use sea_orm::{Condition, Set};

use super::parse_stored;
use crate::domain::MasterData;
use crate::errors::AppResult;
use crate::infra::repositories::Resource;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "master_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Resource for MasterData {
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
        Column::Kind
    }

    fn from_row(row: Model) -> AppResult<Self> {
        Ok(MasterData {
            id: row.id,
            user_id: row.user_id,
            kind: parse_stored(&row.kind, "master_data.kind")?,
            value: row.value,
        })
    }

    fn to_active(&self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            kind: Set(self.kind.as_str().to_string()),
            value: Set(self.value.clone()),
        }
    }

    fn unique_key(&self) -> Option<Condition> {
        Some(
            Condition::all()
                .add(Column::Kind.eq(self.kind.as_str()))
                .add(Column::Value.eq(self.value.clone())),
        )
    }
}
