//! Migration: Create savings, budgets and master_data tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Savings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Savings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Savings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Savings::Date).date().not_null())
                    .col(ColumnDef::new(Savings::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Savings::AccountName).string().not_null())
                    .col(
                        ColumnDef::new(Savings::Deposit)
                            .decimal_len(15, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Savings::Withdrawal)
                            .decimal_len(15, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Savings::Note).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_savings_user")
                            .from(Savings::Table, Savings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_savings_user_date")
                    .table(Savings::Table)
                    .col(Savings::UserId)
                    .col(Savings::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Budgets::UserId).uuid().not_null())
                    .col(ColumnDef::new(Budgets::Month).string_len(7).not_null())
                    .col(ColumnDef::new(Budgets::Category).string().not_null())
                    .col(ColumnDef::new(Budgets::Amount).decimal_len(15, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budgets_user")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_budgets_user_month_category")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::Month)
                    .col(Budgets::Category)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MasterData::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MasterData::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MasterData::UserId).uuid().not_null())
                    .col(ColumnDef::new(MasterData::Kind).string_len(30).not_null())
                    .col(ColumnDef::new(MasterData::Value).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_data_user")
                            .from(MasterData::Table, MasterData::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_master_data_user_kind_value")
                    .table(MasterData::Table)
                    .col(MasterData::UserId)
                    .col(MasterData::Kind)
                    .col(MasterData::Value)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MasterData::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Savings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Savings {
    Table,
    Id,
    UserId,
    Date,
    Kind,
    AccountName,
    Deposit,
    Withdrawal,
    Note,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    UserId,
    Month,
    Category,
    Amount,
}

#[derive(Iden)]
enum MasterData {
    Table,
    Id,
    UserId,
    Kind,
    Value,
}
