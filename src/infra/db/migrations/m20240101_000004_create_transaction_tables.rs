//! Migration: Create incomes and expenses tables.
//!
//! Rows mirrored from a saving or a bill payment keep a reference to it
//! and disappear together with their source.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Incomes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Incomes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(ColumnDef::new(Incomes::Month).string_len(7).not_null())
                    .col(ColumnDef::new(Incomes::Source).string().not_null())
                    .col(ColumnDef::new(Incomes::Category).string().not_null())
                    .col(ColumnDef::new(Incomes::Method).string().not_null())
                    .col(ColumnDef::new(Incomes::Amount).decimal_len(15, 2).not_null())
                    .col(ColumnDef::new(Incomes::Note).text().null())
                    .col(ColumnDef::new(Incomes::SavingId).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incomes_user")
                            .from(Incomes::Table, Incomes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incomes_saving")
                            .from(Incomes::Table, Incomes::SavingId)
                            .to(Savings::Table, Savings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_incomes_user_month")
                    .table(Incomes::Table)
                    .col(Incomes::UserId)
                    .col(Incomes::Month)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::UserId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::Month).string_len(7).not_null())
                    .col(ColumnDef::new(Expenses::Name).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Method).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).decimal_len(15, 2).not_null())
                    .col(ColumnDef::new(Expenses::Note).text().null())
                    .col(ColumnDef::new(Expenses::BillPaymentId).uuid().null())
                    .col(ColumnDef::new(Expenses::SavingId).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_user")
                            .from(Expenses::Table, Expenses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_bill_payment")
                            .from(Expenses::Table, Expenses::BillPaymentId)
                            .to(BillPayments::Table, BillPayments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_saving")
                            .from(Expenses::Table, Expenses::SavingId)
                            .to(Savings::Table, Savings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_month")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Month)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
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
}

#[derive(Iden)]
enum BillPayments {
    Table,
    Id,
}

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    UserId,
    Date,
    Month,
    Source,
    Category,
    Method,
    Amount,
    Note,
    SavingId,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    UserId,
    Date,
    Month,
    Name,
    Category,
    Method,
    Amount,
    Note,
    BillPaymentId,
    SavingId,
}
