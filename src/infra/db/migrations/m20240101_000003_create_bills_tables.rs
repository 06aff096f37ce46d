//! Migration: Create bills and bill_payments tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bills::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bills::UserId).uuid().not_null())
                    .col(ColumnDef::new(Bills::Name).string().not_null())
                    .col(ColumnDef::new(Bills::Category).string().not_null())
                    .col(ColumnDef::new(Bills::Amount).decimal_len(15, 2).not_null())
                    .col(ColumnDef::new(Bills::DueDay).integer().not_null())
                    .col(ColumnDef::new(Bills::StartMonth).string_len(7).not_null())
                    .col(ColumnDef::new(Bills::EndMonth).string_len(7).null())
                    .col(ColumnDef::new(Bills::Note).text().null())
                    .col(
                        ColumnDef::new(Bills::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bills_user")
                            .from(Bills::Table, Bills::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BillPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BillPayments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BillPayments::UserId).uuid().not_null())
                    .col(ColumnDef::new(BillPayments::BillId).uuid().not_null())
                    .col(ColumnDef::new(BillPayments::Month).string_len(7).not_null())
                    .col(
                        ColumnDef::new(BillPayments::PaidAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BillPayments::AmountPaid)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_payments_user")
                            .from(BillPayments::Table, BillPayments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bill_payments_bill")
                            .from(BillPayments::Table, BillPayments::BillId)
                            .to(Bills::Table, Bills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_bill_payments_bill_month")
                    .table(BillPayments::Table)
                    .col(BillPayments::BillId)
                    .col(BillPayments::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BillPayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Bills {
    Table,
    Id,
    UserId,
    Name,
    Category,
    Amount,
    DueDay,
    StartMonth,
    EndMonth,
    Note,
    IsActive,
}

#[derive(Iden)]
enum BillPayments {
    Table,
    Id,
    UserId,
    BillId,
    Month,
    PaidAt,
    AmountPaid,
}
