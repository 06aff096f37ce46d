//! Migration: Create savings_targets table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavingsTargets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavingsTargets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavingsTargets::UserId).uuid().not_null())
                    .col(ColumnDef::new(SavingsTargets::Name).string().not_null())
                    .col(
                        ColumnDef::new(SavingsTargets::TargetAmount)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SavingsTargets::StartDate).date().not_null())
                    .col(ColumnDef::new(SavingsTargets::TargetDate).date().not_null())
                    .col(ColumnDef::new(SavingsTargets::AccountName).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_savings_targets_user")
                            .from(SavingsTargets::Table, SavingsTargets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavingsTargets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum SavingsTargets {
    Table,
    Id,
    UserId,
    Name,
    TargetAmount,
    StartDate,
    TargetDate,
    AccountName,
}
