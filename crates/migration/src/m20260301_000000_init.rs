//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: registered users, unique by email
//! - `entries`: income/expense entries owned by a user

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    RegisteredAt,
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    Description,
    Month,
    Year,
    Value,
    Kind,
    Status,
    UserId,
    RegisteredAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::RegisteredAt).date().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Entries
        // ───────────────────────────────────────────────────────────────────
        // `value` is decimal text so amounts never go through floating point.
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::Description).string().not_null())
                    .col(ColumnDef::new(Entries::Month).integer().not_null())
                    .col(ColumnDef::new(Entries::Year).integer().not_null())
                    .col(ColumnDef::new(Entries::Value).string().not_null())
                    .col(ColumnDef::new(Entries::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Entries::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Entries::UserId).string().not_null())
                    .col(ColumnDef::new(Entries::RegisteredAt).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entries-user_id")
                            .from(Entries::Table, Entries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-entries-user_id-kind-status")
                    .table(Entries::Table)
                    .col(Entries::UserId)
                    .col(Entries::Kind)
                    .col(Entries::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
