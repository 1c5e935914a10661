use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vouchers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vouchers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Vouchers::Voucher)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    // One voucher per code.
                    .col(ColumnDef::new(Vouchers::CodeId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Vouchers::Status).string().not_null())
                    .col(
                        ColumnDef::new(Vouchers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vouchers::UsedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Vouchers::Table, Vouchers::CodeId)
                            .to(Codes::Table, Codes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vouchers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vouchers {
    Table,
    Id,
    Voucher,
    CodeId,
    Status,
    CreatedAt,
    UsedAt,
}

#[derive(Iden)]
enum Codes {
    Table,
    Id,
}
