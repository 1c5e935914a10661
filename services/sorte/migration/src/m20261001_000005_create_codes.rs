use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Codes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Codes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Codes::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Codes::CampaignId).uuid().not_null())
                    // A position backs at most one code.
                    .col(ColumnDef::new(Codes::PositionId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Codes::Phone).string().not_null())
                    .col(ColumnDef::new(Codes::Prize).string())
                    .col(ColumnDef::new(Codes::Status).string().not_null())
                    .col(
                        ColumnDef::new(Codes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Codes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Codes::ValidatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Codes::Table, Codes::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Codes::Table, Codes::PositionId)
                            .to(Positions::Table, Positions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Codes::Table)
                    .col(Codes::CampaignId)
                    .col(Codes::Status)
                    .name("idx_codes_campaign_id_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Codes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Codes {
    Table,
    Id,
    Code,
    CampaignId,
    PositionId,
    Phone,
    Prize,
    Status,
    CreatedAt,
    UpdatedAt,
    ValidatedAt,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}

#[derive(Iden)]
enum Positions {
    Table,
    Id,
}
