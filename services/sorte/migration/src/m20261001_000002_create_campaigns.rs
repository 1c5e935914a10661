use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(Campaigns::Name).string().not_null())
                    .col(ColumnDef::new(Campaigns::Game).string().not_null())
                    .col(ColumnDef::new(Campaigns::Mode).string().not_null())
                    .col(ColumnDef::new(Campaigns::StartsAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Campaigns::EndsAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Campaigns::TotalScratchCards)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::RemainingScratchCards)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaigns::TotalPrizes).integer().not_null())
                    .col(
                        ColumnDef::new(Campaigns::RemainingPrizes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaigns::Status).string().not_null())
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Campaigns::Table)
                    .col(Campaigns::BusinessId)
                    .col(Campaigns::CreatedAt)
                    .name("idx_campaigns_business_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
    BusinessId,
    Name,
    Game,
    Mode,
    StartsAt,
    EndsAt,
    TotalScratchCards,
    RemainingScratchCards,
    TotalPrizes,
    RemainingPrizes,
    Status,
    CreatedAt,
    UpdatedAt,
}
