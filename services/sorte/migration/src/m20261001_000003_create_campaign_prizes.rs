use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CampaignPrizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignPrizes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignPrizes::CampaignId).uuid().not_null())
                    .col(ColumnDef::new(CampaignPrizes::SortOrder).integer().not_null())
                    .col(ColumnDef::new(CampaignPrizes::Name).string().not_null())
                    .col(ColumnDef::new(CampaignPrizes::ImageUrl).string())
                    .col(ColumnDef::new(CampaignPrizes::Quantity).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(CampaignPrizes::Table, CampaignPrizes::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(CampaignPrizes::Table)
                    .col(CampaignPrizes::CampaignId)
                    .name("idx_campaign_prizes_campaign_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignPrizes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CampaignPrizes {
    Table,
    Id,
    CampaignId,
    SortOrder,
    Name,
    ImageUrl,
    Quantity,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}
