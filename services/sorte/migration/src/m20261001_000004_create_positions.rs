use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Positions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Positions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Positions::CampaignId).uuid().not_null())
                    .col(ColumnDef::new(Positions::Index).integer().not_null())
                    .col(ColumnDef::new(Positions::Prize).string())
                    .col(
                        ColumnDef::new(Positions::Usado)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Positions::Enviado)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Positions::Table, Positions::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Positions::Table)
                    .col(Positions::CampaignId)
                    .col(Positions::Index)
                    .unique()
                    .name("uq_positions_campaign_id_index")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Positions::Table)
                    .col(Positions::CampaignId)
                    .col(Positions::Usado)
                    .name("idx_positions_campaign_id_usado")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Positions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Positions {
    Table,
    Id,
    CampaignId,
    Index,
    Prize,
    Usado,
    Enviado,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}
