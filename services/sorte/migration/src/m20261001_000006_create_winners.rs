use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Winners::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Winners::CodeId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Winners::CampaignId).uuid().not_null())
                    .col(ColumnDef::new(Winners::Name).string().not_null())
                    .col(ColumnDef::new(Winners::Phone).string().not_null())
                    .col(ColumnDef::new(Winners::Address).string().not_null())
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Winners::Table, Winners::CodeId)
                            .to(Codes::Table, Codes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Winners::Table, Winners::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Winners::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Winners {
    Table,
    Id,
    CodeId,
    CampaignId,
    Name,
    Phone,
    Address,
    CreatedAt,
}

#[derive(Iden)]
enum Codes {
    Table,
    Id,
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
}
