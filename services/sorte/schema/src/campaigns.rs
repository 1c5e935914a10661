use sea_orm::entity::prelude::*;

/// Promotional raffle. Remaining counters are decremented on code validation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    /// `raspadinha` | `caixa_surpresa`
    pub game: String,
    /// `quantidade` | `periodo`
    pub mode: String,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
    pub total_scratch_cards: i32,
    pub remaining_scratch_cards: i32,
    pub total_prizes: i32,
    pub remaining_prizes: i32,
    /// `ativa` | `pausada` | `encerrada`
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::campaign_prizes::Entity")]
    CampaignPrizes,
    #[sea_orm(has_many = "super::positions::Entity")]
    Positions,
}

impl Related<super::campaign_prizes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignPrizes.def()
    }
}

impl Related<super::positions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Positions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
