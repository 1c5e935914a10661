use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sorte_auth_types::identity::IdentityHeaders;
use sorte_core::extract::{Json, Path};
use sorte_domain::campaign::{CampaignMode, CampaignStatus, GameKind};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;

use crate::domain::types::{Campaign, Prize};
use crate::error::SorteServiceError;
use crate::state::AppState;
use crate::usecase::campaign::{
    CampaignStats, CampaignStatsUseCase, CreateCampaignInput, CreateCampaignUseCase,
    GetCampaignUseCase, ListCampaignsUseCase, PrizeInput, UpdateCampaignStatusUseCase,
};

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PrizeResponse {
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl From<Prize> for PrizeResponse {
    fn from(prize: Prize) -> Self {
        Self {
            name: prize.name,
            image_url: prize.image_url,
            quantity: prize.quantity,
        }
    }
}

#[derive(Serialize)]
pub struct CampaignResponse {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub game: GameKind,
    pub mode: CampaignMode,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms_opt")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms_opt")]
    pub ends_at: Option<DateTime<Utc>>,
    pub total_scratch_cards: u32,
    pub remaining_scratch_cards: u32,
    pub total_prizes: u32,
    pub remaining_prizes: u32,
    pub prizes: Vec<PrizeResponse>,
    pub status: CampaignStatus,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(c: Campaign) -> Self {
        Self {
            id: c.id,
            business_id: c.business_id,
            name: c.name,
            game: c.game,
            mode: c.mode,
            starts_at: c.starts_at,
            ends_at: c.ends_at,
            total_scratch_cards: c.total_scratch_cards,
            remaining_scratch_cards: c.remaining_scratch_cards,
            total_prizes: c.total_prizes,
            remaining_prizes: c.remaining_prizes,
            prizes: c.prizes.into_iter().map(PrizeResponse::from).collect(),
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

// ── POST /campaigns ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PrizeRequest {
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct CreateCampaignRequest {
    pub business_id: Option<Uuid>,
    pub name: String,
    pub game: GameKind,
    pub mode: CampaignMode,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub total_scratch_cards: u32,
    #[serde(default)]
    pub prizes: Vec<PrizeRequest>,
}

pub async fn create_campaign(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), SorteServiceError> {
    let usecase = CreateCampaignUseCase {
        repo: state.campaign_repo(),
    };
    let campaign = usecase
        .execute(
            &identity.actor(),
            CreateCampaignInput {
                business_id: body.business_id,
                name: body.name,
                game: body.game,
                mode: body.mode,
                starts_at: body.starts_at,
                ends_at: body.ends_at,
                total_scratch_cards: body.total_scratch_cards,
                prizes: body
                    .prizes
                    .into_iter()
                    .map(|p| PrizeInput {
                        name: p.name,
                        image_url: p.image_url,
                        quantity: p.quantity,
                    })
                    .collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(campaign.into())))
}

// ── GET /campaigns ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CampaignListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub(crate) fn page_request(per_page: Option<u32>, page: Option<u32>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest {
        per_page: per_page.unwrap_or(defaults.per_page),
        page: page.unwrap_or(defaults.page),
    }
}

pub async fn list_campaigns(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<CampaignResponse>>, SorteServiceError> {
    let query: CampaignListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| SorteServiceError::MissingData)?
        .unwrap_or_default();

    let usecase = ListCampaignsUseCase {
        repo: state.campaign_repo(),
    };
    let campaigns = usecase
        .execute(&identity.actor(), page_request(query.per_page, query.page))
        .await?;
    Ok(Json(campaigns.into_iter().map(Into::into).collect()))
}

// ── GET /campaigns/{id} ──────────────────────────────────────────────────────

pub async fn get_campaign(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignResponse>, SorteServiceError> {
    let usecase = GetCampaignUseCase {
        repo: state.campaign_repo(),
    };
    let campaign = usecase.execute(&identity.actor(), campaign_id).await?;
    Ok(Json(campaign.into()))
}

// ── PATCH /campaigns/{id}/status ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: CampaignStatus,
}

pub async fn update_campaign_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<CampaignResponse>, SorteServiceError> {
    let usecase = UpdateCampaignStatusUseCase {
        repo: state.campaign_repo(),
    };
    let campaign = usecase
        .execute(&identity.actor(), campaign_id, body.status)
        .await?;
    Ok(Json(campaign.into()))
}

// ── GET /campaigns/{id}/stats ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusCountResponse {
    pub status: CodeStatus,
    pub count: u64,
}

#[derive(Serialize)]
pub struct CampaignStatsResponse {
    pub campaign_id: Uuid,
    pub status: CampaignStatus,
    pub codes_issued: u64,
    pub codes_by_status: Vec<StatusCountResponse>,
    pub positions_total: u64,
    pub positions_used: u64,
    pub positions_sent: u64,
    pub remaining_scratch_cards: u32,
    pub remaining_prizes: u32,
    pub vouchers_issued: u64,
    pub vouchers_redeemed: u64,
}

impl From<CampaignStats> for CampaignStatsResponse {
    fn from(stats: CampaignStats) -> Self {
        Self {
            campaign_id: stats.campaign.id,
            status: stats.campaign.status,
            codes_issued: stats.codes_issued,
            codes_by_status: stats
                .codes_by_status
                .into_iter()
                .map(|(status, count)| StatusCountResponse { status, count })
                .collect(),
            positions_total: stats.positions_total,
            positions_used: stats.positions_used,
            positions_sent: stats.positions_sent,
            remaining_scratch_cards: stats.campaign.remaining_scratch_cards,
            remaining_prizes: stats.campaign.remaining_prizes,
            vouchers_issued: stats.vouchers_issued,
            vouchers_redeemed: stats.vouchers_redeemed,
        }
    }
}

pub async fn get_campaign_stats(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignStatsResponse>, SorteServiceError> {
    let usecase = CampaignStatsUseCase {
        repo: state.campaign_repo(),
    };
    let stats = usecase.execute(&identity.actor(), campaign_id).await?;
    Ok(Json(stats.into()))
}
