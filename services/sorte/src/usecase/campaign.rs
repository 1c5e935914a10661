use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sorte_domain::allocation::{PrizeQuota, allocate_positions, prize_total};
use sorte_domain::campaign::{CampaignMode, CampaignStatus, GameKind};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;
use sorte_domain::user::Actor;

use crate::domain::repository::CampaignRepository;
use crate::domain::types::{Campaign, MAX_SCRATCH_CARDS, Prize};
use crate::error::SorteServiceError;

/// Load a campaign the actor's business owns (admins see all).
pub(crate) async fn authorized_campaign<R: CampaignRepository>(
    repo: &R,
    actor: &Actor,
    campaign_id: Uuid,
) -> Result<Campaign, SorteServiceError> {
    let campaign = repo
        .find_by_id(campaign_id)
        .await?
        .ok_or(SorteServiceError::CampaignNotFound)?;
    if !actor.can_access(campaign.business_id) {
        return Err(SorteServiceError::Forbidden);
    }
    Ok(campaign)
}

// ── CreateCampaign ───────────────────────────────────────────────────────────

pub struct PrizeInput {
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
}

pub struct CreateCampaignInput {
    /// Required for admins, who belong to no business.
    pub business_id: Option<Uuid>,
    pub name: String,
    pub game: GameKind,
    pub mode: CampaignMode,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub total_scratch_cards: u32,
    pub prizes: Vec<PrizeInput>,
}

pub struct CreateCampaignUseCase<R: CampaignRepository> {
    pub repo: R,
}

impl<R: CampaignRepository> CreateCampaignUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateCampaignInput,
    ) -> Result<Campaign, SorteServiceError> {
        if !actor.level.can_manage_campaigns() {
            return Err(SorteServiceError::Forbidden);
        }
        let business_id = owning_business(actor, input.business_id)?;

        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(invalid("name is required"));
        }
        if input.total_scratch_cards > MAX_SCRATCH_CARDS {
            return Err(invalid(format!(
                "at most {MAX_SCRATCH_CARDS} scratch cards per campaign"
            )));
        }
        if input.mode == CampaignMode::Periodo {
            match (input.starts_at, input.ends_at) {
                (Some(starts_at), Some(ends_at)) if starts_at < ends_at => {}
                (Some(_), Some(_)) => return Err(invalid("starts_at must be before ends_at")),
                _ => return Err(invalid("periodo campaigns need starts_at and ends_at")),
            }
        }

        let mut seen = HashSet::new();
        let mut prizes = Vec::with_capacity(input.prizes.len());
        for prize in input.prizes {
            let prize_name = prize.name.trim().to_owned();
            if prize_name.is_empty() {
                return Err(invalid("prize name is required"));
            }
            if !seen.insert(prize_name.clone()) {
                return Err(invalid(format!("duplicate prize `{prize_name}`")));
            }
            prizes.push(Prize {
                name: prize_name,
                image_url: prize.image_url.filter(|url| !url.trim().is_empty()),
                quantity: prize.quantity,
            });
        }

        let quotas: Vec<PrizeQuota> = prizes
            .iter()
            .map(|p| PrizeQuota {
                name: p.name.clone(),
                quantity: p.quantity,
            })
            .collect();
        let slots = allocate_positions(&quotas, input.total_scratch_cards)
            .map_err(|e| SorteServiceError::InvalidCampaign(e.to_string()))?;
        let total_prizes = prize_total(&quotas) as u32;

        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::now_v7(),
            business_id,
            name,
            game: input.game,
            mode: input.mode,
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            total_scratch_cards: input.total_scratch_cards,
            remaining_scratch_cards: input.total_scratch_cards,
            total_prizes,
            remaining_prizes: total_prizes,
            prizes,
            status: CampaignStatus::Ativa,
            created_at: now,
            updated_at: now,
        };
        self.repo.create_with_positions(&campaign, &slots).await?;

        tracing::info!(
            campaign_id = %campaign.id,
            %business_id,
            scratch_cards = campaign.total_scratch_cards,
            prizes = total_prizes,
            "campaign created"
        );
        Ok(campaign)
    }
}

fn invalid(reason: impl Into<String>) -> SorteServiceError {
    SorteServiceError::InvalidCampaign(reason.into())
}

fn owning_business(actor: &Actor, requested: Option<Uuid>) -> Result<Uuid, SorteServiceError> {
    match (actor.business_id, requested) {
        (Some(own), Some(other)) if own != other && !actor.is_admin() => {
            Err(SorteServiceError::Forbidden)
        }
        (_, Some(requested)) if actor.is_admin() => Ok(requested),
        (Some(own), _) => Ok(own),
        (None, requested) => requested.ok_or_else(|| invalid("business_id is required")),
    }
}

// ── GetCampaign ──────────────────────────────────────────────────────────────

pub struct GetCampaignUseCase<R: CampaignRepository> {
    pub repo: R,
}

impl<R: CampaignRepository> GetCampaignUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
    ) -> Result<Campaign, SorteServiceError> {
        authorized_campaign(&self.repo, actor, campaign_id).await
    }
}

// ── ListCampaigns ────────────────────────────────────────────────────────────

pub struct ListCampaignsUseCase<R: CampaignRepository> {
    pub repo: R,
}

impl<R: CampaignRepository> ListCampaignsUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<Vec<Campaign>, SorteServiceError> {
        self.repo.list(actor.business_scope(), page.clamped()).await
    }
}

// ── UpdateCampaignStatus ─────────────────────────────────────────────────────

pub struct UpdateCampaignStatusUseCase<R: CampaignRepository> {
    pub repo: R,
}

impl<R: CampaignRepository> UpdateCampaignStatusUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        status: CampaignStatus,
    ) -> Result<Campaign, SorteServiceError> {
        if !actor.level.can_manage_campaigns() {
            return Err(SorteServiceError::Forbidden);
        }
        let mut campaign = authorized_campaign(&self.repo, actor, campaign_id).await?;
        if campaign.status == status {
            return Ok(campaign);
        }
        if !campaign.status.can_transition_to(status) {
            return Err(SorteServiceError::InvalidCampaignStatus);
        }
        self.repo.update_status(campaign_id, status).await?;

        tracing::info!(
            %campaign_id,
            from = campaign.status.as_str(),
            to = status.as_str(),
            "campaign status changed"
        );
        campaign.status = status;
        campaign.updated_at = Utc::now();
        Ok(campaign)
    }
}

// ── CampaignStats ────────────────────────────────────────────────────────────

/// Tracking numbers for one campaign.
#[derive(Debug, Clone)]
pub struct CampaignStats {
    pub campaign: Campaign,
    /// One entry per lifecycle status, in lifecycle order.
    pub codes_by_status: Vec<(CodeStatus, u64)>,
    pub codes_issued: u64,
    pub positions_total: u64,
    pub positions_used: u64,
    pub positions_sent: u64,
    pub vouchers_issued: u64,
    pub vouchers_redeemed: u64,
}

pub struct CampaignStatsUseCase<R: CampaignRepository> {
    pub repo: R,
}

impl<R: CampaignRepository> CampaignStatsUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
    ) -> Result<CampaignStats, SorteServiceError> {
        let campaign = authorized_campaign(&self.repo, actor, campaign_id).await?;
        let counts = self.repo.counts(campaign_id).await?;

        let codes_by_status: Vec<(CodeStatus, u64)> = CodeStatus::ALL
            .iter()
            .map(|status| {
                let count = counts
                    .codes_by_status
                    .iter()
                    .find(|(s, _)| s == status)
                    .map_or(0, |(_, n)| *n);
                (*status, count)
            })
            .collect();
        let codes_issued = codes_by_status.iter().map(|(_, n)| n).sum();

        Ok(CampaignStats {
            positions_total: u64::from(campaign.total_scratch_cards),
            campaign,
            codes_by_status,
            codes_issued,
            positions_used: counts.positions_used,
            positions_sent: counts.positions_sent,
            vouchers_issued: counts.vouchers_issued,
            vouchers_redeemed: counts.vouchers_redeemed,
        })
    }
}
