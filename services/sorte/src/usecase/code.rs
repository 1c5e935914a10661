use anyhow::anyhow;
use chrono::Utc;
use uuid::Uuid;

use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;
use sorte_domain::phone::normalize_phone;
use sorte_domain::user::Actor;

use crate::domain::repository::{CampaignRepository, CodeRepository, WhatsAppPort};
use crate::domain::types::{
    CODE_LEN, Campaign, Code, IssueOutcome, MAX_CODE_GENERATION_ATTEMPTS, MAX_ISSUE_ATTEMPTS,
    NewCode, generate_code, normalize_code,
};
use crate::error::SorteServiceError;
use crate::usecase::campaign::authorized_campaign;

/// Draw a code string no existing code uses.
async fn fresh_code<K: CodeRepository>(codes: &K) -> Result<String, SorteServiceError> {
    for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
        let candidate = generate_code(CODE_LEN);
        if !codes.code_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(anyhow!("no unused code after {MAX_CODE_GENERATION_ATTEMPTS} attempts").into())
}

/// Claim a random unused position of the campaign for `phone`.
async fn issue_code<C: CampaignRepository, K: CodeRepository>(
    campaigns: &C,
    codes: &K,
    actor: &Actor,
    campaign_id: Uuid,
    phone: &str,
) -> Result<(Campaign, Code), SorteServiceError> {
    let phone = normalize_phone(phone).ok_or(SorteServiceError::InvalidPhone)?;
    let campaign = authorized_campaign(campaigns, actor, campaign_id).await?;
    if !campaign.is_open_at(Utc::now()) {
        return Err(SorteServiceError::CampaignUnavailable);
    }

    for attempt in 1..=MAX_ISSUE_ATTEMPTS {
        let new_code = NewCode {
            id: Uuid::now_v7(),
            code: fresh_code(codes).await?,
            phone: phone.clone(),
            created_at: Utc::now(),
        };
        match codes.issue(campaign_id, &new_code).await? {
            IssueOutcome::Issued(code) => {
                tracing::info!(
                    %campaign_id,
                    code_id = %code.id,
                    issued_by = %actor.user_id,
                    "code issued"
                );
                return Ok((campaign, code));
            }
            IssueOutcome::Exhausted => return Err(SorteServiceError::NoPositionsLeft),
            IssueOutcome::Contended => {
                tracing::warn!(%campaign_id, attempt, "position claimed concurrently, retrying");
            }
            IssueOutcome::CodeTaken => {
                tracing::warn!(%campaign_id, attempt, "code string taken concurrently, retrying");
            }
        }
    }
    Err(SorteServiceError::PositionsBusy)
}

// ── IssueCode ────────────────────────────────────────────────────────────────

pub struct IssueCodeUseCase<C: CampaignRepository, K: CodeRepository> {
    pub campaigns: C,
    pub codes: K,
}

impl<C: CampaignRepository, K: CodeRepository> IssueCodeUseCase<C, K> {
    pub async fn execute(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        phone: &str,
    ) -> Result<Code, SorteServiceError> {
        let (_, code) = issue_code(&self.campaigns, &self.codes, actor, campaign_id, phone).await?;
        Ok(code)
    }
}

// ── SendCode ─────────────────────────────────────────────────────────────────

pub struct SendCodeUseCase<C: CampaignRepository, K: CodeRepository, W: WhatsAppPort> {
    pub campaigns: C,
    pub codes: K,
    pub whatsapp: W,
    pub public_base_url: String,
}

impl<C: CampaignRepository, K: CodeRepository, W: WhatsAppPort> SendCodeUseCase<C, K, W> {
    /// Issue a code and deliver it over WhatsApp. A delivery failure leaves
    /// the code issued but unsent.
    pub async fn execute(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        phone: &str,
    ) -> Result<Code, SorteServiceError> {
        let (campaign, code) =
            issue_code(&self.campaigns, &self.codes, actor, campaign_id, phone).await?;

        let message = code_message(&campaign, &code, &self.public_base_url);
        let subject = campaign.business_id.to_string();
        if let Err(e) = self.whatsapp.send(&subject, &code.phone, &message).await {
            tracing::warn!(code_id = %code.id, error = %e, "code issued but not delivered");
            return Err(e);
        }
        self.codes.mark_sent(code.position_id).await?;
        Ok(code)
    }
}

fn code_message(campaign: &Campaign, code: &Code, public_base_url: &str) -> String {
    format!(
        "Seu código da sorte para {}: {}\nJogue em {}/validar?code={}",
        campaign.name,
        code.code,
        public_base_url.trim_end_matches('/'),
        code.code
    )
}

// ── ListCodes ────────────────────────────────────────────────────────────────

pub struct ListCodesUseCase<C: CampaignRepository, K: CodeRepository> {
    pub campaigns: C,
    pub codes: K,
}

impl<C: CampaignRepository, K: CodeRepository> ListCodesUseCase<C, K> {
    pub async fn execute(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        status: Option<CodeStatus>,
        page: PageRequest,
    ) -> Result<Vec<Code>, SorteServiceError> {
        authorized_campaign(&self.campaigns, actor, campaign_id).await?;
        self.codes
            .list_by_campaign(campaign_id, status, page.clamped())
            .await
    }
}

// ── GetCode ──────────────────────────────────────────────────────────────────

pub struct GetCodeUseCase<K: CodeRepository> {
    pub codes: K,
}

impl<K: CodeRepository> GetCodeUseCase<K> {
    /// Public lookup used by the player pages to pick where to go next.
    pub async fn execute(&self, raw_code: &str) -> Result<Code, SorteServiceError> {
        find_code(&self.codes, raw_code).await
    }
}

/// Look a participant code up the way it was typed.
pub(crate) async fn find_code<K: CodeRepository>(
    codes: &K,
    raw_code: &str,
) -> Result<Code, SorteServiceError> {
    let code = normalize_code(raw_code);
    if code.is_empty() {
        return Err(SorteServiceError::CodeNotFound);
    }
    codes
        .find_by_code(&code)
        .await?
        .ok_or(SorteServiceError::CodeNotFound)
}
