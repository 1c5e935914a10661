use chrono::Utc;

use sorte_domain::code_status::CodeEvent;

use crate::domain::repository::{CampaignRepository, CodeRepository};
use crate::domain::types::Code;
use crate::error::SorteServiceError;
use crate::usecase::code::find_code;

pub struct ValidateCodeUseCase<C: CampaignRepository, K: CodeRepository> {
    pub campaigns: C,
    pub codes: K,
}

impl<C: CampaignRepository, K: CodeRepository> ValidateCodeUseCase<C, K> {
    /// Activate a participant code, consuming one scratch card (and one prize
    /// when the code carries one) from the campaign.
    pub async fn execute(&self, raw_code: &str) -> Result<Code, SorteServiceError> {
        let mut code = find_code(&self.codes, raw_code).await?;
        let next = code.status.apply(CodeEvent::Validate)?;

        let campaign = self
            .campaigns
            .find_by_id(code.campaign_id)
            .await?
            .ok_or(SorteServiceError::CampaignNotFound)?;
        let now = Utc::now();
        if !campaign.is_open_at(now) {
            return Err(SorteServiceError::CampaignUnavailable);
        }

        if !self.codes.validate(&code, now).await? {
            return Err(SorteServiceError::CodeUpdatedConcurrently);
        }
        tracing::info!(code_id = %code.id, campaign_id = %campaign.id, "code validated");

        code.status = next;
        code.validated_at = Some(now);
        code.updated_at = now;
        Ok(code)
    }
}
