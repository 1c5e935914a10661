use chrono::Utc;
use uuid::Uuid;

use sorte_domain::code_status::CodeEvent;
use sorte_domain::phone::normalize_phone;

use crate::domain::repository::CodeRepository;
use crate::domain::types::{Code, Winner};
use crate::error::SorteServiceError;
use crate::usecase::code::find_code;

pub struct WinnerInput {
    pub name: String,
    pub phone: String,
    pub address: String,
}

pub struct SubmitWinnerUseCase<K: CodeRepository> {
    pub codes: K,
}

impl<K: CodeRepository> SubmitWinnerUseCase<K> {
    pub async fn execute(
        &self,
        raw_code: &str,
        input: WinnerInput,
    ) -> Result<(Code, Winner), SorteServiceError> {
        let name = input.name.trim();
        let address = input.address.trim();
        if name.is_empty() || address.is_empty() {
            return Err(SorteServiceError::MissingData);
        }
        let phone = normalize_phone(&input.phone).ok_or(SorteServiceError::InvalidPhone)?;

        let mut code = find_code(&self.codes, raw_code).await?;
        let next = code.status.apply(CodeEvent::SubmitWinner)?;

        let winner = Winner {
            id: Uuid::now_v7(),
            code_id: code.id,
            campaign_id: code.campaign_id,
            name: name.to_owned(),
            phone,
            address: address.to_owned(),
            created_at: Utc::now(),
        };
        if !self.codes.submit_winner(&winner, code.status, next).await? {
            return Err(SorteServiceError::CodeUpdatedConcurrently);
        }
        tracing::info!(code_id = %code.id, winner_id = %winner.id, "winner data collected");

        code.status = next;
        code.updated_at = winner.created_at;
        Ok((code, winner))
    }
}
