use chrono::Utc;

use sorte_domain::campaign::GameKind;
use sorte_domain::code_status::CodeEvent;

use crate::domain::repository::{CampaignRepository, CodeRepository};
use crate::domain::types::Code;
use crate::error::SorteServiceError;
use crate::usecase::code::find_code;

/// Prize shown when the game is revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeReveal {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GameReveal {
    pub code: Code,
    pub game: GameKind,
    pub prize: Option<PrizeReveal>,
}

impl GameReveal {
    pub fn won(&self) -> bool {
        self.prize.is_some()
    }
}

// ── StartGame ────────────────────────────────────────────────────────────────

pub struct StartGameUseCase<C: CampaignRepository, K: CodeRepository> {
    pub campaigns: C,
    pub codes: K,
}

impl<C: CampaignRepository, K: CodeRepository> StartGameUseCase<C, K> {
    /// Start (or resume) the game of a validated code and reveal its outcome.
    pub async fn execute(&self, raw_code: &str) -> Result<GameReveal, SorteServiceError> {
        let mut code = find_code(&self.codes, raw_code).await?;
        let next = code.status.apply(CodeEvent::StartGame)?;

        let campaign = self
            .campaigns
            .find_by_id(code.campaign_id)
            .await?
            .ok_or(SorteServiceError::CampaignNotFound)?;

        if next != code.status {
            if !self.codes.transition(code.id, code.status, next).await? {
                return Err(SorteServiceError::CodeUpdatedConcurrently);
            }
            code.status = next;
            code.updated_at = Utc::now();
        }

        let prize = code.prize.as_deref().map(|name| PrizeReveal {
            name: name.to_owned(),
            image_url: campaign.prize(name).and_then(|p| p.image_url.clone()),
        });
        Ok(GameReveal {
            code,
            game: campaign.game,
            prize,
        })
    }
}

// ── FinishGame ───────────────────────────────────────────────────────────────

pub struct FinishGameUseCase<K: CodeRepository> {
    pub codes: K,
}

impl<K: CodeRepository> FinishGameUseCase<K> {
    /// Close the game: winners move on to data collection, the rest are done.
    pub async fn execute(&self, raw_code: &str) -> Result<Code, SorteServiceError> {
        let mut code = find_code(&self.codes, raw_code).await?;
        let next = code.status.apply(CodeEvent::FinishGame {
            won: code.has_prize(),
        })?;
        if !self.codes.transition(code.id, code.status, next).await? {
            return Err(SorteServiceError::CodeUpdatedConcurrently);
        }
        tracing::info!(code_id = %code.id, won = code.has_prize(), "game finished");

        code.status = next;
        code.updated_at = Utc::now();
        Ok(code)
    }
}
