use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use sorte_core::extract::{Json, Path};
use sorte_domain::campaign::GameKind;
use sorte_domain::code_status::CodeStatus;

use crate::error::SorteServiceError;
use crate::handlers::code::PlayerCodeResponse;
use crate::state::AppState;
use crate::usecase::game::{FinishGameUseCase, GameReveal, StartGameUseCase};
use crate::usecase::validation::ValidateCodeUseCase;
use crate::usecase::winner::{SubmitWinnerUseCase, WinnerInput};

// ── POST /codes/{code}/validate ──────────────────────────────────────────────

pub async fn validate_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PlayerCodeResponse>, SorteServiceError> {
    let usecase = ValidateCodeUseCase {
        campaigns: state.campaign_repo(),
        codes: state.code_repo(),
    };
    let code = usecase.execute(&code).await?;
    Ok(Json(PlayerCodeResponse::from(&code)))
}

// ── POST /codes/{code}/game/start ────────────────────────────────────────────

#[derive(Serialize)]
pub struct PrizeRevealResponse {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Serialize)]
pub struct GameResponse {
    pub code: String,
    pub status: CodeStatus,
    pub redirect: &'static str,
    pub game: GameKind,
    pub won: bool,
    pub prize: Option<PrizeRevealResponse>,
}

impl From<GameReveal> for GameResponse {
    fn from(reveal: GameReveal) -> Self {
        let won = reveal.won();
        Self {
            code: reveal.code.code,
            status: reveal.code.status,
            redirect: reveal.code.status.redirect_path(),
            game: reveal.game,
            won,
            prize: reveal.prize.map(|p| PrizeRevealResponse {
                name: p.name,
                image_url: p.image_url,
            }),
        }
    }
}

pub async fn start_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GameResponse>, SorteServiceError> {
    let usecase = StartGameUseCase {
        campaigns: state.campaign_repo(),
        codes: state.code_repo(),
    };
    let reveal = usecase.execute(&code).await?;
    Ok(Json(reveal.into()))
}

// ── POST /codes/{code}/game/finish ───────────────────────────────────────────

#[derive(Serialize)]
pub struct FinishGameResponse {
    #[serde(flatten)]
    pub code: PlayerCodeResponse,
    pub won: bool,
}

pub async fn finish_game(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<FinishGameResponse>, SorteServiceError> {
    let usecase = FinishGameUseCase {
        codes: state.code_repo(),
    };
    let code = usecase.execute(&code).await?;
    Ok(Json(FinishGameResponse {
        code: PlayerCodeResponse::from(&code),
        won: code.has_prize(),
    }))
}

// ── POST /codes/{code}/winner ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WinnerRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
}

pub async fn submit_winner(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(body): Json<WinnerRequest>,
) -> Result<(StatusCode, Json<PlayerCodeResponse>), SorteServiceError> {
    let usecase = SubmitWinnerUseCase {
        codes: state.code_repo(),
    };
    let (code, _winner) = usecase
        .execute(
            &code,
            WinnerInput {
                name: body.name,
                phone: body.phone,
                address: body.address,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(PlayerCodeResponse::from(&code))))
}
