use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use sorte_auth_types::identity::IdentityHeaders;
use sorte_core::extract::{Json, Path};
use sorte_domain::campaign::NO_PRIZE;
use sorte_domain::code_status::CodeStatus;

use crate::domain::types::Code;
use crate::error::SorteServiceError;
use crate::handlers::campaign::page_request;
use crate::state::AppState;
use crate::usecase::code::{GetCodeUseCase, IssueCodeUseCase, ListCodesUseCase, SendCodeUseCase};

/// Serialize an absent prize as `"nenhum"`.
pub(crate) fn prize_or_none<S>(prize: &Option<String>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(prize.as_deref().unwrap_or(NO_PRIZE))
}

/// Dashboard view of a code, including its prize.
#[derive(Serialize)]
pub struct CodeResponse {
    pub id: Uuid,
    pub code: String,
    pub campaign_id: Uuid,
    pub phone: String,
    #[serde(serialize_with = "prize_or_none")]
    pub prize: Option<String>,
    pub status: CodeStatus,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms_opt")]
    pub validated_at: Option<DateTime<Utc>>,
}

impl From<Code> for CodeResponse {
    fn from(code: Code) -> Self {
        Self {
            id: code.id,
            code: code.code,
            campaign_id: code.campaign_id,
            phone: code.phone,
            prize: code.prize,
            status: code.status,
            created_at: code.created_at,
            updated_at: code.updated_at,
            validated_at: code.validated_at,
        }
    }
}

/// Player view of a code: where it stands and which page comes next.
#[derive(Serialize)]
pub struct PlayerCodeResponse {
    pub code: String,
    pub status: CodeStatus,
    pub redirect: &'static str,
}

impl From<&Code> for PlayerCodeResponse {
    fn from(code: &Code) -> Self {
        Self {
            code: code.code.clone(),
            status: code.status,
            redirect: code.status.redirect_path(),
        }
    }
}

// ── POST /campaigns/{id}/codes ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueCodeRequest {
    pub phone: String,
}

pub async fn issue_code(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(body): Json<IssueCodeRequest>,
) -> Result<(StatusCode, Json<CodeResponse>), SorteServiceError> {
    let usecase = IssueCodeUseCase {
        campaigns: state.campaign_repo(),
        codes: state.code_repo(),
    };
    let code = usecase
        .execute(&identity.actor(), campaign_id, &body.phone)
        .await?;
    Ok((StatusCode::CREATED, Json(code.into())))
}

// ── POST /campaigns/{id}/codes/send ──────────────────────────────────────────

pub async fn send_code(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(body): Json<IssueCodeRequest>,
) -> Result<(StatusCode, Json<CodeResponse>), SorteServiceError> {
    let usecase = SendCodeUseCase {
        campaigns: state.campaign_repo(),
        codes: state.code_repo(),
        whatsapp: state.whatsapp(),
        public_base_url: state.public_base_url.clone(),
    };
    let code = usecase
        .execute(&identity.actor(), campaign_id, &body.phone)
        .await?;
    Ok((StatusCode::CREATED, Json(code.into())))
}

// ── GET /campaigns/{id}/codes ────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CodeListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<String>,
}

pub async fn list_codes(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<CodeResponse>>, SorteServiceError> {
    let query: CodeListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| SorteServiceError::MissingData)?
        .unwrap_or_default();
    let status = match query.status.as_deref() {
        Some(s) => Some(CodeStatus::parse(s).ok_or(SorteServiceError::MissingData)?),
        None => None,
    };

    let usecase = ListCodesUseCase {
        campaigns: state.campaign_repo(),
        codes: state.code_repo(),
    };
    let codes = usecase
        .execute(
            &identity.actor(),
            campaign_id,
            status,
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(codes.into_iter().map(Into::into).collect()))
}

// ── GET /codes/{code} ────────────────────────────────────────────────────────

pub async fn get_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PlayerCodeResponse>, SorteServiceError> {
    let usecase = GetCodeUseCase {
        codes: state.code_repo(),
    };
    let code = usecase.execute(&code).await?;
    Ok(Json(PlayerCodeResponse::from(&code)))
}
