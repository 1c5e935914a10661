use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use sorte_auth_types::identity::IdentityHeaders;
use sorte_core::extract::{Json, Path};
use sorte_domain::campaign::VoucherStatus;
use sorte_domain::code_status::CodeStatus;

use crate::error::SorteServiceError;
use crate::handlers::code::prize_or_none;
use crate::state::AppState;
use crate::usecase::voucher::{
    GenerateVoucherUseCase, GetVoucherUseCase, RedeemVoucherUseCase, VoucherDetails,
};

#[derive(Serialize)]
pub struct VoucherResponse {
    pub voucher: String,
    pub status: VoucherStatus,
    pub code: String,
    pub code_status: CodeStatus,
    pub campaign_id: Uuid,
    #[serde(serialize_with = "prize_or_none")]
    pub prize: Option<String>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms_opt")]
    pub used_at: Option<DateTime<Utc>>,
}

impl From<VoucherDetails> for VoucherResponse {
    fn from(VoucherDetails { voucher, code }: VoucherDetails) -> Self {
        Self {
            voucher: voucher.voucher,
            status: voucher.status,
            code: code.code,
            code_status: code.status,
            campaign_id: code.campaign_id,
            prize: code.prize,
            created_at: voucher.created_at,
            used_at: voucher.used_at,
        }
    }
}

// ── POST /codes/{code}/voucher ───────────────────────────────────────────────

pub async fn generate_voucher(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<VoucherResponse>, SorteServiceError> {
    let usecase = GenerateVoucherUseCase {
        codes: state.code_repo(),
        vouchers: state.voucher_repo(),
    };
    let details = usecase.execute(&code).await?;
    Ok(Json(details.into()))
}

// ── GET /vouchers/{voucher} ──────────────────────────────────────────────────

pub async fn get_voucher(
    State(state): State<AppState>,
    Path(voucher): Path<String>,
) -> Result<Json<VoucherResponse>, SorteServiceError> {
    let usecase = GetVoucherUseCase {
        codes: state.code_repo(),
        vouchers: state.voucher_repo(),
    };
    let details = usecase.execute(&voucher).await?;
    Ok(Json(details.into()))
}

// ── POST /vouchers/{voucher}/redeem ──────────────────────────────────────────

pub async fn redeem_voucher(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(voucher): Path<String>,
) -> Result<Json<VoucherResponse>, SorteServiceError> {
    let usecase = RedeemVoucherUseCase {
        campaigns: state.campaign_repo(),
        codes: state.code_repo(),
        vouchers: state.voucher_repo(),
    };
    let details = usecase.execute(&identity.actor(), &voucher).await?;
    Ok(Json(details.into()))
}
