use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sorte_domain::code_status::{CodeStatus, InvalidTransition};

/// Sorte service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum SorteServiceError {
    #[error("campaign not found")]
    CampaignNotFound,
    #[error("code not found")]
    CodeNotFound,
    #[error("voucher not found")]
    VoucherNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid campaign: {0}")]
    InvalidCampaign(String),
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("missing data")]
    MissingData,
    #[error("code is in status `{0}`")]
    InvalidCodeStatus(CodeStatus),
    #[error("code was updated concurrently")]
    CodeUpdatedConcurrently,
    #[error("campaign status cannot change")]
    InvalidCampaignStatus,
    #[error("campaign is not accepting plays")]
    CampaignUnavailable,
    #[error("no positions left")]
    NoPositionsLeft,
    #[error("positions are busy, try again")]
    PositionsBusy,
    #[error("voucher already used")]
    VoucherAlreadyUsed,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("forbidden")]
    Forbidden,
    #[error("whatsapp service unavailable")]
    WhatsAppUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SorteServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CampaignNotFound => "CAMPAIGN_NOT_FOUND",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::VoucherNotFound => "VOUCHER_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidCampaign(_) => "INVALID_CAMPAIGN",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCodeStatus(_) => "INVALID_CODE_STATUS",
            Self::CodeUpdatedConcurrently => "CODE_UPDATED_CONCURRENTLY",
            Self::InvalidCampaignStatus => "INVALID_CAMPAIGN_STATUS",
            Self::CampaignUnavailable => "CAMPAIGN_UNAVAILABLE",
            Self::NoPositionsLeft => "NO_POSITIONS_LEFT",
            Self::PositionsBusy => "POSITIONS_BUSY",
            Self::VoucherAlreadyUsed => "VOUCHER_ALREADY_USED",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Forbidden => "FORBIDDEN",
            Self::WhatsAppUnavailable => "WHATSAPP_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<InvalidTransition> for SorteServiceError {
    fn from(err: InvalidTransition) -> Self {
        Self::InvalidCodeStatus(err.from)
    }
}

impl IntoResponse for SorteServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CampaignNotFound
            | Self::CodeNotFound
            | Self::VoucherNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCampaign(_) | Self::InvalidPhone | Self::MissingData => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCodeStatus(_)
            | Self::CodeUpdatedConcurrently
            | Self::InvalidCampaignStatus
            | Self::CampaignUnavailable
            | Self::NoPositionsLeft
            | Self::PositionsBusy
            | Self::VoucherAlreadyUsed
            | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::WhatsAppUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::InvalidCodeStatus(current) = self {
            body["status"] = serde_json::json!(current);
            body["redirect"] = serde_json::json!(current.redirect_path());
        }
        (status, axum::Json(body)).into_response()
    }
}
