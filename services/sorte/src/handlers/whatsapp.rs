use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use sorte_auth_types::identity::IdentityHeaders;
use sorte_core::extract::Json;

use crate::error::SorteServiceError;
use crate::state::AppState;
use crate::usecase::whatsapp::WhatsAppProxyUseCase;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub phone: String,
    pub message: String,
}

// ── POST /whatsapp/send ──────────────────────────────────────────────────────

pub async fn send_message(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Value>, SorteServiceError> {
    let usecase = WhatsAppProxyUseCase {
        whatsapp: state.whatsapp(),
    };
    let body = usecase
        .send(&identity.actor(), &body.phone, &body.message)
        .await?;
    Ok(Json(body))
}

// ── GET /whatsapp/status ─────────────────────────────────────────────────────

pub async fn get_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Value>, SorteServiceError> {
    let usecase = WhatsAppProxyUseCase {
        whatsapp: state.whatsapp(),
    };
    Ok(Json(usecase.status(&identity.actor()).await?))
}

// ── GET /whatsapp/qr ─────────────────────────────────────────────────────────

pub async fn get_qr(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Value>, SorteServiceError> {
    let usecase = WhatsAppProxyUseCase {
        whatsapp: state.whatsapp(),
    };
    Ok(Json(usecase.qr(&identity.actor()).await?))
}
