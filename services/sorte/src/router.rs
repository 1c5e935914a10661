use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use sorte_core::error::not_found;
use sorte_core::health::healthz;
use sorte_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    campaign::{
        create_campaign, get_campaign, get_campaign_stats, list_campaigns, update_campaign_status,
    },
    code::{get_code, issue_code, list_codes, send_code},
    game::{finish_game, start_game, submit_winner, validate_code},
    health::readyz,
    user::{create_user, get_me},
    voucher::{generate_voucher, get_voucher, redeem_voucher},
    whatsapp::{get_qr, get_status, send_message},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        .route("/users/@me", get(get_me))
        // Campaigns
        .route("/campaigns", post(create_campaign).get(list_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
        .route("/campaigns/{id}/status", patch(update_campaign_status))
        .route("/campaigns/{id}/stats", get(get_campaign_stats))
        // Codes (dashboard)
        .route("/campaigns/{id}/codes", post(issue_code).get(list_codes))
        .route("/campaigns/{id}/codes/send", post(send_code))
        // Codes (player)
        .route("/codes/{code}", get(get_code))
        .route("/codes/{code}/validate", post(validate_code))
        .route("/codes/{code}/game/start", post(start_game))
        .route("/codes/{code}/game/finish", post(finish_game))
        .route("/codes/{code}/winner", post(submit_winner))
        .route("/codes/{code}/voucher", post(generate_voucher))
        // Vouchers
        .route("/vouchers/{voucher}", get(get_voucher))
        .route("/vouchers/{voucher}/redeem", post(redeem_voucher))
        // WhatsApp bot proxy
        .route("/whatsapp/send", post(send_message))
        .route("/whatsapp/status", get(get_status))
        .route("/whatsapp/qr", get(get_qr))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
