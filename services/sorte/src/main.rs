use sea_orm::Database;
use tracing::info;

use sorte::config::SorteConfig;
use sorte::infra::whatsapp::HttpWhatsAppClient;
use sorte::router::build_router;
use sorte::state::AppState;
use sorte_core::config::Config as _;
use sorte_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = SorteConfig::from_env().expect("invalid sorte configuration");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let whatsapp = HttpWhatsAppClient {
        client: reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client"),
        base_url: config.whatsapp_bot_url.clone(),
        secret: config.whatsapp_bot_secret.clone(),
        token_ttl_secs: config.whatsapp_token_ttl_secs,
    };

    let state = AppState {
        db,
        whatsapp,
        public_base_url: config.public_base_url.clone(),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.sorte_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("sorte service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
