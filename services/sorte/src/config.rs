use serde::Deserialize;

use sorte_auth_types::bot_token::BOT_TOKEN_TTL_SECS;
use sorte_core::config::Config;

/// Sorte service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct SorteConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `SORTE_PORT`.
    #[serde(default = "default_port")]
    pub sorte_port: u16,
    /// Base URL of the WhatsApp bot service (e.g. "http://whatsapp-bot:3001").
    pub whatsapp_bot_url: String,
    /// HMAC secret shared with the WhatsApp bot.
    pub whatsapp_bot_secret: String,
    /// Lifetime of minted bot tokens in seconds (default 60).
    #[serde(default = "default_token_ttl")]
    pub whatsapp_token_ttl_secs: u64,
    /// Player-facing site, used in messages sent to participants.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Config for SorteConfig {}

fn default_port() -> u16 {
    3120
}

fn default_token_ttl() -> u64 {
    BOT_TOKEN_TTL_SECS
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_owned()
}
