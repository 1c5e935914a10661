//! Short-lived bearer tokens for the WhatsApp bot service.
//!
//! The bot shares an HMAC secret with this service and accepts any HS256
//! token whose `exp` is in the future. Tokens are minted per request and
//! never stored.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default token lifetime in seconds.
pub const BOT_TOKEN_TTL_SECS: u64 = 60;

/// Claims carried by a bot token.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | business id the bot session belongs to, or `admin` |
/// | `iat` | issue time, seconds since epoch |
/// | `exp` | expiry, seconds since epoch |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum BotTokenError {
    #[error("system clock is before the UNIX epoch")]
    Clock,
    #[error("token encoding failed: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("token rejected: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

fn now_secs() -> Result<u64, BotTokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| BotTokenError::Clock)
}

/// Mint a token for `subject` valid for `ttl_secs` seconds.
pub fn mint_bot_token(subject: &str, secret: &str, ttl_secs: u64) -> Result<String, BotTokenError> {
    let iat = now_secs()?;
    let claims = BotClaims {
        sub: subject.to_owned(),
        iat,
        exp: iat + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(BotTokenError::Encode)
}

/// Decode and verify a bot token (HS256, `exp` and `sub` required).
pub fn decode_bot_token(token: &str, secret: &str) -> Result<BotClaims, BotTokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<BotClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(BotTokenError::Invalid)
}
