use anyhow::Context as _;
use serde_json::{Value, json};

use sorte_auth_types::bot_token::mint_bot_token;

use crate::domain::repository::WhatsAppPort;
use crate::error::SorteServiceError;

/// HTTP client for the external WhatsApp bot.
///
/// Every call carries a freshly minted HS256 bearer token whose `sub` is the
/// bot session the request targets.
#[derive(Clone)]
pub struct HttpWhatsAppClient {
    pub client: reqwest::Client,
    pub base_url: String,
    pub secret: String,
    pub token_ttl_secs: u64,
}

impl HttpWhatsAppClient {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn token(&self, subject: &str) -> Result<String, SorteServiceError> {
        let token = mint_bot_token(subject, &self.secret, self.token_ttl_secs)
            .context("mint whatsapp bot token")?;
        Ok(token)
    }

    async fn forward(&self, request: reqwest::RequestBuilder) -> Result<Value, SorteServiceError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "whatsapp bot unreachable");
            SorteServiceError::WhatsAppUnavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "whatsapp bot rejected request");
            return Err(SorteServiceError::WhatsAppUnavailable);
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "whatsapp bot response interrupted");
            SorteServiceError::WhatsAppUnavailable
        })?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "whatsapp bot returned invalid json");
            SorteServiceError::WhatsAppUnavailable
        })
    }
}

impl WhatsAppPort for HttpWhatsAppClient {
    async fn send(
        &self,
        subject: &str,
        phone: &str,
        message: &str,
    ) -> Result<Value, SorteServiceError> {
        let request = self
            .client
            .post(self.url("/send"))
            .bearer_auth(self.token(subject)?)
            .json(&json!({ "phone": phone, "message": message }));
        self.forward(request).await
    }

    async fn status(&self, subject: &str) -> Result<Value, SorteServiceError> {
        let request = self
            .client
            .get(self.url("/status"))
            .bearer_auth(self.token(subject)?);
        self.forward(request).await
    }

    async fn qr(&self, subject: &str) -> Result<Value, SorteServiceError> {
        let request = self
            .client
            .get(self.url("/qr"))
            .bearer_auth(self.token(subject)?);
        self.forward(request).await
    }
}
