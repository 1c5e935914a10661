use serde_json::Value;

use sorte_domain::phone::normalize_phone;
use sorte_domain::user::Actor;

use crate::domain::repository::WhatsAppPort;
use crate::error::SorteServiceError;

/// Bot session of the actor: its business, or the shared admin session.
pub fn bot_subject(actor: &Actor) -> String {
    actor
        .business_id
        .map_or_else(|| "admin".to_owned(), |id| id.to_string())
}

pub struct WhatsAppProxyUseCase<W: WhatsAppPort> {
    pub whatsapp: W,
}

impl<W: WhatsAppPort> WhatsAppProxyUseCase<W> {
    pub async fn send(
        &self,
        actor: &Actor,
        phone: &str,
        message: &str,
    ) -> Result<Value, SorteServiceError> {
        let phone = normalize_phone(phone).ok_or(SorteServiceError::InvalidPhone)?;
        if message.trim().is_empty() {
            return Err(SorteServiceError::MissingData);
        }
        self.whatsapp
            .send(&bot_subject(actor), &phone, message)
            .await
    }

    pub async fn status(&self, actor: &Actor) -> Result<Value, SorteServiceError> {
        self.whatsapp.status(&bot_subject(actor)).await
    }

    pub async fn qr(&self, actor: &Actor) -> Result<Value, SorteServiceError> {
        self.whatsapp.qr(&bot_subject(actor)).await
    }
}
