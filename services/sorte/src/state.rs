use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCampaignRepository, DbCodeRepository, DbUserRepository, DbVoucherRepository,
};
use crate::infra::whatsapp::HttpWhatsAppClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub whatsapp: HttpWhatsAppClient,
    /// Player-facing site linked from WhatsApp messages.
    pub public_base_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn campaign_repo(&self) -> DbCampaignRepository {
        DbCampaignRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_repo(&self) -> DbCodeRepository {
        DbCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn voucher_repo(&self) -> DbVoucherRepository {
        DbVoucherRepository {
            db: self.db.clone(),
        }
    }

    pub fn whatsapp(&self) -> HttpWhatsAppClient {
        self.whatsapp.clone()
    }
}
