#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use sorte_domain::campaign::CampaignStatus;
use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;

use crate::domain::types::{
    Campaign, CampaignCounts, Code, IssueOutcome, NewCode, User, Voucher, VoucherOutcome, Winner,
};
use crate::error::SorteServiceError;

/// Repository for dashboard users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SorteServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SorteServiceError>;
    async fn create(&self, user: &User) -> Result<(), SorteServiceError>;
}

/// Repository for campaigns, their prize definitions and positions.
pub trait CampaignRepository: Send + Sync {
    /// Insert the campaign, its prizes and one position per slot atomically.
    async fn create_with_positions(
        &self,
        campaign: &Campaign,
        slots: &[Option<String>],
    ) -> Result<(), SorteServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Campaign>, SorteServiceError>;

    /// Newest first. `business_id = None` lists every business.
    async fn list(
        &self,
        business_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Campaign>, SorteServiceError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<(), SorteServiceError>;

    async fn counts(&self, id: Uuid) -> Result<CampaignCounts, SorteServiceError>;
}

/// Repository for participant codes.
///
/// Status changes are compare-and-set: they return `false` without writing
/// when the stored status is no longer `from`.
pub trait CodeRepository: Send + Sync {
    async fn code_exists(&self, code: &str) -> Result<bool, SorteServiceError>;

    /// Claim a random unused position of the campaign and insert the code,
    /// in one transaction.
    async fn issue(
        &self,
        campaign_id: Uuid,
        new_code: &NewCode,
    ) -> Result<IssueOutcome, SorteServiceError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Code>, SorteServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Code>, SorteServiceError>;

    /// Newest first, optionally filtered by status.
    async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        status: Option<CodeStatus>,
        page: PageRequest,
    ) -> Result<Vec<Code>, SorteServiceError>;

    /// Flag the code's position as delivered to the participant.
    async fn mark_sent(&self, position_id: Uuid) -> Result<(), SorteServiceError>;

    /// Move `ativo` → `validado` and decrement the campaign's remaining
    /// scratch cards (and prizes, if the code has one) atomically.
    async fn validate(&self, code: &Code, at: DateTime<Utc>) -> Result<bool, SorteServiceError>;

    async fn transition(
        &self,
        code_id: Uuid,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<bool, SorteServiceError>;

    /// Insert the winner and move the code from `from` to `to` atomically.
    async fn submit_winner(
        &self,
        winner: &Winner,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<bool, SorteServiceError>;
}

/// Repository for winner vouchers.
pub trait VoucherRepository: Send + Sync {
    async fn voucher_exists(&self, voucher: &str) -> Result<bool, SorteServiceError>;

    async fn find_by_code_id(&self, code_id: Uuid) -> Result<Option<Voucher>, SorteServiceError>;

    async fn find_by_voucher(&self, voucher: &str) -> Result<Option<Voucher>, SorteServiceError>;

    /// Insert the voucher and move its code from `from` to `to` atomically.
    async fn create_for_code(
        &self,
        voucher: &Voucher,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<VoucherOutcome, SorteServiceError>;

    /// Mark the voucher `usado` and close its code atomically. `false` if the
    /// voucher was already used or the code moved on.
    async fn redeem(
        &self,
        voucher: &Voucher,
        at: DateTime<Utc>,
    ) -> Result<bool, SorteServiceError>;
}

/// Port for the external WhatsApp bot service.
///
/// `subject` identifies the bot session (business id or `admin`). Responses
/// are the bot's JSON bodies, forwarded unchanged.
pub trait WhatsAppPort: Send + Sync {
    async fn send(
        &self,
        subject: &str,
        phone: &str,
        message: &str,
    ) -> Result<Value, SorteServiceError>;

    async fn status(&self, subject: &str) -> Result<Value, SorteServiceError>;

    async fn qr(&self, subject: &str) -> Result<Value, SorteServiceError>;
}
