use chrono::{DateTime, Utc};
use rand::RngExt;
use uuid::Uuid;

use sorte_domain::campaign::{
    CampaignMode, CampaignStatus, GameKind, VoucherStatus, within_window,
};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::user::AccessLevel;

/// Dashboard user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub access_level: AccessLevel,
    pub business_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Prize definition as entered by the campaign owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prize {
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub game: GameKind,
    pub mode: CampaignMode,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub total_scratch_cards: u32,
    pub remaining_scratch_cards: u32,
    pub total_prizes: u32,
    pub remaining_prizes: u32,
    pub prizes: Vec<Prize>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Whether codes of this campaign can be issued or played at `now`.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        if self.status != CampaignStatus::Ativa {
            return false;
        }
        match self.mode {
            CampaignMode::Quantidade => true,
            CampaignMode::Periodo => within_window(self.starts_at, self.ends_at, now),
        }
    }

    pub fn prize(&self, name: &str) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.name == name)
    }
}

/// Pre-shuffled prize slot of a campaign.
#[derive(Debug, Clone)]
pub struct Position {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub index: u32,
    pub prize: Option<String>,
    pub used: bool,
    pub sent: bool,
}

/// Raffle code held by one participant.
#[derive(Debug, Clone)]
pub struct Code {
    pub id: Uuid,
    pub code: String,
    pub campaign_id: Uuid,
    pub position_id: Uuid,
    pub phone: String,
    pub prize: Option<String>,
    pub status: CodeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
}

impl Code {
    pub fn has_prize(&self) -> bool {
        self.prize.is_some()
    }
}

/// Fields of a code chosen before a position is claimed.
#[derive(Debug, Clone)]
pub struct NewCode {
    pub id: Uuid,
    pub code: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl NewCode {
    /// Complete the code with the position it claimed.
    pub fn into_code(self, campaign_id: Uuid, position: &Position) -> Code {
        Code {
            id: self.id,
            code: self.code,
            campaign_id,
            position_id: position.id,
            phone: self.phone,
            prize: position.prize.clone(),
            status: CodeStatus::Ativo,
            created_at: self.created_at,
            updated_at: self.created_at,
            validated_at: None,
        }
    }
}

/// Result of trying to claim a position for a new code.
#[derive(Debug)]
pub enum IssueOutcome {
    Issued(Code),
    /// The picked position was claimed by a concurrent request.
    Contended,
    /// Another request stored the same code string first.
    CodeTaken,
    /// No unused positions remain.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Winner {
    pub id: Uuid,
    pub code_id: Uuid,
    pub campaign_id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Result of storing a voucher for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherOutcome {
    Created,
    /// The code was not in the expected status.
    CodeMoved,
    /// Another voucher already uses the same string.
    VoucherTaken,
}

#[derive(Debug, Clone)]
pub struct Voucher {
    pub id: Uuid,
    pub voucher: String,
    pub code_id: Uuid,
    pub status: VoucherStatus,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

/// Raw counters read from storage for campaign tracking.
#[derive(Debug, Clone, Default)]
pub struct CampaignCounts {
    pub codes_by_status: Vec<(CodeStatus, u64)>,
    pub positions_used: u64,
    pub positions_sent: u64,
    pub vouchers_issued: u64,
    pub vouchers_redeemed: u64,
}

/// Participant code length.
pub const CODE_LEN: usize = 8;

/// Voucher length.
pub const VOUCHER_LEN: usize = 6;

/// Upper bound on scratch cards per campaign.
pub const MAX_SCRATCH_CARDS: u32 = 100_000;

/// Attempts to claim a position before giving up on contention.
pub const MAX_ISSUE_ATTEMPTS: usize = 3;

/// Attempts to draw an unused random code or voucher string.
pub const MAX_CODE_GENERATION_ATTEMPTS: usize = 5;

/// Rows per `INSERT` when writing campaign positions.
pub const POSITION_BATCH_SIZE: usize = 500;

/// Charset for codes and vouchers (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Canonical form of a code or voucher typed by a participant.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
