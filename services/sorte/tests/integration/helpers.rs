use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use sorte::domain::repository::{
    CampaignRepository, CodeRepository, UserRepository, VoucherRepository, WhatsAppPort,
};
use sorte::domain::types::{
    Campaign, CampaignCounts, Code, IssueOutcome, NewCode, Position, User, Voucher,
    VoucherOutcome, Winner,
};
use sorte::error::SorteServiceError;
use sorte::usecase::campaign::{CreateCampaignInput, CreateCampaignUseCase, PrizeInput};
use sorte::usecase::code::IssueCodeUseCase;
use sorte_domain::campaign::{CampaignMode, CampaignStatus, GameKind, VoucherStatus};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;
use sorte_domain::user::Actor;
use sorte_testing::auth::MockAuth;

pub const PHONE: &str = "+55 (11) 99999-0000";

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub campaigns: Vec<Campaign>,
    pub positions: Vec<Position>,
    pub codes: Vec<Code>,
    pub winners: Vec<Winner>,
    pub vouchers: Vec<Voucher>,
    /// Upcoming `issue` calls that report a lost position race.
    pub contended_issues: usize,
    /// Upcoming `issue` calls whose code string is already stored.
    pub code_collisions: usize,
    /// Upcoming `create_for_code` calls whose voucher string is already stored.
    pub voucher_collisions: usize,
}

/// In-memory stand-in for every repository, shared between use cases.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub inner: Arc<Mutex<Store>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        f(&mut self.inner.lock().unwrap())
    }

    pub fn code(&self, id: Uuid) -> Code {
        self.with(|s| s.codes.iter().find(|c| c.id == id).cloned().unwrap())
    }

    pub fn campaign(&self, id: Uuid) -> Campaign {
        self.with(|s| s.campaigns.iter().find(|c| c.id == id).cloned().unwrap())
    }

    pub fn position(&self, id: Uuid) -> Position {
        self.with(|s| s.positions.iter().find(|p| p.id == id).cloned().unwrap())
    }
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SorteServiceError> {
        Ok(self.with(|s| s.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SorteServiceError> {
        Ok(self.with(|s| s.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn create(&self, user: &User) -> Result<(), SorteServiceError> {
        self.with(|s| {
            if s.users.iter().any(|u| u.email == user.email) {
                return Err(SorteServiceError::UserAlreadyExists);
            }
            s.users.push(user.clone());
            Ok(())
        })
    }
}

impl CampaignRepository for MemoryStore {
    async fn create_with_positions(
        &self,
        campaign: &Campaign,
        slots: &[Option<String>],
    ) -> Result<(), SorteServiceError> {
        self.with(|s| {
            s.campaigns.push(campaign.clone());
            s.positions
                .extend(slots.iter().enumerate().map(|(index, prize)| Position {
                    id: Uuid::new_v4(),
                    campaign_id: campaign.id,
                    index: index as u32,
                    prize: prize.clone(),
                    used: false,
                    sent: false,
                }));
        });
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Campaign>, SorteServiceError> {
        Ok(self.with(|s| s.campaigns.iter().find(|c| c.id == id).cloned()))
    }

    async fn list(
        &self,
        business_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Campaign>, SorteServiceError> {
        let mut campaigns: Vec<Campaign> = self.with(|s| {
            s.campaigns
                .iter()
                .filter(|c| business_id.is_none_or(|b| c.business_id == b))
                .cloned()
                .collect()
        });
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(&campaigns, page))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<(), SorteServiceError> {
        self.with(|s| {
            if let Some(c) = s.campaigns.iter_mut().find(|c| c.id == id) {
                c.status = status;
                c.updated_at = Utc::now();
            }
        });
        Ok(())
    }

    async fn counts(&self, id: Uuid) -> Result<CampaignCounts, SorteServiceError> {
        Ok(self.with(|s| {
            let codes: Vec<&Code> = s.codes.iter().filter(|c| c.campaign_id == id).collect();
            let codes_by_status = CodeStatus::ALL
                .iter()
                .map(|status| {
                    let n = codes.iter().filter(|c| c.status == *status).count() as u64;
                    (*status, n)
                })
                .filter(|(_, n)| *n > 0)
                .collect();
            let positions = s.positions.iter().filter(|p| p.campaign_id == id);
            let vouchers: Vec<&Voucher> = s
                .vouchers
                .iter()
                .filter(|v| codes.iter().any(|c| c.id == v.code_id))
                .collect();
            CampaignCounts {
                codes_by_status,
                positions_used: positions.clone().filter(|p| p.used).count() as u64,
                positions_sent: positions.filter(|p| p.sent).count() as u64,
                vouchers_issued: vouchers.len() as u64,
                vouchers_redeemed: vouchers
                    .iter()
                    .filter(|v| v.status == VoucherStatus::Usado)
                    .count() as u64,
            }
        }))
    }
}

fn cas_status(s: &mut Store, code_id: Uuid, from: CodeStatus, to: CodeStatus) -> bool {
    match s
        .codes
        .iter_mut()
        .find(|c| c.id == code_id && c.status == from)
    {
        Some(code) => {
            code.status = to;
            code.updated_at = Utc::now();
            true
        }
        None => false,
    }
}

impl CodeRepository for MemoryStore {
    async fn code_exists(&self, code: &str) -> Result<bool, SorteServiceError> {
        Ok(self.with(|s| s.codes.iter().any(|c| c.code == code)))
    }

    async fn issue(
        &self,
        campaign_id: Uuid,
        new_code: &NewCode,
    ) -> Result<IssueOutcome, SorteServiceError> {
        Ok(self.with(|s| {
            if s.contended_issues > 0 {
                s.contended_issues -= 1;
                return IssueOutcome::Contended;
            }
            if s.code_collisions > 0 {
                s.code_collisions -= 1;
                return IssueOutcome::CodeTaken;
            }
            let Some(position) = s
                .positions
                .iter_mut()
                .find(|p| p.campaign_id == campaign_id && !p.used)
            else {
                return IssueOutcome::Exhausted;
            };
            position.used = true;
            let code = new_code.clone().into_code(campaign_id, position);
            s.codes.push(code.clone());
            IssueOutcome::Issued(code)
        }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Code>, SorteServiceError> {
        Ok(self.with(|s| s.codes.iter().find(|c| c.code == code).cloned()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Code>, SorteServiceError> {
        Ok(self.with(|s| s.codes.iter().find(|c| c.id == id).cloned()))
    }

    async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        status: Option<CodeStatus>,
        page: PageRequest,
    ) -> Result<Vec<Code>, SorteServiceError> {
        let mut codes: Vec<Code> = self.with(|s| {
            s.codes
                .iter()
                .filter(|c| c.campaign_id == campaign_id)
                .filter(|c| status.is_none_or(|st| c.status == st))
                .cloned()
                .collect()
        });
        codes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(&codes, page))
    }

    async fn mark_sent(&self, position_id: Uuid) -> Result<(), SorteServiceError> {
        self.with(|s| {
            if let Some(p) = s.positions.iter_mut().find(|p| p.id == position_id) {
                p.sent = true;
            }
        });
        Ok(())
    }

    async fn validate(&self, code: &Code, at: DateTime<Utc>) -> Result<bool, SorteServiceError> {
        Ok(self.with(|s| {
            if !cas_status(s, code.id, CodeStatus::Ativo, CodeStatus::Validado) {
                return false;
            }
            if let Some(stored) = s.codes.iter_mut().find(|c| c.id == code.id) {
                stored.validated_at = Some(at);
            }
            if let Some(campaign) = s.campaigns.iter_mut().find(|c| c.id == code.campaign_id) {
                campaign.remaining_scratch_cards = campaign.remaining_scratch_cards.saturating_sub(1);
                if code.has_prize() {
                    campaign.remaining_prizes = campaign.remaining_prizes.saturating_sub(1);
                }
            }
            true
        }))
    }

    async fn transition(
        &self,
        code_id: Uuid,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<bool, SorteServiceError> {
        Ok(self.with(|s| cas_status(s, code_id, from, to)))
    }

    async fn submit_winner(
        &self,
        winner: &Winner,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<bool, SorteServiceError> {
        Ok(self.with(|s| {
            if !cas_status(s, winner.code_id, from, to) {
                return false;
            }
            s.winners.push(winner.clone());
            true
        }))
    }
}

impl VoucherRepository for MemoryStore {
    async fn voucher_exists(&self, voucher: &str) -> Result<bool, SorteServiceError> {
        Ok(self.with(|s| s.vouchers.iter().any(|v| v.voucher == voucher)))
    }

    async fn find_by_code_id(&self, code_id: Uuid) -> Result<Option<Voucher>, SorteServiceError> {
        Ok(self.with(|s| s.vouchers.iter().find(|v| v.code_id == code_id).cloned()))
    }

    async fn find_by_voucher(&self, voucher: &str) -> Result<Option<Voucher>, SorteServiceError> {
        Ok(self.with(|s| s.vouchers.iter().find(|v| v.voucher == voucher).cloned()))
    }

    async fn create_for_code(
        &self,
        voucher: &Voucher,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<VoucherOutcome, SorteServiceError> {
        Ok(self.with(|s| {
            if s.voucher_collisions > 0 {
                s.voucher_collisions -= 1;
                return VoucherOutcome::VoucherTaken;
            }
            if !cas_status(s, voucher.code_id, from, to) {
                return VoucherOutcome::CodeMoved;
            }
            s.vouchers.push(voucher.clone());
            VoucherOutcome::Created
        }))
    }

    async fn redeem(&self, voucher: &Voucher, at: DateTime<Utc>) -> Result<bool, SorteServiceError> {
        Ok(self.with(|s| {
            let valid = s
                .vouchers
                .iter()
                .any(|v| v.id == voucher.id && v.status == VoucherStatus::Valido);
            if !valid
                || !cas_status(
                    s,
                    voucher.code_id,
                    CodeStatus::VoucherGerado,
                    CodeStatus::Encerrado,
                )
            {
                return false;
            }
            if let Some(v) = s.vouchers.iter_mut().find(|v| v.id == voucher.id) {
                v.status = VoucherStatus::Usado;
                v.used_at = Some(at);
            }
            true
        }))
    }
}

// ── MockWhatsApp ─────────────────────────────────────────────────────────────

/// A message handed to the bot: `(subject, phone, message)`.
pub type SentMessage = (String, String, String);

#[derive(Clone, Default)]
pub struct MockWhatsApp {
    pub sent: Arc<Mutex<Vec<SentMessage>>>,
    pub fail: bool,
}

impl MockWhatsApp {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl WhatsAppPort for MockWhatsApp {
    async fn send(
        &self,
        subject: &str,
        phone: &str,
        message: &str,
    ) -> Result<Value, SorteServiceError> {
        if self.fail {
            return Err(SorteServiceError::WhatsAppUnavailable);
        }
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_owned(), phone.to_owned(), message.to_owned()));
        Ok(json!({ "sent": true }))
    }

    async fn status(&self, subject: &str) -> Result<Value, SorteServiceError> {
        if self.fail {
            return Err(SorteServiceError::WhatsAppUnavailable);
        }
        Ok(json!({ "session": subject, "connected": true }))
    }

    async fn qr(&self, subject: &str) -> Result<Value, SorteServiceError> {
        if self.fail {
            return Err(SorteServiceError::WhatsAppUnavailable);
        }
        Ok(json!({ "session": subject, "qr": "data:image/png;base64,AAAA" }))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn owner(business_id: Uuid) -> Actor {
    MockAuth::empresa(business_id).actor()
}

pub fn employee(business_id: Uuid) -> Actor {
    MockAuth::funcionario(business_id).actor()
}

pub fn admin() -> Actor {
    MockAuth::admin().actor()
}

pub fn campaign_input(total_scratch_cards: u32, prizes: &[(&str, u32)]) -> CreateCampaignInput {
    CreateCampaignInput {
        business_id: None,
        name: "Festival da Sorte".into(),
        game: GameKind::Raspadinha,
        mode: CampaignMode::Quantidade,
        starts_at: None,
        ends_at: None,
        total_scratch_cards,
        prizes: prizes
            .iter()
            .map(|(name, quantity)| PrizeInput {
                name: (*name).to_owned(),
                image_url: Some(format!("https://cdn.example.com/{name}.png")),
                quantity: *quantity,
            })
            .collect(),
    }
}

/// Create a campaign owned by `business_id`.
pub async fn seed_campaign(
    store: &MemoryStore,
    business_id: Uuid,
    total_scratch_cards: u32,
    prizes: &[(&str, u32)],
) -> Campaign {
    CreateCampaignUseCase {
        repo: store.clone(),
    }
    .execute(
        &owner(business_id),
        campaign_input(total_scratch_cards, prizes),
    )
    .await
    .unwrap()
}

/// Issue one code of the campaign as its owner.
pub async fn seed_code(store: &MemoryStore, campaign: &Campaign) -> Code {
    IssueCodeUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
    }
    .execute(&owner(campaign.business_id), campaign.id, PHONE)
    .await
    .unwrap()
}
