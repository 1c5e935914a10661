//! Repository behavior that only a real Postgres can show: unique indexes,
//! row locks and guarded counters.
//!
//! Run with `SORTE_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use chrono::Utc;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::sync::OnceCell;
use tokio::task::JoinSet;
use uuid::Uuid;

use sorte::domain::repository::{
    CampaignRepository, CodeRepository, UserRepository, VoucherRepository,
};
use sorte::domain::types::{
    CODE_LEN, Campaign, Code, IssueOutcome, NewCode, Prize, User, VOUCHER_LEN, Voucher,
    VoucherOutcome, generate_code,
};
use sorte::error::SorteServiceError;
use sorte::infra::db::{
    DbCampaignRepository, DbCodeRepository, DbUserRepository, DbVoucherRepository,
};
use sorte_domain::campaign::{CampaignMode, CampaignStatus, GameKind, VoucherStatus};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::user::AccessLevel;
use sorte_migration::Migrator;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn connect() -> DatabaseConnection {
    let url = std::env::var("SORTE_TEST_DATABASE_URL").expect("SORTE_TEST_DATABASE_URL");
    let db = Database::connect(&url).await.expect("connect to test database");
    MIGRATED
        .get_or_init(|| async {
            Migrator::up(&db, None).await.expect("run migrations");
        })
        .await;
    db
}

/// A campaign with one position per slot, stored.
async fn seed_campaign(db: &DatabaseConnection, slots: &[Option<String>]) -> Campaign {
    let now = Utc::now();
    let prizes = slots.iter().filter(|s| s.is_some()).count() as u32;
    let campaign = Campaign {
        id: Uuid::new_v4(),
        business_id: Uuid::new_v4(),
        name: "Semana da pizza".into(),
        game: GameKind::Raspadinha,
        mode: CampaignMode::Quantidade,
        starts_at: None,
        ends_at: None,
        total_scratch_cards: slots.len() as u32,
        remaining_scratch_cards: slots.len() as u32,
        total_prizes: prizes,
        remaining_prizes: prizes,
        prizes: if prizes > 0 {
            vec![Prize {
                name: "Pizza".into(),
                image_url: None,
                quantity: prizes,
            }]
        } else {
            Vec::new()
        },
        status: CampaignStatus::Ativa,
        created_at: now,
        updated_at: now,
    };
    DbCampaignRepository { db: db.clone() }
        .create_with_positions(&campaign, slots)
        .await
        .expect("seed campaign");
    campaign
}

fn new_code(code: &str) -> NewCode {
    NewCode {
        id: Uuid::new_v4(),
        code: code.to_owned(),
        phone: "5511999990000".into(),
        created_at: Utc::now(),
    }
}

async fn issue(repo: &DbCodeRepository, campaign_id: Uuid) -> Code {
    match repo
        .issue(campaign_id, &new_code(&generate_code(CODE_LEN)))
        .await
        .unwrap()
    {
        IssueOutcome::Issued(code) => code,
        other => panic!("expected an issued code, got {other:?}"),
    }
}

fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Ana".into(),
        email: email.to_owned(),
        access_level: AccessLevel::Empresa,
        business_id: Some(Uuid::new_v4()),
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore = "needs Postgres at SORTE_TEST_DATABASE_URL"]
async fn should_map_duplicate_email_to_conflict() {
    let repo = DbUserRepository { db: connect().await };
    let email = format!("{}@sorte.test", Uuid::new_v4());

    repo.create(&user(&email)).await.unwrap();
    let err = repo.create(&user(&email)).await.unwrap_err();
    assert!(matches!(err, SorteServiceError::UserAlreadyExists));
}

#[tokio::test]
#[ignore = "needs Postgres at SORTE_TEST_DATABASE_URL"]
async fn should_release_position_when_code_string_is_taken() {
    let db = connect().await;
    let campaign = seed_campaign(&db, &[None, None]).await;
    let codes = DbCodeRepository { db: db.clone() };
    let text = generate_code(CODE_LEN);

    let first = codes.issue(campaign.id, &new_code(&text)).await.unwrap();
    assert!(matches!(first, IssueOutcome::Issued(_)));
    let second = codes.issue(campaign.id, &new_code(&text)).await.unwrap();
    assert!(matches!(second, IssueOutcome::CodeTaken));

    let counts = DbCampaignRepository { db }.counts(campaign.id).await.unwrap();
    assert_eq!(counts.positions_used, 1);
}

#[tokio::test]
#[ignore = "needs Postgres at SORTE_TEST_DATABASE_URL"]
async fn should_keep_remaining_counters_at_zero() {
    let db = connect().await;
    let mut campaign = seed_campaign(&db, &[Some("Pizza".into()), Some("Pizza".into())]).await;
    let campaigns = DbCampaignRepository { db: db.clone() };
    let codes = DbCodeRepository { db };

    let first = issue(&codes, campaign.id).await;
    let second = issue(&codes, campaign.id).await;
    assert!(codes.validate(&first, Utc::now()).await.unwrap());
    assert!(codes.validate(&second, Utc::now()).await.unwrap());
    // Already validated: no second decrement.
    assert!(!codes.validate(&first, Utc::now()).await.unwrap());

    campaign = campaigns.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(campaign.remaining_scratch_cards, 0);
    assert_eq!(campaign.remaining_prizes, 0);

    // Re-open a code to run the decrement against empty counters.
    assert!(
        codes
            .transition(first.id, CodeStatus::Validado, CodeStatus::Ativo)
            .await
            .unwrap()
    );
    assert!(codes.validate(&first, Utc::now()).await.unwrap());
    campaign = campaigns.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(campaign.remaining_scratch_cards, 0);
    assert_eq!(campaign.remaining_prizes, 0);
}

#[tokio::test]
#[ignore = "needs Postgres at SORTE_TEST_DATABASE_URL"]
async fn should_hand_each_position_to_one_concurrent_issuer() {
    const SLOTS: usize = 8;
    let db = connect().await;
    let campaign = seed_campaign(&db, &vec![None; SLOTS]).await;
    let codes = DbCodeRepository { db: db.clone() };

    let mut tasks = JoinSet::new();
    for _ in 0..SLOTS {
        let codes = codes.clone();
        let campaign_id = campaign.id;
        tasks.spawn(async move {
            loop {
                let attempt = new_code(&generate_code(CODE_LEN));
                match codes.issue(campaign_id, &attempt).await.unwrap() {
                    IssueOutcome::Issued(code) => return code.position_id,
                    IssueOutcome::Contended | IssueOutcome::CodeTaken => continue,
                    IssueOutcome::Exhausted => panic!("pool ran out early"),
                }
            }
        });
    }
    let mut positions = Vec::new();
    while let Some(position_id) = tasks.join_next().await {
        positions.push(position_id.unwrap());
    }
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), SLOTS);

    let extra = codes
        .issue(campaign.id, &new_code(&generate_code(CODE_LEN)))
        .await
        .unwrap();
    assert!(matches!(extra, IssueOutcome::Exhausted));
}

#[tokio::test]
#[ignore = "needs Postgres at SORTE_TEST_DATABASE_URL"]
async fn should_leave_voucher_valid_when_code_moved_before_redemption() {
    let db = connect().await;
    let campaign = seed_campaign(&db, &[Some("Pizza".into())]).await;
    let codes = DbCodeRepository { db: db.clone() };
    let vouchers = DbVoucherRepository { db };
    let code = issue(&codes, campaign.id).await;

    let voucher = Voucher {
        id: Uuid::new_v4(),
        voucher: generate_code(VOUCHER_LEN),
        code_id: code.id,
        status: VoucherStatus::Valido,
        created_at: Utc::now(),
        used_at: None,
    };
    let created = vouchers
        .create_for_code(&voucher, CodeStatus::Ativo, CodeStatus::VoucherGerado)
        .await
        .unwrap();
    assert_eq!(created, VoucherOutcome::Created);
    assert!(
        codes
            .transition(code.id, CodeStatus::VoucherGerado, CodeStatus::Encerrado)
            .await
            .unwrap()
    );

    assert!(!vouchers.redeem(&voucher, Utc::now()).await.unwrap());
    let stored = vouchers
        .find_by_voucher(&voucher.voucher)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, VoucherStatus::Valido);
    assert!(stored.used_at.is_none());
}

#[tokio::test]
#[ignore = "needs Postgres at SORTE_TEST_DATABASE_URL"]
async fn should_redeem_voucher_once() {
    let db = connect().await;
    let campaign = seed_campaign(&db, &[Some("Pizza".into())]).await;
    let codes = DbCodeRepository { db: db.clone() };
    let vouchers = DbVoucherRepository { db };
    let code = issue(&codes, campaign.id).await;

    let voucher = Voucher {
        id: Uuid::new_v4(),
        voucher: generate_code(VOUCHER_LEN),
        code_id: code.id,
        status: VoucherStatus::Valido,
        created_at: Utc::now(),
        used_at: None,
    };
    vouchers
        .create_for_code(&voucher, CodeStatus::Ativo, CodeStatus::VoucherGerado)
        .await
        .unwrap();

    assert!(vouchers.redeem(&voucher, Utc::now()).await.unwrap());
    assert!(!vouchers.redeem(&voucher, Utc::now()).await.unwrap());
    let closed = codes.find_by_id(code.id).await.unwrap().unwrap();
    assert_eq!(closed.status, CodeStatus::Encerrado);
}
