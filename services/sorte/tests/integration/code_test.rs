use chrono::{Duration, Utc};
use uuid::Uuid;

use sorte::error::SorteServiceError;
use sorte::usecase::code::{GetCodeUseCase, IssueCodeUseCase, ListCodesUseCase, SendCodeUseCase};
use sorte_domain::campaign::{CampaignMode, CampaignStatus};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;

use crate::helpers::{
    MemoryStore, MockWhatsApp, PHONE, admin, employee, owner, seed_campaign, seed_code,
};

fn issuer(store: &MemoryStore) -> IssueCodeUseCase<MemoryStore, MemoryStore> {
    IssueCodeUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
    }
}

#[tokio::test]
async fn should_issue_code_bound_to_unused_position() {
    let store = MemoryStore::new();
    let business_id = Uuid::new_v4();
    let campaign = seed_campaign(&store, business_id, 3, &[("Pizza", 1)]).await;

    let code = issuer(&store)
        .execute(&employee(business_id), campaign.id, PHONE)
        .await
        .unwrap();

    assert_eq!(code.code.len(), 8);
    assert!(
        code.code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
    assert_eq!(code.phone, "5511999990000");
    assert_eq!(code.status, CodeStatus::Ativo);
    let position = store.position(code.position_id);
    assert!(position.used);
    assert_eq!(position.prize, code.prize);
}

#[tokio::test]
async fn should_hand_out_every_prize_exactly_once() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 10, &[("Pizza", 2), ("Refri", 3)]).await;

    let mut prizes = vec![];
    for _ in 0..10 {
        prizes.push(seed_code(&store, &campaign).await.prize);
    }
    assert_eq!(prizes.iter().filter(|p| p.as_deref() == Some("Pizza")).count(), 2);
    assert_eq!(prizes.iter().filter(|p| p.as_deref() == Some("Refri")).count(), 3);
    assert_eq!(prizes.iter().filter(|p| p.is_none()).count(), 5);

    let position_ids: std::collections::HashSet<Uuid> =
        store.with(|s| s.codes.iter().map(|c| c.position_id).collect());
    assert_eq!(position_ids.len(), 10);
}

#[tokio::test]
async fn should_fail_when_positions_are_exhausted() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 1, &[]).await;
    seed_code(&store, &campaign).await;

    let result = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, PHONE)
        .await;
    assert!(matches!(result, Err(SorteServiceError::NoPositionsLeft)));
}

#[tokio::test]
async fn should_retry_lost_position_races() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    store.with(|s| s.contended_issues = 2);

    let code = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, PHONE)
        .await
        .unwrap();
    assert_eq!(code.campaign_id, campaign.id);
}

#[tokio::test]
async fn should_give_up_after_three_lost_races() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    store.with(|s| s.contended_issues = 3);

    let result = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, PHONE)
        .await;
    assert!(matches!(result, Err(SorteServiceError::PositionsBusy)));
    assert!(store.with(|s| s.codes.is_empty()));
}

#[tokio::test]
async fn should_reject_invalid_phone() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    let result = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, "12-34")
        .await;
    assert!(matches!(result, Err(SorteServiceError::InvalidPhone)));
}

#[tokio::test]
async fn should_refuse_codes_for_paused_campaign() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    store.with(|s| s.campaigns[0].status = CampaignStatus::Pausada);

    let result = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, PHONE)
        .await;
    assert!(matches!(result, Err(SorteServiceError::CampaignUnavailable)));
}

#[tokio::test]
async fn should_refuse_codes_outside_campaign_period() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    store.with(|s| {
        let c = &mut s.campaigns[0];
        c.mode = CampaignMode::Periodo;
        c.starts_at = Some(Utc::now() - Duration::days(10));
        c.ends_at = Some(Utc::now() - Duration::days(1));
    });

    let result = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, PHONE)
        .await;
    assert!(matches!(result, Err(SorteServiceError::CampaignUnavailable)));
}

#[tokio::test]
async fn should_forbid_issuing_for_another_business() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    let result = issuer(&store)
        .execute(&employee(Uuid::new_v4()), campaign.id, PHONE)
        .await;
    assert!(matches!(result, Err(SorteServiceError::Forbidden)));
}

#[tokio::test]
async fn should_send_code_through_business_bot_session() {
    let store = MemoryStore::new();
    let whatsapp = MockWhatsApp::default();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;

    let code = SendCodeUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
        whatsapp: whatsapp.clone(),
        public_base_url: "https://sorte.example.com".into(),
    }
    .execute(&owner(campaign.business_id), campaign.id, PHONE)
    .await
    .unwrap();

    let sent = whatsapp.sent();
    assert_eq!(sent.len(), 1);
    let (subject, phone, message) = &sent[0];
    assert_eq!(subject, &campaign.business_id.to_string());
    assert_eq!(phone, "5511999990000");
    assert!(message.contains(&code.code));
    assert!(store.position(code.position_id).sent);
}

#[tokio::test]
async fn should_keep_code_unsent_when_bot_fails() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;

    let result = SendCodeUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
        whatsapp: MockWhatsApp::failing(),
        public_base_url: "https://sorte.example.com".into(),
    }
    .execute(&owner(campaign.business_id), campaign.id, PHONE)
    .await;
    assert!(matches!(result, Err(SorteServiceError::WhatsAppUnavailable)));

    store.with(|s| {
        assert_eq!(s.codes.len(), 1);
        let position = s
            .positions
            .iter()
            .find(|p| p.id == s.codes[0].position_id)
            .unwrap();
        assert!(position.used);
        assert!(!position.sent);
    });
}

#[tokio::test]
async fn should_list_codes_filtered_by_status() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 5, &[]).await;
    let first = seed_code(&store, &campaign).await;
    seed_code(&store, &campaign).await;
    store.with(|s| {
        let code = s.codes.iter_mut().find(|c| c.id == first.id).unwrap();
        code.status = CodeStatus::Encerrado;
    });

    let usecase = ListCodesUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
    };
    let all = usecase
        .execute(&admin(), campaign.id, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let closed = usecase
        .execute(
            &admin(),
            campaign.id,
            Some(CodeStatus::Encerrado),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].id, first.id);
}

#[tokio::test]
async fn should_look_codes_up_case_insensitively() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 1, &[]).await;
    let code = seed_code(&store, &campaign).await;

    let found = GetCodeUseCase {
        codes: store.clone(),
    }
    .execute(&format!("  {} ", code.code.to_lowercase()))
    .await
    .unwrap();
    assert_eq!(found.id, code.id);
    assert_eq!(found.status.redirect_path(), "/validar");
}

#[tokio::test]
async fn should_return_code_not_found() {
    let store = MemoryStore::new();
    let result = GetCodeUseCase {
        codes: store.clone(),
    }
    .execute("ZZZZZZZZ")
    .await;
    assert!(matches!(result, Err(SorteServiceError::CodeNotFound)));
}

#[tokio::test]
async fn should_retry_when_code_string_is_taken() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 2, &[]).await;
    store.with(|s| s.code_collisions = 2);

    let code = issuer(&store)
        .execute(&owner(campaign.business_id), campaign.id, PHONE)
        .await
        .unwrap();
    assert_eq!(store.with(|s| s.codes.len()), 1);
    assert_eq!(store.code(code.id).status, CodeStatus::Ativo);
}
