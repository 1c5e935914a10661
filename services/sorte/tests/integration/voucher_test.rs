use uuid::Uuid;

use sorte::domain::types::Code;
use sorte::error::SorteServiceError;
use sorte::usecase::game::{FinishGameUseCase, StartGameUseCase};
use sorte::usecase::validation::ValidateCodeUseCase;
use sorte::usecase::voucher::{
    GenerateVoucherUseCase, GetVoucherUseCase, RedeemVoucherUseCase, VoucherDetails,
};
use sorte::usecase::winner::{SubmitWinnerUseCase, WinnerInput};
use sorte_domain::campaign::VoucherStatus;
use sorte_domain::code_status::CodeStatus;
use sorte_domain::user::Actor;

use crate::helpers::{MemoryStore, admin, employee, owner, seed_campaign, seed_code};

/// Take a fresh winning code up to the point where a voucher can be issued.
async fn winning_code(store: &MemoryStore, business_id: Uuid) -> Code {
    let campaign = seed_campaign(store, business_id, 1, &[("Pizza", 1)]).await;
    let code = seed_code(store, &campaign).await;
    ValidateCodeUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
    }
    .execute(&code.code)
    .await
    .unwrap();
    StartGameUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
    }
    .execute(&code.code)
    .await
    .unwrap();
    FinishGameUseCase {
        codes: store.clone(),
    }
    .execute(&code.code)
    .await
    .unwrap();
    SubmitWinnerUseCase {
        codes: store.clone(),
    }
    .execute(
        &code.code,
        WinnerInput {
            name: "João".into(),
            phone: "11 97777-6666".into(),
            address: "Av. Brasil, 200".into(),
        },
    )
    .await
    .unwrap();
    code
}

async fn generate(store: &MemoryStore, code: &Code) -> VoucherDetails {
    GenerateVoucherUseCase {
        codes: store.clone(),
        vouchers: store.clone(),
    }
    .execute(&code.code)
    .await
    .unwrap()
}

async fn redeem(
    store: &MemoryStore,
    actor: &Actor,
    voucher: &str,
) -> Result<VoucherDetails, SorteServiceError> {
    RedeemVoucherUseCase {
        campaigns: store.clone(),
        codes: store.clone(),
        vouchers: store.clone(),
    }
    .execute(actor, voucher)
    .await
}

#[tokio::test]
async fn should_return_the_same_voucher_when_generated_twice() {
    let store = MemoryStore::new();
    let code = winning_code(&store, Uuid::new_v4()).await;

    let first = generate(&store, &code).await;
    let second = generate(&store, &code).await;
    assert_eq!(first.voucher.id, second.voucher.id);
    assert_eq!(second.code.status, CodeStatus::VoucherGerado);
    assert_eq!(store.with(|s| s.vouchers.len()), 1);
}

#[tokio::test]
async fn should_refuse_voucher_for_code_without_winner_data() {
    let store = MemoryStore::new();
    let campaign = seed_campaign(&store, Uuid::new_v4(), 1, &[("Pizza", 1)]).await;
    let code = seed_code(&store, &campaign).await;

    let result = GenerateVoucherUseCase {
        codes: store.clone(),
        vouchers: store.clone(),
    }
    .execute(&code.code)
    .await;
    assert!(matches!(
        result,
        Err(SorteServiceError::InvalidCodeStatus(CodeStatus::Ativo))
    ));
    assert!(store.with(|s| s.vouchers.is_empty()));
}

#[tokio::test]
async fn should_look_voucher_up_with_its_code() {
    let store = MemoryStore::new();
    let code = winning_code(&store, Uuid::new_v4()).await;
    let generated = generate(&store, &code).await;

    let found = GetVoucherUseCase {
        codes: store.clone(),
        vouchers: store.clone(),
    }
    .execute(&generated.voucher.voucher)
    .await
    .unwrap();
    assert_eq!(found.voucher.id, generated.voucher.id);
    assert_eq!(found.code.id, code.id);
    assert_eq!(found.code.prize.as_deref(), Some("Pizza"));
}

#[tokio::test]
async fn should_return_voucher_not_found() {
    let store = MemoryStore::new();
    let result = GetVoucherUseCase {
        codes: store.clone(),
        vouchers: store.clone(),
    }
    .execute("NOPE00")
    .await;
    assert!(matches!(result, Err(SorteServiceError::VoucherNotFound)));
}

#[tokio::test]
async fn should_redeem_voucher_only_once() {
    let store = MemoryStore::new();
    let business_id = Uuid::new_v4();
    let code = winning_code(&store, business_id).await;
    let generated = generate(&store, &code).await;

    let redeemed = redeem(&store, &owner(business_id), &generated.voucher.voucher)
        .await
        .unwrap();
    assert_eq!(redeemed.voucher.status, VoucherStatus::Usado);

    let again = redeem(&store, &admin(), &generated.voucher.voucher).await;
    assert!(matches!(again, Err(SorteServiceError::VoucherAlreadyUsed)));
}

#[tokio::test]
async fn should_forbid_redeeming_another_business_voucher() {
    let store = MemoryStore::new();
    let code = winning_code(&store, Uuid::new_v4()).await;
    let generated = generate(&store, &code).await;

    let result = redeem(
        &store,
        &employee(Uuid::new_v4()),
        &generated.voucher.voucher,
    )
    .await;
    assert!(matches!(result, Err(SorteServiceError::Forbidden)));
    assert_eq!(store.code(code.id).status, CodeStatus::VoucherGerado);
}

#[tokio::test]
async fn should_keep_returning_voucher_after_redemption() {
    let store = MemoryStore::new();
    let business_id = Uuid::new_v4();
    let code = winning_code(&store, business_id).await;
    let generated = generate(&store, &code).await;
    redeem(&store, &owner(business_id), &generated.voucher.voucher)
        .await
        .unwrap();

    let again = generate(&store, &code).await;
    assert_eq!(again.voucher.id, generated.voucher.id);
    assert_eq!(again.voucher.status, VoucherStatus::Usado);
    assert_eq!(again.code.status, CodeStatus::Encerrado);
}

#[tokio::test]
async fn should_retry_when_voucher_string_is_taken() {
    let store = MemoryStore::new();
    let code = winning_code(&store, Uuid::new_v4()).await;
    store.with(|s| s.voucher_collisions = 2);

    let generated = generate(&store, &code).await;
    assert_eq!(generated.code.status, CodeStatus::VoucherGerado);
    assert_eq!(store.with(|s| s.vouchers.len()), 1);
    assert_eq!(store.code(code.id).status, CodeStatus::VoucherGerado);
}
