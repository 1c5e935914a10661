use anyhow::anyhow;
use chrono::Utc;
use uuid::Uuid;

use sorte_domain::campaign::VoucherStatus;
use sorte_domain::code_status::CodeEvent;
use sorte_domain::user::Actor;

use crate::domain::repository::{CampaignRepository, CodeRepository, VoucherRepository};
use crate::domain::types::{
    Code, MAX_CODE_GENERATION_ATTEMPTS, VOUCHER_LEN, Voucher, VoucherOutcome, generate_code,
    normalize_code,
};
use crate::error::SorteServiceError;
use crate::usecase::campaign::authorized_campaign;
use crate::usecase::code::find_code;

/// A voucher together with the code it rewards.
#[derive(Debug, Clone)]
pub struct VoucherDetails {
    pub voucher: Voucher,
    pub code: Code,
}

async fn fresh_voucher<V: VoucherRepository>(vouchers: &V) -> Result<String, SorteServiceError> {
    for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
        let candidate = generate_code(VOUCHER_LEN);
        if !vouchers.voucher_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(anyhow!("no unused voucher after {MAX_CODE_GENERATION_ATTEMPTS} attempts").into())
}

async fn find_voucher<K: CodeRepository, V: VoucherRepository>(
    codes: &K,
    vouchers: &V,
    raw_voucher: &str,
) -> Result<VoucherDetails, SorteServiceError> {
    let voucher = vouchers
        .find_by_voucher(&normalize_code(raw_voucher))
        .await?
        .ok_or(SorteServiceError::VoucherNotFound)?;
    let code = codes
        .find_by_id(voucher.code_id)
        .await?
        .ok_or(SorteServiceError::CodeNotFound)?;
    Ok(VoucherDetails { voucher, code })
}

// ── GenerateVoucher ──────────────────────────────────────────────────────────

pub struct GenerateVoucherUseCase<K: CodeRepository, V: VoucherRepository> {
    pub codes: K,
    pub vouchers: V,
}

impl<K: CodeRepository, V: VoucherRepository> GenerateVoucherUseCase<K, V> {
    /// Issue the voucher of a winning code. Calling it again returns the
    /// voucher already issued.
    pub async fn execute(&self, raw_code: &str) -> Result<VoucherDetails, SorteServiceError> {
        let mut code = find_code(&self.codes, raw_code).await?;
        if let Some(voucher) = self.vouchers.find_by_code_id(code.id).await? {
            return Ok(VoucherDetails { voucher, code });
        }
        let next = code.status.apply(CodeEvent::GenerateVoucher)?;

        for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
            let voucher = Voucher {
                id: Uuid::now_v7(),
                voucher: fresh_voucher(&self.vouchers).await?,
                code_id: code.id,
                status: VoucherStatus::Valido,
                created_at: Utc::now(),
                used_at: None,
            };
            match self
                .vouchers
                .create_for_code(&voucher, code.status, next)
                .await?
            {
                VoucherOutcome::Created => {
                    tracing::info!(code_id = %code.id, voucher_id = %voucher.id, "voucher generated");
                    code.status = next;
                    code.updated_at = voucher.created_at;
                    return Ok(VoucherDetails { voucher, code });
                }
                VoucherOutcome::VoucherTaken => {
                    tracing::warn!(code_id = %code.id, "voucher string taken concurrently, retrying");
                }
                // A concurrent request may have issued it first.
                VoucherOutcome::CodeMoved => {
                    return match self.vouchers.find_by_code_id(code.id).await? {
                        Some(voucher) => {
                            let code = self
                                .codes
                                .find_by_id(code.id)
                                .await?
                                .ok_or(SorteServiceError::CodeNotFound)?;
                            Ok(VoucherDetails { voucher, code })
                        }
                        None => Err(SorteServiceError::CodeUpdatedConcurrently),
                    };
                }
            }
        }
        Err(anyhow!("no free voucher string after {MAX_CODE_GENERATION_ATTEMPTS} attempts").into())
    }
}

// ── GetVoucher ───────────────────────────────────────────────────────────────

pub struct GetVoucherUseCase<K: CodeRepository, V: VoucherRepository> {
    pub codes: K,
    pub vouchers: V,
}

impl<K: CodeRepository, V: VoucherRepository> GetVoucherUseCase<K, V> {
    pub async fn execute(&self, raw_voucher: &str) -> Result<VoucherDetails, SorteServiceError> {
        find_voucher(&self.codes, &self.vouchers, raw_voucher).await
    }
}

// ── RedeemVoucher ────────────────────────────────────────────────────────────

pub struct RedeemVoucherUseCase<C: CampaignRepository, K: CodeRepository, V: VoucherRepository> {
    pub campaigns: C,
    pub codes: K,
    pub vouchers: V,
}

impl<C: CampaignRepository, K: CodeRepository, V: VoucherRepository> RedeemVoucherUseCase<C, K, V> {
    /// Mark a voucher used at the counter and close its code.
    pub async fn execute(
        &self,
        actor: &Actor,
        raw_voucher: &str,
    ) -> Result<VoucherDetails, SorteServiceError> {
        let VoucherDetails {
            mut voucher,
            mut code,
        } = find_voucher(&self.codes, &self.vouchers, raw_voucher).await?;
        authorized_campaign(&self.campaigns, actor, code.campaign_id).await?;

        if voucher.status == VoucherStatus::Usado {
            return Err(SorteServiceError::VoucherAlreadyUsed);
        }
        let next = code.status.apply(CodeEvent::RedeemVoucher)?;

        let now = Utc::now();
        if !self.vouchers.redeem(&voucher, now).await? {
            let current = self.vouchers.find_by_voucher(&voucher.voucher).await?;
            return match current {
                Some(v) if v.status == VoucherStatus::Usado => {
                    Err(SorteServiceError::VoucherAlreadyUsed)
                }
                _ => Err(SorteServiceError::CodeUpdatedConcurrently),
            };
        }
        tracing::info!(
            voucher_id = %voucher.id,
            code_id = %code.id,
            redeemed_by = %actor.user_id,
            "voucher redeemed"
        );

        voucher.status = VoucherStatus::Usado;
        voucher.used_at = Some(now);
        code.status = next;
        code.updated_at = now;
        Ok(VoucherDetails { voucher, code })
    }
}
