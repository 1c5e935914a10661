use std::collections::HashMap;

use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionError,
    TransactionTrait,
    sea_query::{Expr, LockBehavior, LockType, Query},
};
use uuid::Uuid;

use sorte_core::sea_ext::OrderByRandom;
use sorte_domain::campaign::{CampaignMode, CampaignStatus, GameKind, VoucherStatus};
use sorte_domain::code_status::CodeStatus;
use sorte_domain::pagination::PageRequest;
use sorte_domain::user::AccessLevel;
use sorte_schema::{campaign_prizes, campaigns, codes, positions, users, vouchers, winners};

use crate::domain::repository::{
    CampaignRepository, CodeRepository, UserRepository, VoucherRepository,
};
use crate::domain::types::{
    Campaign, CampaignCounts, Code, IssueOutcome, NewCode, POSITION_BATCH_SIZE, Position, Prize,
    User, Voucher, VoucherOutcome, Winner,
};
use crate::error::SorteServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn internal(
    err: impl std::error::Error + Send + Sync + 'static,
    what: &'static str,
) -> SorteServiceError {
    anyhow::Error::new(err).context(what).into()
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SorteServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SorteServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), SorteServiceError> {
        let inserted = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            access_level: Set(user.access_level.as_str().to_owned()),
            business_id: Set(user.business_id),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match inserted {
            Ok(_) => Ok(()),
            // Lost a race with a concurrent signup for the same email.
            Err(e) if is_unique_violation(&e) => Err(SorteServiceError::UserAlreadyExists),
            Err(e) => Err(internal(e, "create user")),
        }
    }
}

fn user_from_model(model: users::Model) -> Result<User, SorteServiceError> {
    let access_level = AccessLevel::parse(&model.access_level)
        .ok_or_else(|| anyhow!("unknown access level `{}`", model.access_level))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        access_level,
        business_id: model.business_id,
        created_at: model.created_at,
    })
}

// ── Campaign repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCampaignRepository {
    pub db: DatabaseConnection,
}

impl CampaignRepository for DbCampaignRepository {
    async fn create_with_positions(
        &self,
        campaign: &Campaign,
        slots: &[Option<String>],
    ) -> Result<(), SorteServiceError> {
        let campaign = campaign.clone();
        let slots = slots.to_vec();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    campaigns::ActiveModel {
                        id: Set(campaign.id),
                        business_id: Set(campaign.business_id),
                        name: Set(campaign.name.clone()),
                        game: Set(campaign.game.as_str().to_owned()),
                        mode: Set(campaign.mode.as_str().to_owned()),
                        starts_at: Set(campaign.starts_at),
                        ends_at: Set(campaign.ends_at),
                        total_scratch_cards: Set(campaign.total_scratch_cards as i32),
                        remaining_scratch_cards: Set(campaign.remaining_scratch_cards as i32),
                        total_prizes: Set(campaign.total_prizes as i32),
                        remaining_prizes: Set(campaign.remaining_prizes as i32),
                        status: Set(campaign.status.as_str().to_owned()),
                        created_at: Set(campaign.created_at),
                        updated_at: Set(campaign.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    for (sort_order, prize) in campaign.prizes.iter().enumerate() {
                        campaign_prizes::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            campaign_id: Set(campaign.id),
                            sort_order: Set(sort_order as i32),
                            name: Set(prize.name.clone()),
                            image_url: Set(prize.image_url.clone()),
                            quantity: Set(prize.quantity as i32),
                        }
                        .insert(txn)
                        .await?;
                    }

                    let rows: Vec<positions::ActiveModel> = slots
                        .into_iter()
                        .enumerate()
                        .map(|(index, prize)| positions::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            campaign_id: Set(campaign.id),
                            index: Set(index as i32),
                            prize: Set(prize),
                            usado: Set(false),
                            enviado: Set(false),
                        })
                        .collect();
                    for batch in rows.chunks(POSITION_BATCH_SIZE) {
                        positions::Entity::insert_many(batch.to_vec())
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create campaign with positions")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Campaign>, SorteServiceError> {
        let Some(model) = campaigns::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find campaign by id")?
        else {
            return Ok(None);
        };
        let prizes = campaign_prizes::Entity::find()
            .filter(campaign_prizes::Column::CampaignId.eq(id))
            .order_by_asc(campaign_prizes::Column::SortOrder)
            .all(&self.db)
            .await
            .context("find campaign prizes")?;
        campaign_from_model(model, prizes).map(Some)
    }

    async fn list(
        &self,
        business_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Campaign>, SorteServiceError> {
        let mut query = campaigns::Entity::find();
        if let Some(business_id) = business_id {
            query = query.filter(campaigns::Column::BusinessId.eq(business_id));
        }
        let models = query
            .order_by_desc(campaigns::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list campaigns")?;
        if models.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let prize_models = campaign_prizes::Entity::find()
            .filter(campaign_prizes::Column::CampaignId.is_in(ids))
            .order_by_asc(campaign_prizes::Column::SortOrder)
            .all(&self.db)
            .await
            .context("list campaign prizes")?;
        let mut prizes_by_campaign: HashMap<Uuid, Vec<campaign_prizes::Model>> = HashMap::new();
        for prize in prize_models {
            prizes_by_campaign
                .entry(prize.campaign_id)
                .or_default()
                .push(prize);
        }

        models
            .into_iter()
            .map(|model| {
                let prizes = prizes_by_campaign.remove(&model.id).unwrap_or_default();
                campaign_from_model(model, prizes)
            })
            .collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<(), SorteServiceError> {
        campaigns::Entity::update_many()
            .col_expr(campaigns::Column::Status, Expr::value(status.as_str()))
            .col_expr(campaigns::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(campaigns::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update campaign status")?;
        Ok(())
    }

    async fn counts(&self, id: Uuid) -> Result<CampaignCounts, SorteServiceError> {
        let rows: Vec<(String, i64)> = codes::Entity::find()
            .select_only()
            .column(codes::Column::Status)
            .column_as(Expr::col(codes::Column::Id).count(), "count")
            .filter(codes::Column::CampaignId.eq(id))
            .group_by(codes::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count codes by status")?;
        let codes_by_status = rows
            .into_iter()
            .map(|(status, count)| {
                let status = CodeStatus::parse(&status)
                    .ok_or_else(|| anyhow!("unknown code status `{status}`"))?;
                Ok((status, count as u64))
            })
            .collect::<Result<Vec<_>, SorteServiceError>>()?;

        let positions_used = positions::Entity::find()
            .filter(positions::Column::CampaignId.eq(id))
            .filter(positions::Column::Usado.eq(true))
            .count(&self.db)
            .await
            .context("count used positions")?;
        let positions_sent = positions::Entity::find()
            .filter(positions::Column::CampaignId.eq(id))
            .filter(positions::Column::Enviado.eq(true))
            .count(&self.db)
            .await
            .context("count sent positions")?;

        let campaign_codes = Query::select()
            .column(codes::Column::Id)
            .from(codes::Entity)
            .and_where(Expr::col(codes::Column::CampaignId).eq(id))
            .to_owned();
        let vouchers_issued = vouchers::Entity::find()
            .filter(vouchers::Column::CodeId.in_subquery(campaign_codes.clone()))
            .count(&self.db)
            .await
            .context("count issued vouchers")?;
        let vouchers_redeemed = vouchers::Entity::find()
            .filter(vouchers::Column::CodeId.in_subquery(campaign_codes))
            .filter(vouchers::Column::Status.eq(VoucherStatus::Usado.as_str()))
            .count(&self.db)
            .await
            .context("count redeemed vouchers")?;

        Ok(CampaignCounts {
            codes_by_status,
            positions_used,
            positions_sent,
            vouchers_issued,
            vouchers_redeemed,
        })
    }
}

fn campaign_from_model(
    model: campaigns::Model,
    prizes: Vec<campaign_prizes::Model>,
) -> Result<Campaign, SorteServiceError> {
    let game =
        GameKind::parse(&model.game).ok_or_else(|| anyhow!("unknown game `{}`", model.game))?;
    let mode = CampaignMode::parse(&model.mode)
        .ok_or_else(|| anyhow!("unknown campaign mode `{}`", model.mode))?;
    let status = CampaignStatus::parse(&model.status)
        .ok_or_else(|| anyhow!("unknown campaign status `{}`", model.status))?;
    Ok(Campaign {
        id: model.id,
        business_id: model.business_id,
        name: model.name,
        game,
        mode,
        starts_at: model.starts_at,
        ends_at: model.ends_at,
        total_scratch_cards: model.total_scratch_cards.max(0) as u32,
        remaining_scratch_cards: model.remaining_scratch_cards.max(0) as u32,
        total_prizes: model.total_prizes.max(0) as u32,
        remaining_prizes: model.remaining_prizes.max(0) as u32,
        prizes: prizes
            .into_iter()
            .map(|p| Prize {
                name: p.name,
                image_url: p.image_url,
                quantity: p.quantity.max(0) as u32,
            })
            .collect(),
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Code repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCodeRepository {
    pub db: DatabaseConnection,
}

impl CodeRepository for DbCodeRepository {
    async fn code_exists(&self, code: &str) -> Result<bool, SorteServiceError> {
        let count = codes::Entity::find()
            .filter(codes::Column::Code.eq(code))
            .count(&self.db)
            .await
            .context("check code exists")?;
        Ok(count > 0)
    }

    async fn issue(
        &self,
        campaign_id: Uuid,
        new_code: &NewCode,
    ) -> Result<IssueOutcome, SorteServiceError> {
        let new_code = new_code.clone();
        let issued = self
            .db
            .transaction::<_, IssueOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let unused = || {
                        positions::Entity::find()
                            .filter(positions::Column::CampaignId.eq(campaign_id))
                            .filter(positions::Column::Usado.eq(false))
                    };

                    let picked = unused()
                        .sample(1)
                        .lock_with_behavior(LockType::Update, LockBehavior::SkipLocked)
                        .one(txn)
                        .await?;
                    let Some(model) = picked else {
                        // Everything left may be locked by concurrent issuers.
                        let left = unused().count(txn).await?;
                        return Ok(if left > 0 {
                            IssueOutcome::Contended
                        } else {
                            IssueOutcome::Exhausted
                        });
                    };

                    let claimed = positions::Entity::update_many()
                        .col_expr(positions::Column::Usado, Expr::value(true))
                        .filter(positions::Column::Id.eq(model.id))
                        .filter(positions::Column::Usado.eq(false))
                        .exec(txn)
                        .await?;
                    if claimed.rows_affected == 0 {
                        return Ok(IssueOutcome::Contended);
                    }

                    let code = new_code.into_code(campaign_id, &position_from_model(model));
                    codes::ActiveModel {
                        id: Set(code.id),
                        code: Set(code.code.clone()),
                        campaign_id: Set(code.campaign_id),
                        position_id: Set(code.position_id),
                        phone: Set(code.phone.clone()),
                        prize: Set(code.prize.clone()),
                        status: Set(code.status.as_str().to_owned()),
                        created_at: Set(code.created_at),
                        updated_at: Set(code.updated_at),
                        validated_at: Set(None),
                    }
                    .insert(txn)
                    .await?;
                    Ok(IssueOutcome::Issued(code))
                })
            })
            .await;
        match issued {
            Ok(outcome) => Ok(outcome),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Ok(IssueOutcome::CodeTaken)
            }
            Err(e) => Err(internal(e, "issue code")),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Code>, SorteServiceError> {
        let model = codes::Entity::find()
            .filter(codes::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find code by value")?;
        model.map(code_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Code>, SorteServiceError> {
        let model = codes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find code by id")?;
        model.map(code_from_model).transpose()
    }

    async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        status: Option<CodeStatus>,
        page: PageRequest,
    ) -> Result<Vec<Code>, SorteServiceError> {
        let mut query = codes::Entity::find().filter(codes::Column::CampaignId.eq(campaign_id));
        if let Some(status) = status {
            query = query.filter(codes::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(codes::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list codes by campaign")?;
        models.into_iter().map(code_from_model).collect()
    }

    async fn mark_sent(&self, position_id: Uuid) -> Result<(), SorteServiceError> {
        positions::Entity::update_many()
            .col_expr(positions::Column::Enviado, Expr::value(true))
            .filter(positions::Column::Id.eq(position_id))
            .exec(&self.db)
            .await
            .context("mark position sent")?;
        Ok(())
    }

    async fn validate(&self, code: &Code, at: DateTime<Utc>) -> Result<bool, SorteServiceError> {
        let code_id = code.id;
        let campaign_id = code.campaign_id;
        let has_prize = code.has_prize();
        let validated = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let moved = codes::Entity::update_many()
                        .col_expr(
                            codes::Column::Status,
                            Expr::value(CodeStatus::Validado.as_str()),
                        )
                        .col_expr(codes::Column::ValidatedAt, Expr::value(Some(at)))
                        .col_expr(codes::Column::UpdatedAt, Expr::value(at))
                        .filter(codes::Column::Id.eq(code_id))
                        .filter(codes::Column::Status.eq(CodeStatus::Ativo.as_str()))
                        .exec(txn)
                        .await?;
                    if moved.rows_affected == 0 {
                        return Ok(false);
                    }

                    campaigns::Entity::update_many()
                        .col_expr(
                            campaigns::Column::RemainingScratchCards,
                            Expr::col(campaigns::Column::RemainingScratchCards).sub(1),
                        )
                        .col_expr(campaigns::Column::UpdatedAt, Expr::value(at))
                        .filter(campaigns::Column::Id.eq(campaign_id))
                        .filter(campaigns::Column::RemainingScratchCards.gt(0))
                        .exec(txn)
                        .await?;
                    if has_prize {
                        campaigns::Entity::update_many()
                            .col_expr(
                                campaigns::Column::RemainingPrizes,
                                Expr::col(campaigns::Column::RemainingPrizes).sub(1),
                            )
                            .filter(campaigns::Column::Id.eq(campaign_id))
                            .filter(campaigns::Column::RemainingPrizes.gt(0))
                            .exec(txn)
                            .await?;
                    }
                    Ok(true)
                })
            })
            .await
            .context("validate code")?;
        Ok(validated)
    }

    async fn transition(
        &self,
        code_id: Uuid,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<bool, SorteServiceError> {
        let result = codes::Entity::update_many()
            .col_expr(codes::Column::Status, Expr::value(to.as_str()))
            .col_expr(codes::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(codes::Column::Id.eq(code_id))
            .filter(codes::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .context("transition code status")?;
        Ok(result.rows_affected > 0)
    }

    async fn submit_winner(
        &self,
        winner: &Winner,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<bool, SorteServiceError> {
        let winner = winner.clone();
        let submitted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let moved = codes::Entity::update_many()
                        .col_expr(codes::Column::Status, Expr::value(to.as_str()))
                        .col_expr(codes::Column::UpdatedAt, Expr::value(winner.created_at))
                        .filter(codes::Column::Id.eq(winner.code_id))
                        .filter(codes::Column::Status.eq(from.as_str()))
                        .exec(txn)
                        .await?;
                    if moved.rows_affected == 0 {
                        return Ok(false);
                    }

                    winners::ActiveModel {
                        id: Set(winner.id),
                        code_id: Set(winner.code_id),
                        campaign_id: Set(winner.campaign_id),
                        name: Set(winner.name),
                        phone: Set(winner.phone),
                        address: Set(winner.address),
                        created_at: Set(winner.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("submit winner")?;
        Ok(submitted)
    }
}

fn position_from_model(model: positions::Model) -> Position {
    Position {
        id: model.id,
        campaign_id: model.campaign_id,
        index: model.index.max(0) as u32,
        prize: model.prize,
        used: model.usado,
        sent: model.enviado,
    }
}

fn code_from_model(model: codes::Model) -> Result<Code, SorteServiceError> {
    let status = CodeStatus::parse(&model.status)
        .ok_or_else(|| anyhow!("unknown code status `{}`", model.status))?;
    Ok(Code {
        id: model.id,
        code: model.code,
        campaign_id: model.campaign_id,
        position_id: model.position_id,
        phone: model.phone,
        prize: model.prize,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
        validated_at: model.validated_at,
    })
}

// ── Voucher repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVoucherRepository {
    pub db: DatabaseConnection,
}

impl VoucherRepository for DbVoucherRepository {
    async fn voucher_exists(&self, voucher: &str) -> Result<bool, SorteServiceError> {
        let count = vouchers::Entity::find()
            .filter(vouchers::Column::Voucher.eq(voucher))
            .count(&self.db)
            .await
            .context("check voucher exists")?;
        Ok(count > 0)
    }

    async fn find_by_code_id(&self, code_id: Uuid) -> Result<Option<Voucher>, SorteServiceError> {
        let model = vouchers::Entity::find()
            .filter(vouchers::Column::CodeId.eq(code_id))
            .one(&self.db)
            .await
            .context("find voucher by code id")?;
        model.map(voucher_from_model).transpose()
    }

    async fn find_by_voucher(&self, voucher: &str) -> Result<Option<Voucher>, SorteServiceError> {
        let model = vouchers::Entity::find()
            .filter(vouchers::Column::Voucher.eq(voucher))
            .one(&self.db)
            .await
            .context("find voucher")?;
        model.map(voucher_from_model).transpose()
    }

    async fn create_for_code(
        &self,
        voucher: &Voucher,
        from: CodeStatus,
        to: CodeStatus,
    ) -> Result<VoucherOutcome, SorteServiceError> {
        let voucher = voucher.clone();
        let created = self
            .db
            .transaction::<_, VoucherOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let moved = codes::Entity::update_many()
                        .col_expr(codes::Column::Status, Expr::value(to.as_str()))
                        .col_expr(codes::Column::UpdatedAt, Expr::value(voucher.created_at))
                        .filter(codes::Column::Id.eq(voucher.code_id))
                        .filter(codes::Column::Status.eq(from.as_str()))
                        .exec(txn)
                        .await?;
                    if moved.rows_affected == 0 {
                        return Ok(VoucherOutcome::CodeMoved);
                    }

                    vouchers::ActiveModel {
                        id: Set(voucher.id),
                        voucher: Set(voucher.voucher),
                        code_id: Set(voucher.code_id),
                        status: Set(voucher.status.as_str().to_owned()),
                        created_at: Set(voucher.created_at),
                        used_at: Set(None),
                    }
                    .insert(txn)
                    .await?;
                    Ok(VoucherOutcome::Created)
                })
            })
            .await;
        match created {
            Ok(outcome) => Ok(outcome),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Ok(VoucherOutcome::VoucherTaken)
            }
            Err(e) => Err(internal(e, "create voucher")),
        }
    }

    async fn redeem(&self, voucher: &Voucher, at: DateTime<Utc>) -> Result<bool, SorteServiceError> {
        let voucher_id = voucher.id;
        let code_id = voucher.code_id;
        let redeemed = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    // Lock both rows before writing so a lost race writes nothing.
                    let valid = vouchers::Entity::find_by_id(voucher_id)
                        .filter(vouchers::Column::Status.eq(VoucherStatus::Valido.as_str()))
                        .lock_exclusive()
                        .one(txn)
                        .await?;
                    if valid.is_none() {
                        return Ok(false);
                    }
                    let open = codes::Entity::find_by_id(code_id)
                        .filter(codes::Column::Status.eq(CodeStatus::VoucherGerado.as_str()))
                        .lock_exclusive()
                        .one(txn)
                        .await?;
                    if open.is_none() {
                        return Ok(false);
                    }

                    vouchers::Entity::update_many()
                        .col_expr(
                            vouchers::Column::Status,
                            Expr::value(VoucherStatus::Usado.as_str()),
                        )
                        .col_expr(vouchers::Column::UsedAt, Expr::value(Some(at)))
                        .filter(vouchers::Column::Id.eq(voucher_id))
                        .exec(txn)
                        .await?;
                    codes::Entity::update_many()
                        .col_expr(
                            codes::Column::Status,
                            Expr::value(CodeStatus::Encerrado.as_str()),
                        )
                        .col_expr(codes::Column::UpdatedAt, Expr::value(at))
                        .filter(codes::Column::Id.eq(code_id))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("redeem voucher")?;
        Ok(redeemed)
    }
}

fn voucher_from_model(model: vouchers::Model) -> Result<Voucher, SorteServiceError> {
    let status = VoucherStatus::parse(&model.status)
        .ok_or_else(|| anyhow!("unknown voucher status `{}`", model.status))?;
    Ok(Voucher {
        id: model.id,
        voucher: model.voucher,
        code_id: model.code_id,
        status,
        created_at: model.created_at,
        used_at: model.used_at,
    })
}
