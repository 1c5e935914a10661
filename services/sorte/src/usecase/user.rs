use chrono::Utc;
use uuid::Uuid;

use sorte_domain::user::{AccessLevel, Actor};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::SorteServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub access_level: AccessLevel,
    pub business_id: Option<Uuid>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateUserInput,
    ) -> Result<User, SorteServiceError> {
        if !actor.level.can_create(input.access_level) {
            return Err(SorteServiceError::Forbidden);
        }
        let business_id = if input.access_level == AccessLevel::Admin {
            None
        } else if actor.is_admin() {
            Some(input.business_id.ok_or(SorteServiceError::MissingData)?)
        } else {
            if input.business_id.is_some_and(|id| Some(id) != actor.business_id) {
                return Err(SorteServiceError::Forbidden);
            }
            Some(actor.business_id.ok_or(SorteServiceError::Forbidden)?)
        };

        let name = input.name.trim();
        let email = input.email.trim().to_lowercase();
        if name.is_empty() || !email.contains('@') {
            return Err(SorteServiceError::MissingData);
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(SorteServiceError::UserAlreadyExists);
        }

        let user = User {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            email,
            access_level: input.access_level,
            business_id,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        tracing::info!(
            user_id = %user.id,
            access_level = user.access_level.as_str(),
            created_by = %actor.user_id,
            "user created"
        );
        Ok(user)
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    pub async fn execute(&self, actor: &Actor) -> Result<User, SorteServiceError> {
        self.repo
            .find_by_id(actor.user_id)
            .await?
            .ok_or(SorteServiceError::UserNotFound)
    }
}
