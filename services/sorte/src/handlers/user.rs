use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sorte_auth_types::identity::IdentityHeaders;
use sorte_core::extract::Json;
use sorte_domain::user::AccessLevel;

use crate::domain::types::User;
use crate::error::SorteServiceError;
use crate::state::AppState;
use crate::usecase::user::{CreateUserInput, CreateUserUseCase, GetMeUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub access_level: AccessLevel,
    pub business_id: Option<Uuid>,
    #[serde(serialize_with = "sorte_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            access_level: user.access_level,
            business_id: user.business_id,
            created_at: user.created_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub access_level: AccessLevel,
    pub business_id: Option<Uuid>,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), SorteServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            &identity.actor(),
            CreateUserInput {
                name: body.name,
                email: body.email,
                access_level: body.access_level,
                business_id: body.business_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, SorteServiceError> {
    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&identity.actor()).await?;
    Ok(Json(user.into()))
}
