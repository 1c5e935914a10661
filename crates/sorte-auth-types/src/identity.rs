//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use sorte_core::error::AppError;
use sorte_domain::user::{AccessLevel, Actor};

pub const X_SORTE_USER_ID: &str = "x-sorte-user-id";
pub const X_SORTE_ACCESS_LEVEL: &str = "x-sorte-access-level";
pub const X_SORTE_BUSINESS_ID: &str = "x-sorte-business-id";

/// Dashboard identity injected by the gateway.
///
/// Returns 401 if `x-sorte-user-id` or `x-sorte-access-level` is absent or
/// malformed, or if a non-admin request carries no valid
/// `x-sorte-business-id`. Permission checks (403) happen in use cases.
#[derive(Debug, Clone, Copy)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub access_level: AccessLevel,
    pub business_id: Option<Uuid>,
}

impl IdentityHeaders {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            level: self.access_level,
            business_id: self.business_id,
        }
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Headers are read synchronously so the returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = header(parts, X_SORTE_USER_ID).and_then(|s| s.parse::<Uuid>().ok());
        let access_level = header(parts, X_SORTE_ACCESS_LEVEL).and_then(AccessLevel::parse);
        let business_header = header(parts, X_SORTE_BUSINESS_ID).map(|s| s.parse::<Uuid>());

        async move {
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            let access_level = access_level.ok_or(AppError::Unauthorized)?;
            let business_id = match business_header {
                Some(Ok(id)) => Some(id),
                Some(Err(_)) => return Err(AppError::Unauthorized),
                None => None,
            };
            if business_id.is_none() && access_level != AccessLevel::Admin {
                tracing::debug!(%user_id, "non-admin identity without business id");
                return Err(AppError::Unauthorized);
            }
            Ok(Self {
                user_id,
                access_level,
                business_id,
            })
        }
    }
}
