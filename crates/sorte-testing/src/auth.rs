//! Mock gateway identity for router tests.
//!
//! Services behind the gateway receive `x-sorte-*` identity headers. In tests,
//! `MockAuth` builds those headers directly so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use sorte_auth_types::identity::{X_SORTE_ACCESS_LEVEL, X_SORTE_BUSINESS_ID, X_SORTE_USER_ID};
use sorte_domain::user::{AccessLevel, Actor};

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub access_level: AccessLevel,
    pub business_id: Option<Uuid>,
}

impl MockAuth {
    pub fn admin() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            access_level: AccessLevel::Admin,
            business_id: None,
        }
    }

    pub fn empresa(business_id: Uuid) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            access_level: AccessLevel::Empresa,
            business_id: Some(business_id),
        }
    }

    pub fn funcionario(business_id: Uuid) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            access_level: AccessLevel::Funcionario,
            business_id: Some(business_id),
        }
    }

    /// The same identity as a use-case `Actor`.
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            level: self.access_level,
            business_id: self.business_id,
        }
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(X_SORTE_USER_ID),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(X_SORTE_ACCESS_LEVEL),
            HeaderValue::from_static(self.access_level.as_str()),
        );
        if let Some(business_id) = self.business_id {
            map.insert(
                HeaderName::from_static(X_SORTE_BUSINESS_ID),
                HeaderValue::from_str(&business_id.to_string()).unwrap(),
            );
        }
        map
    }
}
