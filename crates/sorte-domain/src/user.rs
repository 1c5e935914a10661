//! Dashboard user types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard access level.
///
/// Wire format: lowercase label. `Admin` is platform-wide; `Empresa` owns a
/// business; `Funcionario` works for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Admin,
    Empresa,
    Funcionario,
}

impl AccessLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Empresa => "empresa",
            Self::Funcionario => "funcionario",
        }
    }

    /// Parse the wire label. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "empresa" => Some(Self::Empresa),
            "funcionario" => Some(Self::Funcionario),
            _ => None,
        }
    }

    /// Create campaigns and change their status.
    pub fn can_manage_campaigns(self) -> bool {
        matches!(self, Self::Admin | Self::Empresa)
    }

    /// Create dashboard users of level `other`.
    pub fn can_create(self, other: Self) -> bool {
        match self {
            Self::Admin => true,
            Self::Empresa => other == Self::Funcionario,
            Self::Funcionario => false,
        }
    }
}

/// The dashboard user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub level: AccessLevel,
    /// Absent only for admins.
    pub business_id: Option<Uuid>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.level == AccessLevel::Admin
    }

    /// Whether the actor may see or act on data owned by `business_id`.
    pub fn can_access(&self, business_id: Uuid) -> bool {
        self.is_admin() || self.business_id == Some(business_id)
    }

    /// Business filter for list queries: `None` means every business.
    pub fn business_scope(&self) -> Option<Uuid> {
        if self.is_admin() {
            None
        } else {
            self.business_id
        }
    }
}
