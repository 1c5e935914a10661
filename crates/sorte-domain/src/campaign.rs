//! Campaign and voucher enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire label for a code or position without a prize.
pub const NO_PRIZE: &str = "nenhum";

/// Campaign lifecycle. `Encerrada` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Ativa,
    Pausada,
    Encerrada,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ativa => "ativa",
            Self::Pausada => "pausada",
            Self::Encerrada => "encerrada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ativa" => Some(Self::Ativa),
            "pausada" => Some(Self::Pausada),
            "encerrada" => Some(Self::Encerrada),
            _ => None,
        }
    }

    /// Whether a dashboard user may move a campaign from `self` to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Ativa, Self::Pausada)
                | (Self::Pausada, Self::Ativa)
                | (Self::Ativa | Self::Pausada, Self::Encerrada)
        )
    }
}

/// How a campaign bounds its plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignMode {
    /// Runs until the scratch-card pool is exhausted.
    Quantidade,
    /// Runs between `starts_at` and `ends_at`.
    Periodo,
}

impl CampaignMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quantidade => "quantidade",
            Self::Periodo => "periodo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "quantidade" => Some(Self::Quantidade),
            "periodo" => Some(Self::Periodo),
            _ => None,
        }
    }
}

/// Game shown to the player when revealing the pre-assigned prize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Raspadinha,
    CaixaSurpresa,
}

impl GameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raspadinha => "raspadinha",
            Self::CaixaSurpresa => "caixa_surpresa",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "raspadinha" => Some(Self::Raspadinha),
            "caixa_surpresa" => Some(Self::CaixaSurpresa),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    Valido,
    Usado,
}

impl VoucherStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valido => "valido",
            Self::Usado => "usado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "valido" => Some(Self::Valido),
            "usado" => Some(Self::Usado),
            _ => None,
        }
    }
}

/// Whether `now` falls inside an optional `[starts_at, ends_at)` window.
/// Missing bounds are open.
pub fn within_window(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    starts_at.is_none_or(|start| now >= start) && ends_at.is_none_or(|end| now < end)
}
