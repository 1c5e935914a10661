//! Raffle code lifecycle.
//!
//! ```text
//! ativo ─validate─▶ validado ─start─▶ aguardando raspagem ─finish─┬─▶ aguardando dados ganhador
//!                                                                 └─▶ encerrado (no prize)
//! aguardando dados ganhador ─winner─▶ coleta de dados do ganhador ─voucher─▶ voucher gerado
//! voucher gerado ─redeem─▶ encerrado
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a raffle code. Wire format is the Portuguese label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeStatus {
    #[serde(rename = "ativo")]
    Ativo,
    #[serde(rename = "validado")]
    Validado,
    #[serde(rename = "aguardando raspagem")]
    AguardandoRaspagem,
    #[serde(rename = "aguardando dados ganhador")]
    AguardandoDadosGanhador,
    #[serde(rename = "coleta de dados do ganhador")]
    ColetaDadosGanhador,
    #[serde(rename = "voucher gerado")]
    VoucherGerado,
    #[serde(rename = "encerrado")]
    Encerrado,
}

/// Something that happens to a code and may move it to another status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeEvent {
    Validate,
    StartGame,
    FinishGame { won: bool },
    SubmitWinner,
    GenerateVoucher,
    RedeemVoucher,
}

/// Rejected transition: `event` is not allowed while the code is in `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} a code in status `{from}`")]
pub struct InvalidTransition {
    pub from: CodeStatus,
    pub event: CodeEvent,
}

impl CodeStatus {
    pub const ALL: [CodeStatus; 7] = [
        Self::Ativo,
        Self::Validado,
        Self::AguardandoRaspagem,
        Self::AguardandoDadosGanhador,
        Self::ColetaDadosGanhador,
        Self::VoucherGerado,
        Self::Encerrado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ativo => "ativo",
            Self::Validado => "validado",
            Self::AguardandoRaspagem => "aguardando raspagem",
            Self::AguardandoDadosGanhador => "aguardando dados ganhador",
            Self::ColetaDadosGanhador => "coleta de dados do ganhador",
            Self::VoucherGerado => "voucher gerado",
            Self::Encerrado => "encerrado",
        }
    }

    /// Parse the stored label. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Apply `event`, returning the next status.
    ///
    /// Starting the game again while it is already running is a no-op so a
    /// player who reloads the page can resume.
    pub fn apply(self, event: CodeEvent) -> Result<Self, InvalidTransition> {
        use CodeEvent as E;
        use CodeStatus as S;

        let next = match (self, event) {
            (S::Ativo, E::Validate) => S::Validado,
            (S::Validado | S::AguardandoRaspagem, E::StartGame) => S::AguardandoRaspagem,
            (S::AguardandoRaspagem, E::FinishGame { won: true }) => S::AguardandoDadosGanhador,
            (S::AguardandoRaspagem, E::FinishGame { won: false }) => S::Encerrado,
            (S::AguardandoDadosGanhador, E::SubmitWinner) => S::ColetaDadosGanhador,
            (S::ColetaDadosGanhador, E::GenerateVoucher) => S::VoucherGerado,
            (S::VoucherGerado, E::RedeemVoucher) => S::Encerrado,
            (from, event) => return Err(InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// Player page the frontend should send a code holder to.
    pub fn redirect_path(self) -> &'static str {
        match self {
            Self::Ativo => "/validar",
            Self::Validado | Self::AguardandoRaspagem => "/jogar",
            Self::AguardandoDadosGanhador => "/ganhador",
            Self::ColetaDadosGanhador | Self::VoucherGerado => "/voucher",
            Self::Encerrado => "/encerrado",
        }
    }
}

impl fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Validate => "validate",
            Self::StartGame => "start the game for",
            Self::FinishGame { .. } => "finish the game for",
            Self::SubmitWinner => "submit winner data for",
            Self::GenerateVoucher => "generate a voucher for",
            Self::RedeemVoucher => "redeem the voucher of",
        };
        f.write_str(verb)
    }
}
