//! Domain types shared across the Pedidos da Sorte crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod allocation;
pub mod campaign;
pub mod code_status;
pub mod pagination;
pub mod phone;
pub mod user;
