//! Service plumbing shared by Pedidos da Sorte services: errors, extractors,
//! health, request ids, tracing, configuration and serde helpers.

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
