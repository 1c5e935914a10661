//! Test utilities for Pedidos da Sorte services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
