//! Auth types shared across Pedidos da Sorte services.
//!
//! Provides the gateway `IdentityHeaders` extractor and the short-lived
//! bearer tokens presented to the WhatsApp bot.

pub mod bot_token;
pub mod identity;
