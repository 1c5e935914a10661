pub mod campaign;
pub mod code;
pub mod game;
pub mod user;
pub mod validation;
pub mod voucher;
pub mod whatsapp;
pub mod winner;
