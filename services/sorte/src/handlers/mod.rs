pub mod campaign;
pub mod code;
pub mod game;
pub mod health;
pub mod user;
pub mod voucher;
pub mod whatsapp;
