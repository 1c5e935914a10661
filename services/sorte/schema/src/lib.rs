pub mod campaign_prizes;
pub mod campaigns;
pub mod codes;
pub mod positions;
pub mod users;
pub mod vouchers;
pub mod winners;
