pub mod card;
pub mod transfer;
pub mod user;
