pub mod card;
pub mod role;
pub mod transfer;
pub mod user;
