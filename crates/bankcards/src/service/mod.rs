pub mod card;
pub mod security;
pub mod transfer;
pub mod user;

pub use self::security::SecurityService;
