mod command;
mod query;
mod validator;

pub use self::command::TransferCommandService;
pub use self::query::TransferQueryService;
pub(crate) use self::validator::validate_transfer;
