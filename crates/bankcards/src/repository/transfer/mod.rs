mod command;
mod query;

pub use self::command::TransferCommandRepository;
pub use self::query::TransferQueryRepository;

use crate::model::transfer::TransferModel;
use sqlx::Row;
use sqlx::postgres::PgRow;

pub(crate) fn map_transfer_row(row: &PgRow) -> Result<TransferModel, sqlx::Error> {
    Ok(TransferModel {
        transfer_id: row.try_get("transfer_id")?,
        transfer_no: row.try_get("transfer_no")?,
        from_card_id: row.try_get("from_card_id")?,
        to_card_id: row.try_get("to_card_id")?,
        amount: row.try_get("amount")?,
        status: row.try_get("status")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}
