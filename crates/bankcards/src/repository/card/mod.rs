mod command;
mod query;

pub use self::command::CardCommandRepository;
pub use self::query::CardQueryRepository;

use crate::model::card::CardModel;
use sqlx::Row;
use sqlx::postgres::PgRow;

pub(crate) fn map_card_row(row: &PgRow) -> Result<CardModel, sqlx::Error> {
    Ok(CardModel {
        card_id: row.try_get("card_id")?,
        user_id: row.try_get("user_id")?,
        card_number: row.try_get("card_number")?,
        status: row.try_get("status")?,
        balance: row.try_get("balance")?,
        expiry_date: row.try_get("expiry_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
