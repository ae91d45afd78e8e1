mod command;
mod query;

pub use self::command::UserCommandRepository;
pub use self::query::UserQueryRepository;

use crate::model::user::UserModel;
use sqlx::Row;
use sqlx::postgres::PgRow;

pub(crate) fn map_user_row(row: &PgRow) -> Result<UserModel, sqlx::Error> {
    Ok(UserModel {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        full_name: row.try_get("full_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
