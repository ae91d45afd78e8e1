use super::map_card_row;
use crate::{
    abstract_trait::card::repository::command::CardCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::card::CreateCardRequest,
    errors::{CARD_NUMBER_EXISTS, RepositoryError},
    model::card::{CardModel, CardStatus},
};
use async_trait::async_trait;
use tracing::error;

pub struct CardCommandRepository {
    db: ConnectionPool,
}

impl CardCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl CardCommandRepositoryTrait for CardCommandRepository {
    async fn create(
        &self,
        req: &CreateCardRequest,
        encrypted_number: &str,
    ) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = r#"
            INSERT INTO cards (user_id, card_number, status, balance,
                               expiry_date, created_at, updated_at)
            VALUES ($1, $2, $3, 0, $4, NOW(), NOW())
            RETURNING card_id, user_id, card_number, status, balance,
                      expiry_date, created_at, updated_at
        "#;

        let row = sqlx::query(sql)
            .bind(req.user_id)
            .bind(encrypted_number)
            .bind(CardStatus::Active.as_str())
            .bind(req.expiry_date)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to create card for user {}: {e:?}", req.user_id);
                RepositoryError::from_unique(e, CARD_NUMBER_EXISTS)
            })?;

        map_card_row(&row).map_err(RepositoryError::Sqlx)
    }

    async fn update_status(
        &self,
        card_id: i32,
        status: &str,
    ) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = r#"
            UPDATE cards
            SET status = $2, updated_at = NOW()
            WHERE card_id = $1
            RETURNING card_id, user_id, card_number, status, balance,
                      expiry_date, created_at, updated_at
        "#;

        let row = sqlx::query(sql)
            .bind(card_id)
            .bind(status)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to update card {card_id} status: {e:?}");
                RepositoryError::Sqlx(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        map_card_row(&row).map_err(RepositoryError::Sqlx)
    }

    async fn delete(&self, card_id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let result = sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete card {card_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(true)
    }
}
