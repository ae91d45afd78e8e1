use super::map_card_row;
use crate::{
    abstract_trait::card::repository::query::CardQueryRepositoryTrait, config::ConnectionPool,
    domain::requests::card::FindCardsByUser, errors::RepositoryError, model::card::CardModel,
};
use async_trait::async_trait;
use sqlx::Row;
use tracing::error;

pub struct CardQueryRepository {
    db: ConnectionPool,
}

impl CardQueryRepository {
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
impl CardQueryRepositoryTrait for CardQueryRepository {
    async fn find_by_id(&self, card_id: i32) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = r#"
            SELECT card_id, user_id, card_number, status, balance,
                   expiry_date, created_at, updated_at
            FROM cards
            WHERE card_id = $1
        "#;

        let row = sqlx::query(sql)
            .bind(card_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch card {card_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        map_card_row(&row).map_err(RepositoryError::Sqlx)
    }

    async fn find_by_user(
        &self,
        req: &FindCardsByUser,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let limit = req.page_size.clamp(1, 100);
        let offset = (req.page - 1).max(0) * limit;

        let sql = r#"
            SELECT card_id, user_id, card_number, status, balance,
                   expiry_date, created_at, updated_at,
                   COUNT(*) OVER() AS total_count
            FROM cards
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY card_id
            LIMIT $3 OFFSET $4
        "#;

        let rows = sqlx::query(sql)
            .bind(req.user_id)
            .bind(req.status.as_deref())
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch cards for user {}: {e:?}", req.user_id);
                RepositoryError::Sqlx(e)
            })?;

        let total = rows
            .first()
            .and_then(|r| r.try_get::<i64, _>("total_count").ok())
            .unwrap_or(0);

        let cards = rows
            .iter()
            .map(map_card_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| {
                error!("❌ Failed to map card rows: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        Ok((cards, total))
    }

    async fn find_ids_by_user(&self, user_id: i32) -> Result<Vec<i32>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let ids = sqlx::query_scalar::<_, i32>(
            "SELECT card_id FROM cards WHERE user_id = $1 ORDER BY card_id",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch card ids for user {user_id}: {e:?}");
            RepositoryError::Sqlx(e)
        })?;

        Ok(ids)
    }

    async fn exists_by_card_number(
        &self,
        encrypted_number: &str,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cards WHERE card_number = $1)",
        )
        .bind(encrypted_number)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to check card number uniqueness: {e:?}");
            RepositoryError::Sqlx(e)
        })?;

        Ok(exists)
    }
}
