use super::map_transfer_row;
use crate::{
    abstract_trait::transfer::repository::query::TransferQueryRepositoryTrait,
    config::ConnectionPool, domain::requests::transfer::FindTransfersByCard,
    errors::RepositoryError, model::transfer::TransferModel,
};
use async_trait::async_trait;
use sqlx::Row;
use tracing::error;

pub struct TransferQueryRepository {
    db: ConnectionPool,
}

impl TransferQueryRepository {
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
impl TransferQueryRepositoryTrait for TransferQueryRepository {
    async fn find_by_id(&self, transfer_id: i32) -> Result<TransferModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = r#"
            SELECT transfer_id, transfer_no, from_card_id, to_card_id,
                   amount, status, description, created_at
            FROM transfers
            WHERE transfer_id = $1
        "#;

        let row = sqlx::query(sql)
            .bind(transfer_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch transfer {transfer_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        map_transfer_row(&row).map_err(RepositoryError::Sqlx)
    }

    async fn find_by_card(
        &self,
        req: &FindTransfersByCard,
    ) -> Result<(Vec<TransferModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let limit = req.page_size.clamp(1, 100);
        let offset = (req.page - 1).max(0) * limit;

        let sql = r#"
            SELECT transfer_id, transfer_no, from_card_id, to_card_id,
                   amount, status, description, created_at,
                   COUNT(*) OVER() AS total_count
            FROM transfers
            WHERE from_card_id = $1 OR to_card_id = $1
            ORDER BY created_at DESC, transfer_id DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(sql)
            .bind(req.card_id)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch transfers for card {}: {e:?}", req.card_id);
                RepositoryError::Sqlx(e)
            })?;

        let total = rows
            .first()
            .and_then(|r| r.try_get::<i64, _>("total_count").ok())
            .unwrap_or(0);

        let transfers = rows
            .iter()
            .map(map_transfer_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| {
                error!("❌ Failed to map transfer rows: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        Ok((transfers, total))
    }

    async fn find_by_cards(
        &self,
        card_ids: &[i32],
        page: i32,
        page_size: i32,
    ) -> Result<(Vec<TransferModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let limit = page_size.clamp(1, 100);
        let offset = (page - 1).max(0) * limit;

        let sql = r#"
            SELECT transfer_id, transfer_no, from_card_id, to_card_id,
                   amount, status, description, created_at,
                   COUNT(*) OVER() AS total_count
            FROM transfers
            WHERE from_card_id = ANY($1) OR to_card_id = ANY($1)
            ORDER BY created_at DESC, transfer_id DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(sql)
            .bind(card_ids.to_vec())
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch transfers for cards {card_ids:?}: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        let total = rows
            .first()
            .and_then(|r| r.try_get::<i64, _>("total_count").ok())
            .unwrap_or(0);

        let transfers = rows
            .iter()
            .map(map_transfer_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| {
                error!("❌ Failed to map transfer rows: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        Ok((transfers, total))
    }
}
