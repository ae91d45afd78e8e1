use super::map_transfer_row;
use crate::{
    abstract_trait::transfer::repository::command::TransferCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::transfer::CreateTransferRequest,
    errors::{DESTINATION_CARD_NOT_ACTIVE, RepositoryError, SOURCE_CARD_NOT_ACTIVE},
    model::{
        card::CardStatus,
        transfer::{TransferModel, TransferStatus},
    },
};
use async_trait::async_trait;
use sqlx::Row;
use tracing::{error, warn};
use uuid::Uuid;

/// Attempts per transfer before a serialization conflict is surfaced to
/// the caller as a transient failure.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

pub struct TransferCommandRepository {
    db: ConnectionPool,
}

impl TransferCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    fn map_tx_err(e: sqlx::Error) -> RepositoryError {
        if RepositoryError::is_retryable(&e) {
            RepositoryError::Conflict("transfer conflicted with concurrent activity".to_string())
        } else {
            RepositoryError::Sqlx(e)
        }
    }

    /// One commit attempt. Both card rows are locked `FOR UPDATE` in
    /// ascending card_id order (fixed global order, so two transfers that
    /// share cards cannot deadlock), statuses and the source balance are
    /// re-checked under the lock, and debit + credit + ledger row go into
    /// a single transaction.
    async fn try_commit(
        &self,
        req: &CreateTransferRequest,
    ) -> Result<TransferModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(Self::map_tx_err)?;

        let locked = sqlx::query(
            r#"
            SELECT card_id, balance, status
            FROM cards
            WHERE card_id = ANY($1)
            ORDER BY card_id
            FOR UPDATE
            "#,
        )
        .bind(vec![req.from_card_id, req.to_card_id])
        .fetch_all(&mut *tx)
        .await
        .map_err(Self::map_tx_err)?;

        if locked.len() != 2 {
            return Err(RepositoryError::NotFound);
        }

        // Validation ran on an unlocked snapshot; a concurrent debit or
        // status change may have won the race, so both checks repeat here.
        let mut source_balance = None;
        for row in &locked {
            let card_id: i32 = row.try_get("card_id").map_err(RepositoryError::Sqlx)?;
            let status: String = row.try_get("status").map_err(RepositoryError::Sqlx)?;

            if status != CardStatus::Active.as_str() {
                let msg = if card_id == req.from_card_id {
                    SOURCE_CARD_NOT_ACTIVE
                } else {
                    DESTINATION_CARD_NOT_ACTIVE
                };
                return Err(RepositoryError::Custom(msg.to_string()));
            }

            if card_id == req.from_card_id {
                source_balance = Some(row.try_get::<i64, _>("balance").map_err(RepositoryError::Sqlx)?);
            }
        }
        let available = source_balance.ok_or(RepositoryError::NotFound)?;

        if available < req.amount {
            return Err(RepositoryError::InsufficientBalance {
                available,
                requested: req.amount,
            });
        }

        sqlx::query("UPDATE cards SET balance = balance - $2, updated_at = NOW() WHERE card_id = $1")
            .bind(req.from_card_id)
            .bind(req.amount)
            .execute(&mut *tx)
            .await
            .map_err(Self::map_tx_err)?;

        sqlx::query("UPDATE cards SET balance = balance + $2, updated_at = NOW() WHERE card_id = $1")
            .bind(req.to_card_id)
            .bind(req.amount)
            .execute(&mut *tx)
            .await
            .map_err(Self::map_tx_err)?;

        let row = sqlx::query(
            r#"
            INSERT INTO transfers (transfer_no, from_card_id, to_card_id,
                                   amount, status, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING transfer_id, transfer_no, from_card_id, to_card_id,
                      amount, status, description, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.from_card_id)
        .bind(req.to_card_id)
        .bind(req.amount)
        .bind(TransferStatus::Success.as_str())
        .bind(req.description.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_tx_err)?;

        let transfer = map_transfer_row(&row).map_err(RepositoryError::Sqlx)?;

        tx.commit().await.map_err(Self::map_tx_err)?;

        Ok(transfer)
    }
}

#[async_trait]
impl TransferCommandRepositoryTrait for TransferCommandRepository {
    async fn create(&self, req: &CreateTransferRequest) -> Result<TransferModel, RepositoryError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_commit(req).await {
                Err(RepositoryError::Conflict(msg)) if attempt < MAX_COMMIT_ATTEMPTS => {
                    warn!(
                        "⚡ Transfer {} -> {} conflicted (attempt {attempt}): {msg}",
                        req.from_card_id, req.to_card_id
                    );
                    continue;
                }
                Err(e) => {
                    error!(
                        "❌ Failed to commit transfer {} -> {}: {e:?}",
                        req.from_card_id, req.to_card_id
                    );
                    return Err(e);
                }
                ok => return ok,
            }
        }
    }
}
