use super::validate_transfer;
use crate::{
    abstract_trait::{
        card::repository::query::{CardQueryRepositoryTrait, DynCardQueryRepository},
        security::{AuthContext, DynSecurityService, SecurityServiceTrait},
        transfer::{
            repository::command::{DynTransferCommandRepository, TransferCommandRepositoryTrait},
            service::command::TransferCommandServiceTrait,
        },
    },
    cache::{CacheInvalidationPolicy, CacheStore},
    domain::{
        requests::transfer::CreateTransferRequest,
        responses::{ApiResponse, TransferResponse},
    },
    errors::{
        CARD_NOT_FOUND, DESTINATION_CARD_NOT_FOUND, INSUFFICIENT_BALANCE, RepositoryError,
        ServiceError, SOURCE_CARD_NOT_FOUND, format_validation_errors,
    },
    model::card::CardModel,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct TransferCommandService {
    command: DynTransferCommandRepository,
    card_query: DynCardQueryRepository,
    security: DynSecurityService,
    cache: Arc<CacheStore>,
    invalidation: CacheInvalidationPolicy,
}

impl TransferCommandService {
    pub fn new(
        command: DynTransferCommandRepository,
        card_query: DynCardQueryRepository,
        security: DynSecurityService,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            command,
            card_query,
            security,
            cache,
            invalidation: CacheInvalidationPolicy,
        }
    }

    async fn load_card(&self, card_id: i32, missing: &str) -> Result<CardModel, ServiceError> {
        match self.card_query.find_by_id(card_id).await {
            Ok(card) => Ok(card),
            Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(missing.to_string())),
            Err(e) => Err(ServiceError::Repo(e)),
        }
    }
}

#[async_trait]
impl TransferCommandServiceTrait for TransferCommandService {
    async fn create(
        &self,
        req: &CreateTransferRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<TransferResponse>, ServiceError> {
        req.validate()
            .map_err(|e| ServiceError::Validation(format_validation_errors(&e)))?;

        let from = self
            .load_card(req.from_card_id, SOURCE_CARD_NOT_FOUND)
            .await?;
        let to = self
            .load_card(req.to_card_id, DESTINATION_CARD_NOT_FOUND)
            .await?;

        // Fails if the account behind the token is gone.
        let caller = self.security.current_user(auth).await?;

        validate_transfer(req, caller.user_id, &from, &to)?;

        // The snapshot checks above can go stale; the repository re-checks
        // status and balance under row locks and commits atomically.
        let transfer = match self.command.create(req).await {
            Ok(transfer) => transfer,
            Err(RepositoryError::InsufficientBalance { .. }) => {
                return Err(ServiceError::InsufficientBalance(
                    INSUFFICIENT_BALANCE.to_string(),
                ));
            }
            // A card vanished or changed status between validation and
            // commit.
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(CARD_NOT_FOUND.to_string()));
            }
            Err(RepositoryError::Custom(msg)) => {
                return Err(ServiceError::BadRequest(msg));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        info!(
            "💸 Transfer {} committed: card {} -> card {} amount {}",
            transfer.transfer_no, transfer.from_card_id, transfer.to_card_id, transfer.amount
        );

        for key in self.invalidation.after_transfer(&from, &to) {
            self.cache.delete_from_cache(&key).await;
        }

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transfer completed successfully".to_string(),
            data: TransferResponse::from(transfer),
        })
    }
}
