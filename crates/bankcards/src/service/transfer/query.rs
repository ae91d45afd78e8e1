use crate::{
    abstract_trait::{
        card::repository::query::{CardQueryRepositoryTrait, DynCardQueryRepository},
        security::AuthContext,
        transfer::{
            repository::query::{DynTransferQueryRepository, TransferQueryRepositoryTrait},
            service::query::TransferQueryServiceTrait,
        },
    },
    cache::CacheStore,
    domain::{
        requests::transfer::{FindTransfersByCard, FindTransfersByUser},
        responses::{ApiResponse, ApiResponsePagination, Pagination, TransferResponse},
    },
    errors::{
        CARD_NOT_FOUND, RepositoryError, ServiceError, TRANSFER_NOT_FOUND,
        UNAUTHORIZED_VIEW_TRANSFER, UNAUTHORIZED_VIEW_USER_HISTORY,
    },
};
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

pub struct TransferQueryService {
    query: DynTransferQueryRepository,
    card_query: DynCardQueryRepository,
    cache: Arc<CacheStore>,
}

impl TransferQueryService {
    pub fn new(
        query: DynTransferQueryRepository,
        card_query: DynCardQueryRepository,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            query,
            card_query,
            cache,
        }
    }

    /// Whether the caller owns the card behind `card_id`. A card deleted
    /// since the transfer was recorded counts as not owned.
    async fn owns_card(&self, card_id: i32, user_id: i32) -> Result<bool, ServiceError> {
        match self.card_query.find_by_id(card_id).await {
            Ok(card) => Ok(card.user_id == user_id),
            Err(RepositoryError::NotFound) => Ok(false),
            Err(e) => Err(ServiceError::Repo(e)),
        }
    }
}

#[async_trait]
impl TransferQueryServiceTrait for TransferQueryService {
    async fn find_by_card(
        &self,
        req: &FindTransfersByCard,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, ServiceError> {
        let card = match self.card_query.find_by_id(req.card_id).await {
            Ok(card) => card,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(CARD_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        // History through a card is for its owner only, admins included.
        if card.user_id != auth.user_id {
            return Err(ServiceError::Forbidden(
                UNAUTHORIZED_VIEW_USER_HISTORY.to_string(),
            ));
        }

        let cache_key = format!(
            "transfers:find_by_card:{}:{}:{}",
            req.card_id, req.page, req.page_size
        );
        if let Some(cached) = self
            .cache
            .get_from_cache::<ApiResponsePagination<Vec<TransferResponse>>>(&cache_key)
            .await
        {
            info!("🎯 Cache hit for {cache_key}");
            return Ok(cached);
        }

        let (transfers, total) = self.query.find_by_card(req).await?;

        let response = ApiResponsePagination {
            status: "success".to_string(),
            message: "Transfers retrieved successfully".to_string(),
            data: transfers.into_iter().map(TransferResponse::from).collect(),
            pagination: Pagination::new(req.page, req.page_size, total),
        };

        self.cache
            .set_to_cache(&cache_key, &response, Duration::minutes(5))
            .await;

        Ok(response)
    }

    async fn find_by_user(
        &self,
        req: &FindTransfersByUser,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, ServiceError> {
        if req.user_id != auth.user_id {
            return Err(ServiceError::Forbidden(
                UNAUTHORIZED_VIEW_USER_HISTORY.to_string(),
            ));
        }

        let cache_key = format!(
            "transfers:find_by_user:{}:{}:{}",
            req.user_id, req.page, req.page_size
        );
        if let Some(cached) = self
            .cache
            .get_from_cache::<ApiResponsePagination<Vec<TransferResponse>>>(&cache_key)
            .await
        {
            info!("🎯 Cache hit for {cache_key}");
            return Ok(cached);
        }

        let card_ids = self.card_query.find_ids_by_user(req.user_id).await?;

        // A user with no cards has an empty history; skip the ledger query.
        let (transfers, total) = if card_ids.is_empty() {
            (vec![], 0)
        } else {
            self.query
                .find_by_cards(&card_ids, req.page, req.page_size)
                .await?
        };

        let response = ApiResponsePagination {
            status: "success".to_string(),
            message: "Transfers retrieved successfully".to_string(),
            data: transfers.into_iter().map(TransferResponse::from).collect(),
            pagination: Pagination::new(req.page, req.page_size, total),
        };

        self.cache
            .set_to_cache(&cache_key, &response, Duration::minutes(5))
            .await;

        Ok(response)
    }

    async fn find_by_id(
        &self,
        transfer_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<TransferResponse>, ServiceError> {
        let transfer = match self.query.find_by_id(transfer_id).await {
            Ok(transfer) => transfer,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(TRANSFER_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        // No admin bypass here either; visibility follows ownership of a
        // leg, nothing else.
        let authorized = self.owns_card(transfer.from_card_id, auth.user_id).await?
            || self.owns_card(transfer.to_card_id, auth.user_id).await?;

        if !authorized {
            return Err(ServiceError::Forbidden(
                UNAUTHORIZED_VIEW_TRANSFER.to_string(),
            ));
        }

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Transfer retrieved successfully".to_string(),
            data: TransferResponse::from(transfer),
        })
    }
}
