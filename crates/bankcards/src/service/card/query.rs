use super::card_to_response;
use crate::{
    abstract_trait::{
        card::{
            repository::query::{CardQueryRepositoryTrait, DynCardQueryRepository},
            service::query::CardQueryServiceTrait,
        },
        security::{AuthContext, DynSecurityService, SecurityServiceTrait},
    },
    cache::{CacheInvalidationPolicy, CacheStore},
    domain::{
        requests::card::FindCardsByUser,
        responses::{ApiResponse, ApiResponsePagination, CardResponse, Pagination},
    },
    errors::{CARD_NOT_FOUND, RepositoryError, ServiceError, UNAUTHORIZED_VIEW_CARDS},
    model::card::CardStatus,
    utils::CardCipher,
};
use async_trait::async_trait;
use chrono::Duration;
use std::{str::FromStr, sync::Arc};
use tracing::info;

pub struct CardQueryService {
    query: DynCardQueryRepository,
    security: DynSecurityService,
    cipher: Arc<CardCipher>,
    cache: Arc<CacheStore>,
}

impl CardQueryService {
    pub fn new(
        query: DynCardQueryRepository,
        security: DynSecurityService,
        cipher: Arc<CardCipher>,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            query,
            security,
            cipher,
            cache,
        }
    }
}

#[async_trait]
impl CardQueryServiceTrait for CardQueryService {
    async fn find_by_user(
        &self,
        req: &FindCardsByUser,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError> {
        if !self.security.is_admin(auth) && auth.user_id != req.user_id {
            return Err(ServiceError::Forbidden(UNAUTHORIZED_VIEW_CARDS.to_string()));
        }

        if let Some(status) = &req.status {
            CardStatus::from_str(status).map_err(ServiceError::BadRequest)?;
        }

        let cache_key = format!(
            "cards:find_by_user:{}:{}:{}:{}",
            req.user_id,
            req.status.as_deref().unwrap_or("ALL"),
            req.page,
            req.page_size
        );
        if let Some(cached) = self
            .cache
            .get_from_cache::<ApiResponsePagination<Vec<CardResponse>>>(&cache_key)
            .await
        {
            info!("🎯 Cache hit for {cache_key}");
            return Ok(cached);
        }

        let (cards, total) = self.query.find_by_user(req).await?;

        let data = cards
            .iter()
            .map(|card| card_to_response(&self.cipher, card))
            .collect::<Result<Vec<_>, ServiceError>>()?;

        let response = ApiResponsePagination {
            status: "success".to_string(),
            message: "Cards retrieved successfully".to_string(),
            data,
            pagination: Pagination::new(req.page, req.page_size, total),
        };

        self.cache
            .set_to_cache(&cache_key, &response, Duration::minutes(5))
            .await;

        Ok(response)
    }

    async fn find_by_id(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        let card = match self.query.find_by_id(card_id).await {
            Ok(card) => card,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(CARD_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        if !self.security.is_admin(auth) && card.user_id != auth.user_id {
            return Err(ServiceError::Forbidden(UNAUTHORIZED_VIEW_CARDS.to_string()));
        }

        // Authorization always runs above; only the rendering is cached.
        let cache_key = CacheInvalidationPolicy::card_key(card_id);
        if let Some(cached) = self
            .cache
            .get_from_cache::<ApiResponse<CardResponse>>(&cache_key)
            .await
        {
            info!("🎯 Cache hit for {cache_key}");
            return Ok(cached);
        }

        let response = ApiResponse {
            status: "success".to_string(),
            message: "Card retrieved successfully".to_string(),
            data: card_to_response(&self.cipher, &card)?,
        };

        self.cache
            .set_to_cache(&cache_key, &response, Duration::minutes(5))
            .await;

        Ok(response)
    }
}
