use super::card_to_response;
use crate::{
    abstract_trait::{
        card::{
            repository::{
                command::{CardCommandRepositoryTrait, DynCardCommandRepository},
                query::{CardQueryRepositoryTrait, DynCardQueryRepository},
            },
            service::command::CardCommandServiceTrait,
        },
        security::{AuthContext, DynSecurityService, SecurityServiceTrait},
        user::repository::query::{DynUserQueryRepository, UserQueryRepositoryTrait},
    },
    cache::{CacheInvalidationPolicy, CacheStore},
    domain::{
        requests::card::CreateCardRequest,
        responses::{ApiResponse, CardResponse},
    },
    errors::{
        ADMIN_ONLY, CARD_NOT_FOUND, CARD_NUMBER_EXISTS, RepositoryError, ServiceError,
        USER_NOT_FOUND, format_validation_errors,
    },
    model::card::CardStatus,
    utils::CardCipher,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct CardCommandService {
    command: DynCardCommandRepository,
    query: DynCardQueryRepository,
    user_query: DynUserQueryRepository,
    security: DynSecurityService,
    cipher: Arc<CardCipher>,
    cache: Arc<CacheStore>,
    invalidation: CacheInvalidationPolicy,
}

impl CardCommandService {
    pub fn new(
        command: DynCardCommandRepository,
        query: DynCardQueryRepository,
        user_query: DynUserQueryRepository,
        security: DynSecurityService,
        cipher: Arc<CardCipher>,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            command,
            query,
            user_query,
            security,
            cipher,
            cache,
            invalidation: CacheInvalidationPolicy,
        }
    }

    async fn invalidate(&self, keys: Vec<String>) {
        for key in keys {
            self.cache.delete_from_cache(&key).await;
        }
    }

    async fn load_card(&self, card_id: i32) -> Result<crate::model::card::CardModel, ServiceError> {
        match self.query.find_by_id(card_id).await {
            Ok(card) => Ok(card),
            Err(RepositoryError::NotFound) => {
                Err(ServiceError::NotFound(CARD_NOT_FOUND.to_string()))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        }
    }
}

#[async_trait]
impl CardCommandServiceTrait for CardCommandService {
    async fn create(
        &self,
        req: &CreateCardRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        req.validate()
            .map_err(|e| ServiceError::Validation(format_validation_errors(&e)))?;

        self.security.assert_user_access(auth, req.user_id)?;

        match self.user_query.find_by_id(req.user_id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        }

        let encrypted = self.cipher.encrypt(&req.card_number)?;

        if self.query.exists_by_card_number(&encrypted).await? {
            return Err(ServiceError::BadRequest(CARD_NUMBER_EXISTS.to_string()));
        }

        let card = match self.command.create(req, &encrypted).await {
            Ok(card) => card,
            // Concurrent creation of the same PAN loses on the unique index.
            Err(RepositoryError::AlreadyExists(msg)) => {
                return Err(ServiceError::BadRequest(msg));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        info!("💳 Created card {} for user {}", card.card_id, card.user_id);

        self.invalidate(self.invalidation.after_card_created(card.user_id))
            .await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Card created successfully".to_string(),
            data: card_to_response(&self.cipher, &card)?,
        })
    }

    async fn block(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        let card = self.load_card(card_id).await?;

        if !self.security.is_admin(auth) {
            let user = self.security.current_user(auth).await?;
            self.security.assert_card_ownership(&card, &user)?;
        }

        if !card.is_active() {
            return Err(ServiceError::BadRequest(
                "Only an active card can be blocked".to_string(),
            ));
        }

        let updated = self
            .command
            .update_status(card_id, CardStatus::Blocked.as_str())
            .await?;

        info!("🚫 Blocked card {card_id}");

        self.invalidate(self.invalidation.after_card_mutated(card_id, updated.user_id))
            .await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Card blocked successfully".to_string(),
            data: card_to_response(&self.cipher, &updated)?,
        })
    }

    async fn activate(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        if !self.security.is_admin(auth) {
            return Err(ServiceError::Forbidden(ADMIN_ONLY.to_string()));
        }

        let card = self.load_card(card_id).await?;

        if card.card_status() != Some(CardStatus::Blocked) {
            return Err(ServiceError::BadRequest(
                "Only a blocked card can be activated".to_string(),
            ));
        }

        let updated = self
            .command
            .update_status(card_id, CardStatus::Active.as_str())
            .await?;

        info!("✅ Activated card {card_id}");

        self.invalidate(self.invalidation.after_card_mutated(card_id, updated.user_id))
            .await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Card activated successfully".to_string(),
            data: card_to_response(&self.cipher, &updated)?,
        })
    }

    async fn delete(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        if !self.security.is_admin(auth) {
            return Err(ServiceError::Forbidden(ADMIN_ONLY.to_string()));
        }

        let card = self.load_card(card_id).await?;

        let deleted = self.command.delete(card_id).await?;

        info!("🗑️ Deleted card {card_id}");

        self.invalidate(self.invalidation.after_card_mutated(card_id, card.user_id))
            .await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Card deleted successfully".to_string(),
            data: deleted,
        })
    }
}
