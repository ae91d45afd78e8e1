use super::user_to_response;
use crate::{
    abstract_trait::{
        security::{AuthContext, DynSecurityService, SecurityServiceTrait},
        user::{
            repository::query::{DynUserQueryRepository, UserQueryRepositoryTrait},
            service::query::UserQueryServiceTrait,
        },
    },
    cache::CacheStore,
    domain::{
        requests::user::FindAllUsers,
        responses::{ApiResponse, ApiResponsePagination, Pagination, UserResponse},
    },
    errors::{ADMIN_ONLY, RepositoryError, ServiceError, USER_NOT_FOUND},
};
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

pub struct UserQueryService {
    query: DynUserQueryRepository,
    security: DynSecurityService,
    cache: Arc<CacheStore>,
}

impl UserQueryService {
    pub fn new(
        query: DynUserQueryRepository,
        security: DynSecurityService,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            query,
            security,
            cache,
        }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        if !self.security.is_admin(auth) {
            return Err(ServiceError::Forbidden(ADMIN_ONLY.to_string()));
        }

        let cache_key = format!(
            "users:find_all:{}:{}:{}",
            req.page, req.page_size, req.search
        );
        if let Some(cached) = self
            .cache
            .get_from_cache::<ApiResponsePagination<Vec<UserResponse>>>(&cache_key)
            .await
        {
            info!("🎯 Cache hit for {cache_key}");
            return Ok(cached);
        }

        let (users, total) = self.query.find_all(req).await?;

        let mut data = Vec::with_capacity(users.len());
        for user in users {
            data.push(user_to_response(&self.query, user).await?);
        }

        let response = ApiResponsePagination {
            status: "success".to_string(),
            message: "Users retrieved successfully".to_string(),
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
        user_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.security.assert_user_access(auth, user_id)?;

        let cache_key = format!("users:find_by_id:{user_id}");
        if let Some(cached) = self
            .cache
            .get_from_cache::<ApiResponse<UserResponse>>(&cache_key)
            .await
        {
            info!("🎯 Cache hit for {cache_key}");
            return Ok(cached);
        }

        let user = match self.query.find_by_id(user_id).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        let response = ApiResponse {
            status: "success".to_string(),
            message: "User retrieved successfully".to_string(),
            data: user_to_response(&self.query, user).await?,
        };

        self.cache
            .set_to_cache(&cache_key, &response, Duration::minutes(5))
            .await;

        Ok(response)
    }
}
