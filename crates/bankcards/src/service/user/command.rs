use super::user_to_response;
use crate::{
    abstract_trait::{
        security::{AuthContext, DynSecurityService, SecurityServiceTrait},
        user::{
            repository::{
                command::{DynUserCommandRepository, UserCommandRepositoryTrait},
                query::{DynUserQueryRepository, UserQueryRepositoryTrait},
            },
            service::command::UserCommandServiceTrait,
        },
    },
    cache::{CacheInvalidationPolicy, CacheStore},
    domain::{
        requests::user::{CreateUserRequest, UpdateUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::{
        ADMIN_ONLY, EMAIL_EXISTS, RepositoryError, ServiceError, USER_NOT_FOUND, USERNAME_EXISTS,
        format_validation_errors,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct UserCommandService {
    command: DynUserCommandRepository,
    query: DynUserQueryRepository,
    security: DynSecurityService,
    cache: Arc<CacheStore>,
    invalidation: CacheInvalidationPolicy,
}

impl UserCommandService {
    pub fn new(
        command: DynUserCommandRepository,
        query: DynUserQueryRepository,
        security: DynSecurityService,
        cache: Arc<CacheStore>,
    ) -> Self {
        Self {
            command,
            query,
            security,
            cache,
            invalidation: CacheInvalidationPolicy,
        }
    }

    async fn invalidate(&self, user_id: i32) {
        for key in self.invalidation.after_user_mutated(user_id) {
            self.cache.delete_from_cache(&key).await;
        }
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create(
        &self,
        req: &CreateUserRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        // Self-registration belongs to the auth surface; here accounts are
        // provisioned by admins.
        if !self.security.is_admin(auth) {
            return Err(ServiceError::Forbidden(ADMIN_ONLY.to_string()));
        }

        req.validate()
            .map_err(|e| ServiceError::Validation(format_validation_errors(&e)))?;

        if self.query.exists_by_username(&req.username).await? {
            return Err(ServiceError::BadRequest(USERNAME_EXISTS.to_string()));
        }
        if self.query.exists_by_email(&req.email).await? {
            return Err(ServiceError::BadRequest(EMAIL_EXISTS.to_string()));
        }

        let user = match self.command.create(req).await {
            Ok(user) => user,
            // Pre-checks raced a concurrent insert and lost.
            Err(RepositoryError::AlreadyExists(msg)) => {
                return Err(ServiceError::BadRequest(msg));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        info!("👤 Created user {} ({})", user.user_id, user.username);

        self.invalidate(user.user_id).await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "User created successfully".to_string(),
            data: user_to_response(&self.query, user).await?,
        })
    }

    async fn update(
        &self,
        req: &UpdateUserRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let target_user_id = req.user_id.unwrap_or(auth.user_id);

        self.security.assert_user_access(auth, target_user_id)?;

        req.validate()
            .map_err(|e| ServiceError::Validation(format_validation_errors(&e)))?;

        if let Some(email) = &req.email {
            let current = match self.query.find_by_id(target_user_id).await {
                Ok(user) => user,
                Err(RepositoryError::NotFound) => {
                    return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
                }
                Err(e) => return Err(ServiceError::Repo(e)),
            };

            if *email != current.email && self.query.exists_by_email(email).await? {
                return Err(ServiceError::BadRequest(EMAIL_EXISTS.to_string()));
            }
        }

        let effective = UpdateUserRequest {
            user_id: Some(target_user_id),
            ..req.clone()
        };

        let user = match self.command.update(&effective).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        info!("👤 Updated user {target_user_id}");

        self.invalidate(target_user_id).await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "User updated successfully".to_string(),
            data: user_to_response(&self.query, user).await?,
        })
    }

    async fn delete(
        &self,
        user_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        if !self.security.is_admin(auth) {
            return Err(ServiceError::Forbidden(ADMIN_ONLY.to_string()));
        }

        let deleted = match self.command.delete(user_id).await {
            Ok(deleted) => deleted,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(ServiceError::Repo(e)),
        };

        info!("🗑️ Deleted user {user_id}");

        self.invalidate(user_id).await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "User deleted successfully".to_string(),
            data: deleted,
        })
    }
}
