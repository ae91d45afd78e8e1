use crate::{
    abstract_trait::security::AuthContext,
    domain::{
        requests::user::{CreateUserRequest, UpdateUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandService = Arc<dyn UserCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateUserRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;

    async fn update(
        &self,
        req: &UpdateUserRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;

    async fn delete(&self, user_id: i32, auth: &AuthContext)
    -> Result<ApiResponse<bool>, ServiceError>;
}
