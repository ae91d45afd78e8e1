use crate::{
    abstract_trait::security::AuthContext,
    domain::{
        requests::user::FindAllUsers,
        responses::{ApiResponse, ApiResponsePagination, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryService = Arc<dyn UserQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryServiceTrait {
    /// Admin only.
    async fn find_all(
        &self,
        req: &FindAllUsers,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError>;

    /// Admin or self.
    async fn find_by_id(
        &self,
        user_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
