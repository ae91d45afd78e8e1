use crate::{
    abstract_trait::security::AuthContext,
    domain::{
        requests::card::FindCardsByUser,
        responses::{ApiResponse, ApiResponsePagination, CardResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardQueryService = Arc<dyn CardQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardQueryServiceTrait {
    async fn find_by_user(
        &self,
        req: &FindCardsByUser,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError>;

    async fn find_by_id(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError>;
}
