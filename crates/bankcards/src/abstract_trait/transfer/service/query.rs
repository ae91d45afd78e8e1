use crate::{
    abstract_trait::security::AuthContext,
    domain::{
        requests::transfer::{FindTransfersByCard, FindTransfersByUser},
        responses::{ApiResponse, ApiResponsePagination, TransferResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransferQueryService = Arc<dyn TransferQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransferQueryServiceTrait {
    /// History for one card; the caller must own it.
    async fn find_by_card(
        &self,
        req: &FindTransfersByCard,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, ServiceError>;

    /// History across all of a user's cards; strictly self-only, admins
    /// included.
    async fn find_by_user(
        &self,
        req: &FindTransfersByUser,
        auth: &AuthContext,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, ServiceError>;

    /// Visible to the owner of either leg.
    async fn find_by_id(
        &self,
        transfer_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<TransferResponse>, ServiceError>;
}
