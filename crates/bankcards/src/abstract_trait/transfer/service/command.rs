use crate::{
    abstract_trait::security::AuthContext,
    domain::{
        requests::transfer::CreateTransferRequest,
        responses::{ApiResponse, TransferResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransferCommandService = Arc<dyn TransferCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransferCommandServiceTrait {
    /// Moves money between two cards the caller owns. Validation failures
    /// persist nothing; on success the returned receipt corresponds to an
    /// already-committed ledger row.
    async fn create(
        &self,
        req: &CreateTransferRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<TransferResponse>, ServiceError>;
}
