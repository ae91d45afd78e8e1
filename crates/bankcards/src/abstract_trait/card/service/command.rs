use crate::{
    abstract_trait::security::AuthContext,
    domain::{
        requests::card::CreateCardRequest,
        responses::{ApiResponse, CardResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardCommandService = Arc<dyn CardCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateCardRequest,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError>;

    /// Active -> Blocked, by owner or admin.
    async fn block(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError>;

    /// Blocked -> Active, admin only.
    async fn activate(
        &self,
        card_id: i32,
        auth: &AuthContext,
    ) -> Result<ApiResponse<CardResponse>, ServiceError>;

    /// Admin only; terminal, historical transfers keep referencing the id.
    async fn delete(&self, card_id: i32, auth: &AuthContext)
    -> Result<ApiResponse<bool>, ServiceError>;
}
