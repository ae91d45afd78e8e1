use crate::{
    domain::requests::card::CreateCardRequest, errors::RepositoryError, model::card::CardModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardCommandRepository = Arc<dyn CardCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CardCommandRepositoryTrait {
    /// Inserts a new ACTIVE card with balance 0. The caller supplies the
    /// ciphertext; plaintext PANs never reach the repository.
    async fn create(
        &self,
        req: &CreateCardRequest,
        encrypted_number: &str,
    ) -> Result<CardModel, RepositoryError>;

    async fn update_status(&self, card_id: i32, status: &str)
    -> Result<CardModel, RepositoryError>;

    async fn delete(&self, card_id: i32) -> Result<bool, RepositoryError>;
}
