use crate::{
    domain::requests::card::FindCardsByUser, errors::RepositoryError, model::card::CardModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardQueryRepository = Arc<dyn CardQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CardQueryRepositoryTrait {
    async fn find_by_id(&self, card_id: i32) -> Result<CardModel, RepositoryError>;

    /// Paged card list for one owner, optionally filtered by status. The
    /// status string is pre-validated by the service layer.
    async fn find_by_user(
        &self,
        req: &FindCardsByUser,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError>;

    /// All card ids owned by a user, unpaged, ascending.
    async fn find_ids_by_user(&self, user_id: i32) -> Result<Vec<i32>, RepositoryError>;

    /// Uniqueness probe against the stored ciphertext. Works because the
    /// codec is deterministic: equal PANs produce equal ciphertexts.
    async fn exists_by_card_number(&self, encrypted_number: &str)
    -> Result<bool, RepositoryError>;
}
