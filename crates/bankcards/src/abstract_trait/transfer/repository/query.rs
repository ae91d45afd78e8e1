use crate::{
    domain::requests::transfer::FindTransfersByCard, errors::RepositoryError,
    model::transfer::TransferModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransferQueryRepository = Arc<dyn TransferQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TransferQueryRepositoryTrait {
    async fn find_by_id(&self, transfer_id: i32) -> Result<TransferModel, RepositoryError>;

    /// Transfers where the card is source or destination, newest first
    /// (ordering is total and stable across pages).
    async fn find_by_card(
        &self,
        req: &FindTransfersByCard,
    ) -> Result<(Vec<TransferModel>, i64), RepositoryError>;

    /// Transfers touching any of the given cards, newest first.
    async fn find_by_cards(
        &self,
        card_ids: &[i32],
        page: i32,
        page_size: i32,
    ) -> Result<(Vec<TransferModel>, i64), RepositoryError>;
}
