use crate::{
    domain::requests::transfer::CreateTransferRequest, errors::RepositoryError,
    model::transfer::TransferModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransferCommandRepository = Arc<dyn TransferCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TransferCommandRepositoryTrait {
    /// Commits a validated transfer as one unit: debit, credit, and the
    /// SUCCESS ledger row either all become visible together or not at
    /// all. Implementations must re-check the source balance under
    /// whatever locking discipline they use and return
    /// [`RepositoryError::InsufficientBalance`] when a concurrent debit
    /// won the race. Serialization conflicts are retried internally a
    /// bounded number of times.
    async fn create(&self, req: &CreateTransferRequest) -> Result<TransferModel, RepositoryError>;
}
