use crate::model::transfer::TransferModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransferResponse {
    pub id: i32,
    pub transfer_no: String,
    pub from_card_id: i32,
    pub to_card_id: i32,
    pub amount: i64,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl From<TransferModel> for TransferResponse {
    fn from(model: TransferModel) -> Self {
        Self {
            id: model.transfer_id,
            transfer_no: model.transfer_no.to_string(),
            from_card_id: model.from_card_id,
            to_card_id: model.to_card_id,
            amount: model.amount,
            status: model.status,
            description: model.description,
            created_at: model.created_at.map(|t| t.to_string()),
        }
    }
}
