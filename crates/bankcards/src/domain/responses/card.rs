use serde::{Deserialize, Serialize};

/// `card_number` is ALWAYS the masked display string; the decrypted PAN
/// never reaches a response.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CardResponse {
    pub id: i32,
    pub user_id: i32,
    pub card_number: String,
    pub status: String,
    pub balance: i64,
    pub expiry_date: String,
    pub created_at: Option<String>,
}
